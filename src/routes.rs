use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::RelayError;
use crate::models::Repository;
use crate::pulse::PulseReport;
use crate::relay::Relay;
use crate::renderer::{SelectOutcome, SessionId, Sessions, Templates};

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
    pub sessions: Arc<Sessions<Arc<Relay>>>,
    pub templates: Arc<Templates>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/repositories", get(list_repositories))
        .route("/api/repository/:owner/:repo/pulse", get(repository_pulse))
        .route("/ui/repositories", get(repositories_fragment))
        .route("/ui/sessions/:session/rows/:index/pulse", get(select_fragment))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_repositories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Repository>>, RelayError> {
    let repositories = state.relay.list_repositories().await?;
    Ok(Json(repositories))
}

async fn repository_pulse(
    State(state): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> Result<Json<PulseReport>, RelayError> {
    let report = state.relay.pulse(&owner, &repo).await?;
    Ok(Json(report))
}

/// Opens a dashboard session for the page and renders its repository list.
async fn repositories_fragment(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let (session, list) = state.sessions.open(chrono::Utc::now()).await;
    let html = state
        .templates
        .repository_list(session, &list)
        .map_err(render_failure)?;
    Ok(Html(html))
}

/// Selects a row in the page's session. 204 when a later click won.
async fn select_fragment(
    State(state): State<AppState>,
    Path((session, index)): Path<(SessionId, usize)>,
) -> Result<Response, (StatusCode, String)> {
    match state.sessions.select(session, index, chrono::Utc::now()).await {
        SelectOutcome::Shown(pulse) => {
            let html = state.templates.pulse_panel(&pulse).map_err(render_failure)?;
            Ok(Html(html).into_response())
        }
        SelectOutcome::Superseded => Ok(StatusCode::NO_CONTENT.into_response()),
        SelectOutcome::UnknownSession => Err((
            StatusCode::NOT_FOUND,
            format!("Unknown dashboard session {}", session),
        )),
        SelectOutcome::UnknownRow => Err((
            StatusCode::NOT_FOUND,
            format!("No repository row {} in session {}", index, session),
        )),
    }
}

fn render_failure(e: anyhow::Error) -> (StatusCode, String) {
    tracing::error!("Failed to render dashboard fragment: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render dashboard".to_string())
}
