use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod github;
mod models;
mod pulse;
mod relay;
mod renderer;
mod routes;

use config::Config;
use relay::Relay;
use renderer::{session::DEFAULT_CAPACITY, Sessions, Templates};
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN is not set; repository listing and pulse requests will fail");
    }
    tracing::info!("Using GitHub API at {}", config.api_base);

    let relay = Arc::new(Relay::new(&config)?);
    let state = AppState {
        sessions: Arc::new(Sessions::new(relay.clone(), DEFAULT_CAPACITY)),
        templates: Arc::new(Templates::new()?),
        relay,
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Product Pulse Dashboard listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
