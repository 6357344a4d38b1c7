use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failure talking to the upstream source-hosting API.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} answered {status}: {body}")]
    Status {
        endpoint: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type GithubResult<T> = Result<T, GithubError>;

/// Errors surfaced by the relay endpoints. Upstream detail stays server-side.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("GitHub token not configured")]
    TokenMissing,

    #[error("Failed to fetch repositories")]
    Repositories(#[source] GithubError),

    #[error("Failed to fetch repository pulse data")]
    Pulse(#[source] GithubError),

    /// Pulse requested with no credential. Reported like any other pulse failure.
    #[error("Failed to fetch repository pulse data")]
    PulseUnconfigured,
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::TokenMissing => StatusCode::BAD_REQUEST,
            RelayError::Repositories(_) | RelayError::Pulse(_) | RelayError::PulseUnconfigured => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_failure() -> GithubError {
        GithubError::Status {
            endpoint: "/repos/o/r".into(),
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: "Bad credentials".into(),
        }
    }

    #[test]
    fn test_messages_hide_upstream_cause() {
        assert_eq!(RelayError::TokenMissing.to_string(), "GitHub token not configured");
        assert_eq!(
            RelayError::Repositories(upstream_failure()).to_string(),
            "Failed to fetch repositories"
        );
        assert_eq!(
            RelayError::Pulse(upstream_failure()).to_string(),
            "Failed to fetch repository pulse data"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::TokenMissing.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::Pulse(upstream_failure()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unconfigured_pulse_looks_like_any_pulse_failure() {
        let err = RelayError::PulseUnconfigured;
        assert_eq!(err.to_string(), "Failed to fetch repository pulse data");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
