use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("error fetching cycle stations: {0}")]
    UpstreamFetch(String),

    #[error("error parsing cycle stations: {0}")]
    UpstreamParse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl CycleError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CycleError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CycleError::NotFound(_) => StatusCode::NOT_FOUND,
            CycleError::Configuration(_)
            | CycleError::UpstreamFetch(_)
            | CycleError::UpstreamParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for CycleError {
    fn from(value: reqwest::Error) -> Self {
        CycleError::UpstreamFetch(value.to_string())
    }
}

impl From<serde_json::Error> for CycleError {
    fn from(value: serde_json::Error) -> Self {
        CycleError::UpstreamParse(value.to_string())
    }
}

impl From<roxmltree::Error> for CycleError {
    fn from(value: roxmltree::Error) -> Self {
        CycleError::UpstreamParse(value.to_string())
    }
}

impl IntoResponse for CycleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain")],
            self.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            CycleError::InvalidInput("invalid coords parameter".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CycleError::NotFound("no cycle stations found within range".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn upstream_and_config_errors_map_to_500() {
        for err in [
            CycleError::Configuration("TFL_APP_KEY must be set".into()),
            CycleError::UpstreamFetch("status 503".into()),
            CycleError::UpstreamParse("expected value".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn not_found_message_is_passed_through() {
        let err = CycleError::NotFound("no cycle stations found within range".into());
        assert_eq!(err.to_string(), "no cycle stations found within range");
    }

    #[test]
    fn bad_json_becomes_parse_error() {
        let err: CycleError = serde_json::from_str::<Vec<u32>>("{").unwrap_err().into();
        assert!(matches!(err, CycleError::UpstreamParse(_)));
    }
}
