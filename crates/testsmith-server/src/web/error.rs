// crates/testsmith-server/src/web/error.rs
// Centralized error handling for HTTP API responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use testsmith_types::ApiResponse;
use tracing::{error, warn};

use crate::error::TestsmithError;

/// Failure response; always rendered as the `ApiResponse` envelope
#[derive(Debug)]
pub struct ApiError {
    pub status_code: StatusCode,
    /// Short label for the envelope's `error` field
    pub error: String,
    /// Human-readable detail for the envelope's `message` field
    pub message: String,
}

impl ApiError {
    /// Create a new bad request error
    pub fn bad_request(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            error: error.into(),
            message: message.into(),
        }
    }

    /// Replace the envelope label, keeping status and message
    pub fn with_label(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }
}

/// HTTP status for each error kind
pub fn status_for(err: &TestsmithError) -> StatusCode {
    match err {
        TestsmithError::Validation(_) | TestsmithError::InvalidTemplate(_) => {
            StatusCode::BAD_REQUEST
        }
        TestsmithError::ModelNotFound { .. } => StatusCode::NOT_FOUND,
        TestsmithError::Upstream(_) => StatusCode::BAD_GATEWAY,
        TestsmithError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        TestsmithError::Io(_) | TestsmithError::Json(_) | TestsmithError::Config(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<TestsmithError> for ApiError {
    fn from(err: TestsmithError) -> Self {
        let status_code = status_for(&err);
        if err.is_upstream() {
            warn!(status = %status_code, error = %err, "Model host request failed");
        } else if status_code.is_server_error() {
            error!(status = %status_code, error = %err, "Request failed");
        } else {
            warn!(status = %status_code, error = %err, "Request rejected");
        }
        Self {
            status_code,
            error: err.label().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body: ApiResponse<()> = ApiResponse::failure(self.error, self.message);
        (self.status_code, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&TestsmithError::Validation(vec!["x".into()])),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&TestsmithError::InvalidTemplate("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&TestsmithError::ModelNotFound { model: "m".into() }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&TestsmithError::Upstream("x".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&TestsmithError::UpstreamUnavailable { base_url: "u".into() }),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_for(&TestsmithError::Config("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_error_uses_label_and_message() {
        let err: ApiError = TestsmithError::ModelNotFound {
            model: "codellama".into(),
        }
        .into();
        assert_eq!(err.error, "Generation failed");
        assert_eq!(err.message, "Model \"codellama\" not found. Please pull the model first.");
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn test_model_host_errors_share_label() {
        for err in [
            TestsmithError::UpstreamUnavailable { base_url: "u".into() },
            TestsmithError::ModelNotFound { model: "m".into() },
            TestsmithError::Upstream("x".into()),
        ] {
            assert!(err.is_upstream());
            let api: ApiError = err.into();
            assert_eq!(api.error, "Generation failed");
            assert_ne!(api.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_with_label() {
        let err = ApiError::from(TestsmithError::Upstream("boom".into()))
            .with_label("Failed to retrieve models");
        assert_eq!(err.error, "Failed to retrieve models");
        assert_eq!(err.status_code, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_into_response_envelope() {
        let response = ApiError::bad_request("Validation failed", "Code is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["message"], "Code is required");
        assert!(json.get("data").is_none());
    }
}
