use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Request-boundary errors for the webhook endpoint.
///
/// Every variant maps to one HTTP status and a
/// `{ "error": <code>, "detail": <text> }` body. The first four are
/// detected before any side effect; `Internal` only arises from the
/// outbound post and is always caught at the handler.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("only POST is accepted on this path")]
    MethodNotAllowed,

    #[error("bad or missing secret")]
    Forbidden,

    #[error("invalid JSON body: {0}")]
    InvalidBody(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("outbound post failed: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Forbidden => StatusCode::FORBIDDEN,
            GatewayError::InvalidBody(_) | GatewayError::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code carried in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            GatewayError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            GatewayError::Forbidden => "FORBIDDEN",
            GatewayError::InvalidBody(_) => "INVALID_BODY",
            GatewayError::InvalidPayload(_) => "INVALID_PAYLOAD",
            GatewayError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.code(),
            "detail": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}
