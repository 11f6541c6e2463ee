pub mod alert;
pub mod debug;
pub mod health;

use crate::error::GatewayError;

/// Fallback for unsupported methods on /webhook.
pub async fn method_not_allowed() -> GatewayError {
    GatewayError::MethodNotAllowed
}
