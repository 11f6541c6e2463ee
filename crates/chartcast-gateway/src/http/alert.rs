//! Alert ingress: POST /webhook.
//!
//! Pipeline: secret gate, payload normalization, caption build, recorder,
//! outbound post. Stages run in that order and a failed stage stops the
//! request; nothing after it executes.

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, warn};

use chartcast_caption::{build_caption, select_variant, InboundPayload};

use crate::app::AppState;
use crate::error::GatewayError;

#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    secret: Option<String>,
}

/// POST /webhook?secret=…
///
/// Returns 200 with the caption preview and post outcome, 400 on bad
/// bodies, 403 on a bad secret, 500 when the outbound post fails.
pub async fn alert_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertQuery>,
    body: Bytes,
) -> Result<Json<Value>, GatewayError> {
    // The gate runs before the body is even looked at.
    if let Some(expected) = state.config.gateway.secret.as_deref() {
        if query.secret.as_deref() != Some(expected) {
            warn!("alert rejected: bad or missing secret");
            return Err(GatewayError::Forbidden);
        }
    }

    info!(bytes = body.len(), "alert received");

    let payload = normalize_payload(&body)?;

    let variant = select_variant(&payload, state.config.caption.default_variant);
    let now = state.clock.now();
    let caption = build_caption(&payload, variant, now);

    if state.config.recorder.enabled {
        state
            .recorder
            .record(now, Value::Object(payload), caption.clone());
    }

    let result = state.poster.post(&caption).await.map_err(|e| {
        warn!(error = %e, "outbound post failed");
        GatewayError::Internal(e.to_string())
    })?;

    info!(variant = %variant, skipped = result.skipped, "alert accepted");
    Ok(Json(json!({
        "ok": true,
        "caption_preview": caption,
        "tiktok": result,
    })))
}

/// Normalize the raw body into a payload object.
///
/// Accepts a JSON object directly, or a JSON string whose content parses to
/// an object (some alert senders double-encode). Anything else is rejected
/// before the caption stage.
fn normalize_payload(body: &[u8]) -> Result<InboundPayload, GatewayError> {
    if body.is_empty() {
        return Err(GatewayError::InvalidPayload("missing payload".into()));
    }

    let parsed: Value = serde_json::from_slice(body).map_err(|e| {
        let raw = String::from_utf8_lossy(body);
        GatewayError::InvalidBody(format!("{e}; raw: {raw}"))
    })?;

    // Unwrap one level of string encoding.
    let parsed = match parsed {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| GatewayError::InvalidBody(format!("{e}; raw: {inner}")))?,
        other => other,
    };

    match parsed {
        Value::Object(map) => Ok(map),
        other => Err(GatewayError::InvalidPayload(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
