//! Debug page: GET /webhook.
//!
//! Renders the recorder's snapshot as minimal HTML, newest first. Payloads
//! and captions are escaped so alert content cannot inject markup. The page
//! reflects one process instance only and is not an audit log.

use axum::{extract::State, response::Html};
use chrono::SecondsFormat;
use std::fmt::Write;
use std::sync::Arc;

use crate::app::AppState;
use crate::error::GatewayError;

/// GET /webhook: recent-event page, or 405 when the recorder is disabled.
pub async fn debug_page_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, GatewayError> {
    if !state.config.recorder.enabled {
        return Err(GatewayError::MethodNotAllowed);
    }

    let events = state.recorder.snapshot();

    let mut page = String::with_capacity(1024);
    page.push_str(
        "<!DOCTYPE html><html><head><title>chartcast recent alerts</title></head><body>",
    );
    page.push_str("<h1>Recent alerts</h1>");
    let _ = write!(
        page,
        "<p>{} event(s), newest first. Per-process and best-effort only.</p>",
        events.len()
    );

    for (index, event) in events.iter().enumerate() {
        let timestamp = event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        let payload = htmlescape::encode_minimal(&event.payload.to_string());
        let caption = htmlescape::encode_minimal(&event.caption);
        let _ = write!(
            page,
            "<div><h2>#{index} {timestamp}</h2>\
             <h3>payload</h3><pre>{payload}</pre>\
             <h3>caption</h3><pre>{caption}</pre></div>",
        );
    }

    page.push_str("</body></html>");
    Ok(Html(page))
}
