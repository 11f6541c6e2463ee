use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use chartcast_core::{ChartcastConfig, Clock, SystemClock};
use chartcast_tiktok::Poster;

use crate::recorder::EventRecorder;

/// Central shared state, passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: ChartcastConfig,
    pub recorder: EventRecorder,
    pub poster: Box<dyn Poster>,
    pub clock: Box<dyn Clock>,
}

impl AppState {
    pub fn new(config: ChartcastConfig, poster: Box<dyn Poster>) -> Self {
        Self {
            config,
            recorder: EventRecorder::new(),
            poster,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the wall clock. Tests pin time with this to get
    /// deterministic captions and recorder timestamps.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

/// Assemble the full Axum router.
///
/// `/webhook` carries POST (alert ingress) and GET (debug page). Every
/// other method lands on the explicit fallback so the 405 body matches the
/// rest of the error taxonomy.
pub fn build_router(state: Arc<AppState>) -> Router {
    let webhook = post(crate::http::alert::alert_handler)
        .get(crate::http::debug::debug_page_handler)
        .fallback(crate::http::method_not_allowed);

    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/webhook", webhook)
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
