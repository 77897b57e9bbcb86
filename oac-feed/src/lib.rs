//! oac-feed library - OpenActive clubs feed
//!
//! Republishes club, organizer and location rows held in spreadsheets as
//! an OpenActive RPDE feed.

pub mod api;
pub mod engine;
pub mod error;
pub mod sheets;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use crate::engine::FeedAssembler;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Feed assembler over the configured spreadsheets
    pub assembler: Arc<FeedAssembler>,
    /// Externally visible base URL (no trailing slash); derived from the
    /// request `Host` header when unset
    pub public_base_url: Option<String>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last feed assembly failure for diagnostics
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(assembler: FeedAssembler, public_base_url: Option<String>) -> Self {
        Self {
            assembler: Arc::new(assembler),
            public_base_url,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Base URL for `@id` and `next` links
    pub fn base_url(&self, host: Option<&str>) -> String {
        match (&self.public_base_url, host) {
            (Some(url), _) => url.clone(),
            (None, Some(host)) => format!("https://{}", host),
            (None, None) => "https://localhost".to_string(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::feed_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
