//! Feed endpoints
//!
//! `GET /` assembles the whole feed on every request. `GET /last` is the
//! terminal page the `next` link points at and never touches the sheets.

use axum::{
    extract::State,
    http::{header::HOST, HeaderMap},
    routing::get,
    Json, Router,
};
use oac_common::feed::FeedPage;
use tracing::{error, info};

use crate::engine::ClubItem;
use crate::error::ApiResult;
use crate::AppState;

/// GET /
pub async fn get_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<FeedPage<ClubItem>>> {
    let base_url = state.base_url(host_header(&headers));

    let items = match state.assembler.assemble(&base_url).await {
        Ok(items) => items,
        Err(e) => {
            error!("Feed assembly failed: {}", e);
            *state.last_error.write().await = Some(e.to_string());
            return Err(e.into());
        }
    };

    info!(items = items.len(), "Served feed");
    Ok(Json(FeedPage::new(&base_url, items)))
}

/// GET /last
pub async fn get_last_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<FeedPage<ClubItem>> {
    let base_url = state.base_url(host_header(&headers));
    Json(FeedPage::last(&base_url))
}

fn host_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(HOST).and_then(|value| value.to_str().ok())
}

/// Build feed routes
pub fn feed_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_feed))
        .route("/last", get(get_last_page))
}
