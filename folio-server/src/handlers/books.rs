//! Catalog handlers: the gallery triggers as HTTP endpoints

use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use folio_core::{PageOutcome, RenderFrame, SortKey, ViewMode, ViewQuery};
use serde::{Deserialize, Serialize};

/// Query parameters for an ad-hoc view
#[derive(Debug, Deserialize)]
pub struct BooksQuery {
    pub search: Option<String>,
    pub sort: Option<SortKey>,
}

/// Current frame: the active view, or an ad-hoc one when `search` or `sort`
/// is given
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BooksQuery>,
) -> Json<RenderFrame> {
    if query.search.is_none() && query.sort.is_none() {
        return Json(state.catalog.frame().await);
    }

    let adhoc = ViewQuery {
        search: query.search,
        sort: query.sort,
    };
    Json(state.catalog.frame_for(&adhoc).await)
}

/// Replace the active search and sort
pub async fn set_view(
    State(state): State<AppState>,
    Json(query): Json<ViewQuery>,
) -> Json<RenderFrame> {
    state.catalog.set_query(query).await;
    Json(state.catalog.frame().await)
}

/// Toggle response
#[derive(Debug, Serialize)]
pub struct ModeResponse {
    pub mode: ViewMode,
    pub class: &'static str,
}

/// Switch between grid and list layout
pub async fn toggle_view(State(state): State<AppState>) -> Json<ModeResponse> {
    let mode = state.catalog.toggle_mode().await;
    Json(ModeResponse {
        mode,
        class: mode.css_class(),
    })
}

/// Page load response
#[derive(Debug, Serialize)]
pub struct PageResponse {
    #[serde(flatten)]
    pub outcome: PageOutcome,
    pub frame: RenderFrame,
}

/// Error body for a failed page load
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub page: u32,
}

/// Advance to the next page.
///
/// A failed fetch is a 502; the collection and view stay as they were.
pub async fn next_page(
    State(state): State<AppState>,
) -> Result<Json<PageResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.load_next_page().await {
        Ok(outcome) => Ok(Json(PageResponse {
            outcome,
            frame: state.catalog.frame().await,
        })),
        Err(e) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.error.to_string(),
                kind: e.kind(),
                page: e.page,
            }),
        )),
    }
}
