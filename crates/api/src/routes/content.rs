//! Route definitions for public section content.

use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET /{page}/sections/{key}        -> get_section
/// GET /{page}/sections/{key}/items  -> list_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{page}/sections/{key}", get(content::get_section))
        .route("/{page}/sections/{key}/items", get(content::list_items))
}
