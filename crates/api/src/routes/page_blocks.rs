//! Route definitions for public page blocks.

use axum::routing::get;
use axum::Router;

use crate::handlers::page_blocks;
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET /blocks?path=  -> list_blocks
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/blocks", get(page_blocks::list_blocks))
}
