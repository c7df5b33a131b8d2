//! Route definitions for the `/admin` tree.
//!
//! Every handler here takes the `AdminSession` extractor, so requests
//! without a live session are rejected with 401.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::upload::UPLOAD_BODY_LIMIT;
use crate::handlers::{content, doctors, holidays, page_blocks, testimonials};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// PUT    /content/{page}/sections/{key}        -> update_section (multipart)
/// POST   /content/{page}/sections/{key}/items  -> create_item
/// PUT    /content/items/{id}                   -> update_item
/// DELETE /content/items/{id}                   -> delete_item
///
/// PUT    /doctors/{key}                        -> update_doctor (multipart)
///
/// POST   /testimonials                         -> create_testimonial
/// DELETE /testimonials/{id}                    -> delete_testimonial
///
/// GET    /holidays                             -> admin_list_holidays
/// POST   /holidays                             -> create_holiday
/// DELETE /holidays/{id}                        -> delete_holiday
///
/// PUT    /pages/blocks                         -> save_all
/// DELETE /pages/blocks?path=                   -> delete_all
/// POST   /pages/blocks/one                     -> save_one
/// ```
///
/// The multipart routes accept bodies up to `UPLOAD_BODY_LIMIT`; all
/// others keep the default limit.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/content/{page}/sections/{key}",
            put(content::update_section).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/content/{page}/sections/{key}/items",
            post(content::create_item),
        )
        .route(
            "/content/items/{id}",
            put(content::update_item).delete(content::delete_item),
        )
        .route(
            "/doctors/{key}",
            put(doctors::update_doctor).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/testimonials", post(testimonials::create_testimonial))
        .route(
            "/testimonials/{id}",
            delete(testimonials::delete_testimonial),
        )
        .route(
            "/holidays",
            get(holidays::admin_list_holidays).post(holidays::create_holiday),
        )
        .route("/holidays/{id}", delete(holidays::delete_holiday))
        .route(
            "/pages/blocks",
            put(page_blocks::save_all).delete(page_blocks::delete_all),
        )
        .route("/pages/blocks/one", post(page_blocks::save_one))
}
