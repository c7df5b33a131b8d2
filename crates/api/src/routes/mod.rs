pub mod admin;
pub mod auth;
pub mod content;
pub mod functions;
pub mod health;
pub mod holidays;
pub mod page_blocks;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current admin (requires auth)
/// /auth/password                                   change password (requires auth)
///
/// /content/{page}/sections/{key}                   section copy (public)
/// /content/{page}/sections/{key}/items             section items (public)
/// /doctors/{key}                                   doctor profile (public)
/// /testimonials                                    testimonials (public, ?department=)
/// /pages/blocks                                    page blocks (public, ?path=)
///
/// /holidays                                        holidays (public, ?type=&doctor=)
/// /holidays/manual                                 manual holidays (public)
/// /holidays/check                                  holiday on a date (public, ?date=&doctor=)
/// /holidays/upcoming                               next holidays (public, ?doctor=&limit=)
///
/// /admin/content/{page}/sections/{key}             update section (PUT, multipart)
/// /admin/content/{page}/sections/{key}/items       create item (POST)
/// /admin/content/items/{id}                        update, delete item
/// /admin/doctors/{key}                             update doctor (PUT, multipart)
/// /admin/testimonials                              create testimonial (POST)
/// /admin/testimonials/{id}                         delete testimonial
/// /admin/holidays                                  list, create holidays
/// /admin/holidays/{id}                             delete holiday
/// /admin/pages/blocks                              save page (PUT), delete page (DELETE, ?path=)
/// /admin/pages/blocks/one                          save one block (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Admin session.
        .nest("/auth", auth::router())
        // Public content.
        .nest("/content", content::router())
        .route("/doctors/{key}", get(handlers::doctors::get_doctor))
        .route(
            "/testimonials",
            get(handlers::testimonials::list_testimonials),
        )
        .nest("/pages", page_blocks::router())
        .nest("/holidays", holidays::router())
        // Everything editable (requires auth).
        .nest("/admin", admin::router())
}
