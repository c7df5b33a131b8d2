//! Route definitions for the public holiday calendar.

use axum::routing::get;
use axum::Router;

use crate::handlers::holidays;
use crate::state::AppState;

/// Routes mounted at `/holidays`.
///
/// ```text
/// GET /           -> list_holidays (?type=&doctor=)
/// GET /manual     -> list_manual_holidays
/// GET /check      -> check_date (?date=&doctor=)
/// GET /upcoming   -> list_upcoming (?doctor=&limit=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(holidays::list_holidays))
        .route("/manual", get(holidays::list_manual_holidays))
        .route("/check", get(holidays::check_date))
        .route("/upcoming", get(holidays::list_upcoming))
}
