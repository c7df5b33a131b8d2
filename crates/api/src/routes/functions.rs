//! Route definitions for the email functions.

use axum::routing::post;
use axum::Router;

use crate::handlers::functions;
use crate::state::AppState;

/// Routes mounted at `/functions`, outside `/api/v1`.
///
/// ```text
/// POST    /send-otp         -> send_otp
/// POST    /send-magic-link  -> send_magic_link
/// POST    /send-welcome     -> send_welcome
/// OPTIONS (each of the above) -> preflight
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/send-otp",
            post(functions::send_otp).options(functions::preflight),
        )
        .route(
            "/send-magic-link",
            post(functions::send_magic_link).options(functions::preflight),
        )
        .route(
            "/send-welcome",
            post(functions::send_welcome).options(functions::preflight),
        )
}
