//! Session-backed authentication extractor for admin handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use clinic_core::error::CoreError;
use clinic_core::types::DbId;
use clinic_db::repositories::AdminSessionRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in admin, restored from a Bearer token and its session row.
///
/// Any handler taking this extractor is admin-only:
///
/// ```ignore
/// async fn my_handler(admin: AdminSession) -> AppResult<StatusCode> {
///     tracing::info!(admin_id = admin.admin_id, "handling request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: DbId,
    pub username: String,
    /// Row id in `admin_sessions`.
    pub session_id: DbId,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            unauthorized("Invalid Authorization format. Expected: Bearer <token>")
        })?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        // A valid signature is not enough: the session must still exist.
        let session = AdminSessionRepo::find_by_id(&state.pool, claims.sid)
            .await?
            .filter(|s| s.admin_id == claims.sub)
            .ok_or_else(|| unauthorized("Session has ended"))?;

        if session.expires_at <= Utc::now() {
            AdminSessionRepo::delete(&state.pool, session.id).await?;
            tracing::info!(session_id = session.id, "Purged expired admin session");
            return Err(unauthorized("Session has expired"));
        }

        Ok(AdminSession {
            admin_id: claims.sub,
            username: claims.username,
            session_id: session.id,
        })
    }
}
