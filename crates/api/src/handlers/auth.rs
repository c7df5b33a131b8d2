//! Handlers for the `/auth` resource (login, logout, me, password).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use clinic_core::error::CoreError;
use clinic_core::types::Timestamp;
use clinic_db::models::admin::AdminUserResponse;
use clinic_db::repositories::{AdminSessionRepo, AdminUserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_session_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_against_dummy, verify_password,
    MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// The only message a failed login ever returns.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: Timestamp,
    pub admin: AdminUserResponse,
}

/// Request body for `POST /auth/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Verify credentials, open a session row, and return its token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    // 1. Find the admin. Unknown names still pay for a hash verification.
    let Some(admin) = AdminUserRepo::find_by_username(&state.pool, input.username.trim()).await?
    else {
        verify_against_dummy(&input.password);
        tracing::info!(username = %input.username, "Login failed: unknown admin");
        return Err(invalid_credentials());
    };

    // 2. Verify password. A corrupt stored hash is reported like a mismatch.
    let password_valid = verify_password(&input.password, &admin.password_hash).unwrap_or_else(|e| {
        tracing::error!(admin_id = admin.id, error = %e, "Stored password hash is unreadable");
        false
    });
    if !password_valid {
        tracing::info!(admin_id = admin.id, "Login failed: wrong password");
        return Err(invalid_credentials());
    }

    // 3. Open the session and sign its token.
    let expires_at = state.config.jwt.session_expires_at();
    let session = AdminSessionRepo::create(&state.pool, admin.id, expires_at).await?;
    let token = generate_session_token(
        admin.id,
        &admin.username,
        session.id,
        session.expires_at,
        &state.config.jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    AdminUserRepo::record_login(&state.pool, admin.id).await?;

    tracing::info!(admin_id = admin.id, session_id = session.id, "Admin logged in");

    Ok(Json(LoginResponse {
        token,
        expires_at: session.expires_at,
        admin: admin.into(),
    }))
}

/// POST /api/v1/auth/logout
///
/// End the current session. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<StatusCode> {
    AdminSessionRepo::delete(&state.pool, session.session_id).await?;
    tracing::info!(
        admin_id = session.admin_id,
        session_id = session.session_id,
        "Admin logged out"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    session: AdminSession,
) -> AppResult<Json<DataResponse<AdminUserResponse>>> {
    let admin = AdminUserRepo::find_by_id(&state.pool, session.admin_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("AdminUser", session.admin_id)))?;

    Ok(Json(DataResponse { data: admin.into() }))
}

/// POST /api/v1/auth/password
///
/// Change the signed-in admin's password. Every other session of the admin
/// is ended. Returns 204 No Content.
pub async fn change_password(
    State(state): State<AppState>,
    session: AdminSession,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let admin = AdminUserRepo::find_by_id(&state.pool, session.admin_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("AdminUser", session.admin_id)))?;

    let current_valid = verify_password(&input.current_password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    AdminUserRepo::update_password(&state.pool, admin.id, &hash).await?;

    let ended = AdminSessionRepo::delete_others(&state.pool, admin.id, session.session_id).await?;
    tracing::info!(admin_id = admin.id, ended_sessions = ended, "Admin password changed");

    Ok(StatusCode::NO_CONTENT)
}
