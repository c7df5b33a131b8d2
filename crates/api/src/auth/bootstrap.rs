//! Initial admin account.

use clinic_db::repositories::AdminUserRepo;
use sqlx::PgPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};

/// Create the first admin when the `admin_users` table is empty.
///
/// Returns `true` if an account was created. Existing admins are never
/// touched, so restarting with different credentials is a no-op.
pub async fn ensure_initial_admin(pool: &PgPool, username: &str, password: &str) -> AppResult<bool> {
    if AdminUserRepo::count(pool).await? > 0 {
        tracing::debug!("Admin account already exists, skipping bootstrap");
        return Ok(false);
    }

    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("ADMIN_USERNAME must not be empty".into()));
    }
    validate_password_strength(password, MIN_PASSWORD_LENGTH).map_err(AppError::BadRequest)?;

    let hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let admin = AdminUserRepo::create(pool, username, &hash).await?;
    tracing::info!(admin_id = admin.id, username = %admin.username, "Initial admin created");
    Ok(true)
}
