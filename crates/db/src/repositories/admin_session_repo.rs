//! Repository for the `admin_sessions` table.

use clinic_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::admin::AdminSession;

const COLUMNS: &str = "id, admin_id, expires_at, created_at";

/// Provides CRUD operations for admin sessions.
pub struct AdminSessionRepo;

impl AdminSessionRepo {
    pub async fn create(
        pool: &PgPool,
        admin_id: DbId,
        expires_at: Timestamp,
    ) -> Result<AdminSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_sessions (admin_id, expires_at) VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(admin_id)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a session by id, expired or not. Callers check `expires_at`.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_sessions WHERE id = $1");
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every session of an admin except `keep`. Returns the count.
    pub async fn delete_others(
        pool: &PgPool,
        admin_id: DbId,
        keep: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE admin_id = $1 AND id <> $2")
            .bind(admin_id)
            .bind(keep)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete expired sessions. Returns the count of deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
