//! Repository for the `section_items` table.

use clinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::section_item::{CreateSectionItem, SectionItem, UpdateSectionItem};

const COLUMNS: &str = "id, page, section_key, title, description, icon, display_order, \
                       created_at, updated_at";

/// Provides CRUD operations for section list items.
pub struct SectionItemRepo;

impl SectionItemRepo {
    /// Items of one section, by `display_order` then `id`.
    pub async fn list(
        pool: &PgPool,
        page: &str,
        section_key: &str,
    ) -> Result<Vec<SectionItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM section_items \
             WHERE page = $1 AND section_key = $2 \
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, SectionItem>(&query)
            .bind(page)
            .bind(section_key)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SectionItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM section_items WHERE id = $1");
        sqlx::query_as::<_, SectionItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an item. Without an explicit `display_order` it goes last.
    pub async fn create(
        pool: &PgPool,
        page: &str,
        section_key: &str,
        dto: &CreateSectionItem,
    ) -> Result<SectionItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO section_items (page, section_key, title, description, icon, display_order) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, ( \
                 SELECT COALESCE(MAX(display_order) + 1, 0) FROM section_items \
                 WHERE page = $1 AND section_key = $2))) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SectionItem>(&query)
            .bind(page)
            .bind(section_key)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.icon)
            .bind(dto.display_order)
            .fetch_one(pool)
            .await
    }

    /// Partially update an item. Uses `COALESCE` so only provided fields change.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateSectionItem,
    ) -> Result<Option<SectionItem>, sqlx::Error> {
        let query = format!(
            "UPDATE section_items SET \
                 title         = COALESCE($2, title), \
                 description   = COALESCE($3, description), \
                 icon          = COALESCE($4, icon), \
                 display_order = COALESCE($5, display_order) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SectionItem>(&query)
            .bind(id)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.icon)
            .bind(dto.display_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM section_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
