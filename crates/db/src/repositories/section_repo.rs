//! Repository for the `content_sections` table.

use sqlx::PgPool;

use crate::models::section::{ContentSection, UpdateSection};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page, section_key, heading, description, image_url, \
                       created_at, updated_at";

/// Provides data access for page sections.
pub struct SectionRepo;

impl SectionRepo {
    /// Find the section identified by `(page, section_key)`.
    pub async fn find(
        pool: &PgPool,
        page: &str,
        section_key: &str,
    ) -> Result<Option<ContentSection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_sections WHERE page = $1 AND section_key = $2"
        );
        sqlx::query_as::<_, ContentSection>(&query)
            .bind(page)
            .bind(section_key)
            .fetch_optional(pool)
            .await
    }

    /// List every stored section of a page.
    pub async fn list_for_page(
        pool: &PgPool,
        page: &str,
    ) -> Result<Vec<ContentSection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM content_sections WHERE page = $1 ORDER BY section_key"
        );
        sqlx::query_as::<_, ContentSection>(&query)
            .bind(page)
            .fetch_all(pool)
            .await
    }

    /// Insert the section or patch the existing row.
    ///
    /// On update, `COALESCE` keeps fields the patch leaves unset.
    pub async fn upsert(
        pool: &PgPool,
        page: &str,
        section_key: &str,
        dto: &UpdateSection,
    ) -> Result<ContentSection, sqlx::Error> {
        let query = format!(
            "INSERT INTO content_sections (page, section_key, heading, description, image_url) \
             VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), $5) \
             ON CONFLICT ON CONSTRAINT uq_content_sections_page_key DO UPDATE SET \
                 heading     = COALESCE($3, content_sections.heading), \
                 description = COALESCE($4, content_sections.description), \
                 image_url   = COALESCE($5, content_sections.image_url) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContentSection>(&query)
            .bind(page)
            .bind(section_key)
            .bind(&dto.heading)
            .bind(&dto.description)
            .bind(&dto.image_url)
            .fetch_one(pool)
            .await
    }
}
