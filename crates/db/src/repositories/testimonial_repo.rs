//! Repository for the `testimonials` table.

use clinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::testimonial::{CreateTestimonial, Testimonial};

const COLUMNS: &str = "id, department, author_name, content, rating, display_order, \
                       created_at, updated_at";

pub struct TestimonialRepo;

impl TestimonialRepo {
    /// Testimonials by `display_order`, newest first within the same order.
    /// `None` lists every department.
    pub async fn list(
        pool: &PgPool,
        department: Option<&str>,
    ) -> Result<Vec<Testimonial>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM testimonials \
             WHERE ($1::TEXT IS NULL OR department = $1) \
             ORDER BY display_order, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(department)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        dto: &CreateTestimonial,
    ) -> Result<Testimonial, sqlx::Error> {
        let query = format!(
            "INSERT INTO testimonials (department, author_name, content, rating, display_order) \
             VALUES ($1, $2, $3, COALESCE($4, 5), COALESCE($5, 0)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Testimonial>(&query)
            .bind(&dto.department)
            .bind(&dto.author_name)
            .bind(&dto.content)
            .bind(dto.rating)
            .bind(dto.display_order)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
