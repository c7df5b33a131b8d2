//! Testimonial models and DTOs.

use clinic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `testimonials` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Testimonial {
    pub id: DbId,
    pub department: String,
    pub author_name: String,
    pub content: String,
    pub rating: i16,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTestimonial {
    #[validate(length(min = 1))]
    pub department: String,
    #[validate(length(min = 1, max = 200))]
    pub author_name: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,
    pub display_order: Option<i32>,
}
