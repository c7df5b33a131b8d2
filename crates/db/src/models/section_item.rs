//! Section list item models and DTOs.

use clinic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `section_items` table, scoped by `(page, section_key)`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct SectionItem {
    pub id: DbId,
    pub page: String,
    pub section_key: String,
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding an item to a section. The scope comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSectionItem {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}

/// DTO for partially updating an item.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSectionItem {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub display_order: Option<i32>,
}
