//! Content section models and DTOs.

use clinic_core::resource::ImagePatch;
use clinic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `content_sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContentSection {
    pub id: DbId,
    pub page: String,
    pub section_key: String,
    pub heading: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public shape of a section: a stored row or built-in default copy.
///
/// Defaults have no `id` and no `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionContent {
    pub id: Option<DbId>,
    pub page: String,
    pub section_key: String,
    pub heading: String,
    pub description: String,
    pub image_url: Option<String>,
    pub updated_at: Option<Timestamp>,
}

impl From<ContentSection> for SectionContent {
    fn from(row: ContentSection) -> Self {
        Self {
            id: Some(row.id),
            page: row.page,
            section_key: row.section_key,
            heading: row.heading,
            description: row.description,
            image_url: row.image_url,
            updated_at: Some(row.updated_at),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Partial update of a section. Missing fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSection {
    pub heading: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateSection {
    /// Fill unset fields from `base`, used when the first write creates the
    /// row over default copy.
    pub fn or_from(&self, base: &SectionContent) -> Self {
        Self {
            heading: self.heading.clone().or_else(|| Some(base.heading.clone())),
            description: self
                .description
                .clone()
                .or_else(|| Some(base.description.clone())),
            image_url: self.image_url.clone().or_else(|| base.image_url.clone()),
        }
    }
}

impl ImagePatch for UpdateSection {
    fn set_image_url(&mut self, url: String) {
        self.image_url = Some(url);
    }
}
