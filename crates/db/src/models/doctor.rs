//! Doctor profile models and DTOs.

use clinic_core::resource::ImagePatch;
use clinic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `doctor_profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DoctorProfile {
    pub id: DbId,
    pub doctor_key: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public shape of a profile; the built-in default has no `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorContent {
    pub id: Option<DbId>,
    pub doctor_key: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<DoctorProfile> for DoctorContent {
    fn from(row: DoctorProfile) -> Self {
        Self {
            id: Some(row.id),
            doctor_key: row.doctor_key,
            name: row.name,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
        }
    }
}

/// Partial update of a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDoctorProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateDoctorProfile {
    /// Fill unset fields from `base` for the row-creating first write.
    pub fn or_from(&self, base: &DoctorContent) -> Self {
        Self {
            name: self.name.clone().or_else(|| Some(base.name.clone())),
            title: self.title.clone().or_else(|| Some(base.title.clone())),
            description: self
                .description
                .clone()
                .or_else(|| Some(base.description.clone())),
            image_url: self.image_url.clone().or_else(|| base.image_url.clone()),
        }
    }
}

impl ImagePatch for UpdateDoctorProfile {
    fn set_image_url(&mut self, url: String) {
        self.image_url = Some(url);
    }
}
