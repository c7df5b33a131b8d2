use async_trait::async_trait;
use clinic_core::error::CoreError;
use clinic_core::resource::{Source, Updatable};
use clinic_core::storage::ImageTarget;
use sqlx::PgPool;

use super::{db_error, defaults};
use crate::models::doctor::{DoctorContent, UpdateDoctorProfile};
use crate::repositories::DoctorRepo;

/// Doctor profile by `doctor_key`, falling back to the default profile.
#[derive(Clone)]
pub struct DoctorSource {
    pool: PgPool,
}

impl DoctorSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Source for DoctorSource {
    type Params = String;
    type Output = DoctorContent;

    fn name(&self) -> &'static str {
        "doctor"
    }

    async fn fetch(&self, doctor_key: &String) -> Result<Option<DoctorContent>, CoreError> {
        let row = DoctorRepo::find_by_key(&self.pool, doctor_key)
            .await
            .map_err(db_error)?;
        Ok(row.map(DoctorContent::from))
    }

    fn fallback(&self, doctor_key: &String) -> Option<DoctorContent> {
        Some(defaults::doctor(doctor_key))
    }
}

#[async_trait]
impl Updatable for DoctorSource {
    type Patch = UpdateDoctorProfile;

    fn image_target(&self, doctor_key: &String) -> ImageTarget {
        ImageTarget::new("doctor", doctor_key.as_str())
    }

    async fn apply(&self, doctor_key: &String, patch: &UpdateDoctorProfile) -> Result<(), CoreError> {
        let existing = DoctorRepo::find_by_key(&self.pool, doctor_key)
            .await
            .map_err(db_error)?;
        let patch = match existing {
            Some(_) => patch.clone(),
            None => patch.or_from(&defaults::doctor(doctor_key)),
        };

        let row = DoctorRepo::upsert(&self.pool, doctor_key, &patch)
            .await
            .map_err(db_error)?;
        tracing::info!(doctor_id = row.id, doctor_key = %doctor_key, "Doctor profile saved");
        Ok(())
    }
}
