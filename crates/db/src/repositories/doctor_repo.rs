//! Repository for the `doctor_profiles` table.

use sqlx::PgPool;

use crate::models::doctor::{DoctorProfile, UpdateDoctorProfile};

const COLUMNS: &str = "id, doctor_key, name, title, description, image_url, \
                       created_at, updated_at";

/// Provides data access for doctor profiles.
pub struct DoctorRepo;

impl DoctorRepo {
    pub async fn find_by_key(
        pool: &PgPool,
        doctor_key: &str,
    ) -> Result<Option<DoctorProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctor_profiles WHERE doctor_key = $1");
        sqlx::query_as::<_, DoctorProfile>(&query)
            .bind(doctor_key)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<DoctorProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM doctor_profiles ORDER BY name");
        sqlx::query_as::<_, DoctorProfile>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert the profile or patch the existing row for `doctor_key`.
    pub async fn upsert(
        pool: &PgPool,
        doctor_key: &str,
        dto: &UpdateDoctorProfile,
    ) -> Result<DoctorProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO doctor_profiles (doctor_key, name, title, description, image_url) \
             VALUES ($1, COALESCE($2, $1), COALESCE($3, ''), COALESCE($4, ''), $5) \
             ON CONFLICT ON CONSTRAINT uq_doctor_profiles_doctor_key DO UPDATE SET \
                 name        = COALESCE($2, doctor_profiles.name), \
                 title       = COALESCE($3, doctor_profiles.title), \
                 description = COALESCE($4, doctor_profiles.description), \
                 image_url   = COALESCE($5, doctor_profiles.image_url) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DoctorProfile>(&query)
            .bind(doctor_key)
            .bind(&dto.name)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(&dto.image_url)
            .fetch_one(pool)
            .await
    }
}
