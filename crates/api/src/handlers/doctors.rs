//! Handlers for doctor profiles.

use axum::extract::{Multipart, Path, State};
use axum::response::IntoResponse;
use axum::Json;
use clinic_core::resource::ResourceState;
use clinic_db::content::DoctorSource;
use clinic_db::models::doctor::DoctorContent;

use super::content::{apply_update, load_state};
use crate::error::AppResult;
use crate::middleware::auth::AdminSession;
use crate::state::AppState;

/// GET /api/v1/doctors/{key}
///
/// Doctors without a stored profile get the default one.
pub async fn get_doctor(
    State(state): State<AppState>,
    Path(doctor_key): Path<String>,
) -> Json<ResourceState<DoctorContent>> {
    Json(load_state(DoctorSource::new(state.pool), doctor_key).await)
}

/// PUT /api/v1/admin/doctors/{key}
///
/// Multipart form: `patch` (JSON profile fields) and optional `image`.
pub async fn update_doctor(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(doctor_key): Path<String>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    tracing::info!(admin_id = admin.admin_id, %doctor_key, "Updating doctor profile");
    let source = DoctorSource::new(state.pool.clone());
    apply_update(&state, source, doctor_key, multipart).await
}
