//! Handlers for patient testimonials.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clinic_core::error::CoreError;
use clinic_core::resource::ResourceState;
use clinic_core::types::DbId;
use clinic_db::content::TestimonialsSource;
use clinic_db::models::testimonial::{CreateTestimonial, Testimonial};
use clinic_db::repositories::TestimonialRepo;
use serde::Deserialize;

use super::content::load_state;
use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TestimonialQuery {
    pub department: Option<String>,
}

/// GET /api/v1/testimonials?department=
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(query): Query<TestimonialQuery>,
) -> Json<ResourceState<Vec<Testimonial>>> {
    let department = query.department.filter(|d| !d.trim().is_empty());
    Json(load_state(TestimonialsSource::new(state.pool), department).await)
}

/// POST /api/v1/admin/testimonials
pub async fn create_testimonial(
    admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateTestimonial>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let testimonial = TestimonialRepo::create(&state.pool, &input).await?;

    tracing::info!(
        testimonial_id = testimonial.id,
        admin_id = admin.admin_id,
        department = %testimonial.department,
        "Testimonial created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: testimonial })))
}

/// DELETE /api/v1/admin/testimonials/{id}
pub async fn delete_testimonial(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(testimonial_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TestimonialRepo::delete(&state.pool, testimonial_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found(
            "Testimonial",
            testimonial_id,
        )));
    }

    tracing::info!(testimonial_id, admin_id = admin.admin_id, "Testimonial deleted");

    Ok(StatusCode::NO_CONTENT)
}
