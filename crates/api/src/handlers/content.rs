//! Handlers for page section copy and section list items.
//!
//! Public reads go through a [`Resource`] and always answer 200 with the
//! resource state; a failed fetch shows up in its `error` field.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use clinic_core::error::CoreError;
use clinic_core::resource::{Resource, ResourceState, Source, Updatable};
use clinic_core::types::DbId;
use clinic_db::content::{SectionItemsSource, SectionKey, SectionSource};
use clinic_db::models::section::{SectionContent, UpdateSection};
use clinic_db::models::section_item::{CreateSectionItem, SectionItem, UpdateSectionItem};
use clinic_db::repositories::SectionItemRepo;

use super::upload::read_patch_form;
use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::{DataResponse, UpdateResponse};
use crate::state::AppState;

/// Load `params`, apply the multipart update, and report the outcome.
///
/// 200 when the write went through (a failed re-fetch is still reported in
/// `error`), 500 when the upload or write failed.
pub(crate) async fn apply_update<S>(
    state: &AppState,
    source: S,
    params: S::Params,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<UpdateResponse<S::Output>>)>
where
    S: Updatable,
    S::Output: serde::Serialize,
    S::Patch: serde::de::DeserializeOwned + Default,
{
    let (patch, image) = read_patch_form::<S::Patch>(multipart).await?;

    let resource = Resource::new(source);
    resource.load(params).await;
    let success = resource.update(patch, image, state.bucket.as_ref()).await;
    let snapshot = resource.snapshot().await;

    let status = if success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    Ok((
        status,
        Json(UpdateResponse {
            success,
            data: snapshot.data,
            error: snapshot.error,
        }),
    ))
}

/// Fetch through a fresh resource and return its state.
pub(crate) async fn load_state<S: Source>(source: S, params: S::Params) -> ResourceState<S::Output> {
    Resource::new(source).load(params).await
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/content/{page}/sections/{key}
pub async fn get_section(
    State(state): State<AppState>,
    Path((page, section_key)): Path<(String, String)>,
) -> Json<ResourceState<SectionContent>> {
    let key = SectionKey::new(page, section_key);
    Json(load_state(SectionSource::new(state.pool), key).await)
}

/// GET /api/v1/content/{page}/sections/{key}/items
pub async fn list_items(
    State(state): State<AppState>,
    Path((page, section_key)): Path<(String, String)>,
) -> Json<ResourceState<Vec<SectionItem>>> {
    let key = SectionKey::new(page, section_key);
    Json(load_state(SectionItemsSource::new(state.pool), key).await)
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// PUT /api/v1/admin/content/{page}/sections/{key}
///
/// Multipart form: `patch` (JSON [`UpdateSection`]) and optional `image`.
pub async fn update_section(
    admin: AdminSession,
    State(state): State<AppState>,
    Path((page, section_key)): Path<(String, String)>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    tracing::info!(admin_id = admin.admin_id, %page, %section_key, "Updating section");
    let source = SectionSource::new(state.pool.clone());
    apply_update::<SectionSource>(&state, source, SectionKey::new(page, section_key), multipart)
        .await
}

/// POST /api/v1/admin/content/{page}/sections/{key}/items
pub async fn create_item(
    admin: AdminSession,
    State(state): State<AppState>,
    Path((page, section_key)): Path<(String, String)>,
    Json(input): Json<CreateSectionItem>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let item = SectionItemRepo::create(&state.pool, &page, &section_key, &input).await?;

    tracing::info!(
        item_id = item.id,
        admin_id = admin.admin_id,
        %page,
        %section_key,
        "Section item created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PUT /api/v1/admin/content/items/{id}
pub async fn update_item(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
    Json(input): Json<UpdateSectionItem>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let item = SectionItemRepo::update(&state.pool, item_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("SectionItem", item_id)))?;

    tracing::info!(item_id, admin_id = admin.admin_id, "Section item updated");

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/admin/content/items/{id}
pub async fn delete_item(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(item_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SectionItemRepo::delete(&state.pool, item_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("SectionItem", item_id)));
    }

    tracing::info!(item_id, admin_id = admin.admin_id, "Section item deleted");

    Ok(StatusCode::NO_CONTENT)
}
