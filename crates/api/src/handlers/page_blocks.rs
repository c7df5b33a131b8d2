//! Handlers for page-builder blocks.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use clinic_core::page_block::{prepare_blocks, prepare_single, BlockDraft, SingleBlockDraft};
use clinic_core::resource::ResourceState;
use clinic_db::content::PageBlocksSource;
use clinic_db::models::page_block::PageBlock;
use clinic_db::repositories::PageBlockRepo;
use serde::{Deserialize, Serialize};

use super::content::load_state;
use crate::error::AppResult;
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub path: String,
}

/// Request body for a whole-page save.
#[derive(Debug, Deserialize)]
pub struct SavePageRequest {
    pub page_path: String,
    pub blocks: Vec<BlockDraft>,
}

#[derive(Debug, Serialize)]
pub struct DeletedCount {
    pub deleted: u64,
}

/// GET /api/v1/pages/blocks?path=
pub async fn list_blocks(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<ResourceState<Vec<PageBlock>>> {
    Json(load_state(PageBlocksSource::new(state.pool), query.path).await)
}

/// PUT /api/v1/admin/pages/blocks
///
/// Replace every block of a page; returns the stored blocks in order.
pub async fn save_all(
    admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<SavePageRequest>,
) -> AppResult<impl IntoResponse> {
    let prepared = prepare_blocks(&input.page_path, input.blocks)?;
    let page_path = input.page_path.trim();

    let pruned = PageBlockRepo::save_all(&state.pool, page_path, &prepared).await?;
    let blocks = PageBlockRepo::list_for_page(&state.pool, page_path).await?;

    tracing::info!(
        admin_id = admin.admin_id,
        page_path,
        saved = prepared.len(),
        pruned,
        "Page blocks saved",
    );

    Ok(Json(DataResponse { data: blocks }))
}

/// POST /api/v1/admin/pages/blocks/one
///
/// Upsert one block by id.
pub async fn save_one(
    admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<SingleBlockDraft>,
) -> AppResult<impl IntoResponse> {
    let prepared = prepare_single(input)?;
    let block = PageBlockRepo::upsert(&state.pool, &prepared).await?;

    tracing::info!(
        admin_id = admin.admin_id,
        block_id = %block.id,
        page_path = %block.page_path,
        "Page block saved",
    );

    Ok(Json(DataResponse { data: block }))
}

/// DELETE /api/v1/admin/pages/blocks?path=
pub async fn delete_all(
    admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let deleted = PageBlockRepo::delete_for_page(&state.pool, query.path.trim()).await?;

    tracing::info!(admin_id = admin.admin_id, page_path = %query.path, deleted, "Page blocks deleted");

    Ok(Json(DataResponse {
        data: DeletedCount { deleted },
    }))
}
