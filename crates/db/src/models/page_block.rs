//! Page-block model.
//!
//! Request payloads live in `clinic_core::page_block` since they are
//! validated before any database access.

use clinic_core::types::{BlockId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `page_blocks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PageBlock {
    pub id: BlockId,
    pub page_path: String,
    pub block_type: String,
    pub content: serde_json::Value,
    pub order_index: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
