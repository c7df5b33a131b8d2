//! Page-builder blocks: validation and ordering before persistence.
//!
//! A page is an ordered list of typed blocks with an opaque JSON payload.
//! Saving a whole page assigns `order_index` from list position and mints a
//! UUID for any block the client did not id.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::BlockId;

/// Message returned when a single-block save lacks its keys.
pub const SAVE_ONE_REQUIRED: &str = "Block id and page path are required";

/// A block as submitted by the page editor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDraft {
    #[serde(default)]
    pub id: Option<BlockId>,
    pub block_type: String,
    #[serde(default)]
    pub content: serde_json::Value,
}

/// A single block submitted outside a whole-page save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleBlockDraft {
    #[serde(default)]
    pub id: Option<BlockId>,
    #[serde(default)]
    pub page_path: Option<String>,
    pub block_type: String,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub order_index: i32,
}

/// A block ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBlock {
    pub id: BlockId,
    pub page_path: String,
    pub block_type: String,
    pub content: serde_json::Value,
    pub order_index: i32,
}

fn require_page_path(page_path: &str) -> Result<String, CoreError> {
    let trimmed = page_path.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Page path must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn require_block_type(block_type: &str, position: usize) -> Result<String, CoreError> {
    let trimmed = block_type.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "Block at position {position} has an empty block_type"
        )));
    }
    Ok(trimmed.to_string())
}

/// Prepare a full replacement of a page's blocks.
///
/// Position becomes `order_index`; missing ids get a fresh v4 UUID; the same
/// id appearing twice is rejected.
pub fn prepare_blocks(
    page_path: &str,
    drafts: Vec<BlockDraft>,
) -> Result<Vec<PreparedBlock>, CoreError> {
    let page_path = require_page_path(page_path)?;
    let mut seen = HashSet::with_capacity(drafts.len());
    let mut prepared = Vec::with_capacity(drafts.len());

    for (position, draft) in drafts.into_iter().enumerate() {
        let block_type = require_block_type(&draft.block_type, position)?;
        let id = draft.id.unwrap_or_else(uuid::Uuid::new_v4);
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!(
                "Duplicate block id {id} in page '{page_path}'"
            )));
        }
        let order_index = i32::try_from(position)
            .map_err(|_| CoreError::Validation("Too many blocks for one page".into()))?;
        prepared.push(PreparedBlock {
            id,
            page_path: page_path.clone(),
            block_type,
            content: draft.content,
            order_index,
        });
    }

    Ok(prepared)
}

/// Prepare a single-block upsert. Both id and page path must be present.
pub fn prepare_single(draft: SingleBlockDraft) -> Result<PreparedBlock, CoreError> {
    let id = draft
        .id
        .ok_or_else(|| CoreError::Validation(SAVE_ONE_REQUIRED.into()))?;
    let page_path = draft
        .page_path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| CoreError::Validation(SAVE_ONE_REQUIRED.into()))?
        .to_string();
    let block_type = require_block_type(&draft.block_type, draft.order_index.max(0) as usize)?;

    Ok(PreparedBlock {
        id,
        page_path,
        block_type,
        content: draft.content,
        order_index: draft.order_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn draft(id: Option<BlockId>, block_type: &str) -> BlockDraft {
        BlockDraft {
            id,
            block_type: block_type.to_string(),
            content: json!({"text": block_type}),
        }
    }

    #[test]
    fn assigns_order_index_from_position() {
        let blocks = prepare_blocks(
            "/eye-care",
            vec![draft(None, "hero"), draft(None, "text"), draft(None, "cta")],
        )
        .unwrap();
        let order: Vec<i32> = blocks.iter().map(|b| b.order_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
        let types: Vec<&str> = blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(types, vec!["hero", "text", "cta"]);
        assert!(blocks.iter().all(|b| b.page_path == "/eye-care"));
    }

    #[test]
    fn keeps_client_ids_and_mints_missing_ones() {
        let existing = uuid::Uuid::new_v4();
        let blocks =
            prepare_blocks("/", vec![draft(Some(existing), "hero"), draft(None, "text")]).unwrap();
        assert_eq!(blocks[0].id, existing);
        assert_ne!(blocks[1].id, existing);
        assert!(!blocks[1].id.is_nil());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let id = uuid::Uuid::new_v4();
        assert_matches!(
            prepare_blocks("/", vec![draft(Some(id), "a"), draft(Some(id), "b")]),
            Err(CoreError::Validation(msg)) if msg.contains("Duplicate")
        );
    }

    #[test]
    fn empty_page_path_rejected() {
        assert_matches!(
            prepare_blocks("  ", vec![draft(None, "hero")]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn empty_block_type_rejected() {
        assert_matches!(
            prepare_blocks("/", vec![draft(None, "hero"), draft(None, " ")]),
            Err(CoreError::Validation(msg)) if msg.contains("position 1")
        );
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(prepare_blocks("/about", vec![]).unwrap().is_empty());
    }

    #[test]
    fn single_requires_id_and_page_path() {
        let base = SingleBlockDraft {
            id: Some(uuid::Uuid::new_v4()),
            page_path: Some("/".into()),
            block_type: "hero".into(),
            content: json!({}),
            order_index: 3,
        };
        assert_eq!(prepare_single(base.clone()).unwrap().order_index, 3);

        let no_id = SingleBlockDraft { id: None, ..base.clone() };
        assert_matches!(
            prepare_single(no_id),
            Err(CoreError::Validation(msg)) if msg == SAVE_ONE_REQUIRED
        );

        let no_path = SingleBlockDraft { page_path: Some("".into()), ..base };
        assert_matches!(
            prepare_single(no_path),
            Err(CoreError::Validation(msg)) if msg == SAVE_ONE_REQUIRED
        );
    }
}
