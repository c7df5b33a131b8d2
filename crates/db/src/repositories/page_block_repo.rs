//! Repository for the `page_blocks` table.

use clinic_core::page_block::PreparedBlock;
use clinic_core::types::BlockId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::page_block::PageBlock;

const COLUMNS: &str = "id, page_path, block_type, content, order_index, created_at, updated_at";

/// Upsert statement shared by single and whole-page saves.
///
/// An existing id is only updated while it stays on the same page; an id
/// owned by another page affects no row.
const UPSERT: &str = "\
    INSERT INTO page_blocks (id, page_path, block_type, content, order_index) \
    VALUES ($1, $2, $3, $4, $5) \
    ON CONFLICT (id) DO UPDATE SET \
        block_type  = EXCLUDED.block_type, \
        content     = EXCLUDED.content, \
        order_index = EXCLUDED.order_index \
    WHERE page_blocks.page_path = EXCLUDED.page_path";

/// Failure of a page-block write.
#[derive(Debug, thiserror::Error)]
pub enum PageBlockError {
    /// The block id already exists on a different page.
    #[error("Block {0} belongs to another page")]
    ForeignBlock(BlockId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides data access for page-builder blocks.
pub struct PageBlockRepo;

impl PageBlockRepo {
    /// All blocks of a page by `order_index` ascending.
    pub async fn list_for_page(
        pool: &PgPool,
        page_path: &str,
    ) -> Result<Vec<PageBlock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM page_blocks WHERE page_path = $1 ORDER BY order_index, id"
        );
        sqlx::query_as::<_, PageBlock>(&query)
            .bind(page_path)
            .fetch_all(pool)
            .await
    }

    /// Replace a page's blocks in one transaction: upsert every block, then
    /// delete rows of the page that are not in the new set.
    ///
    /// Readers never observe an empty intermediate page. A block id owned by
    /// another page rolls the whole save back with
    /// [`PageBlockError::ForeignBlock`]. Returns the number of pruned rows.
    pub async fn save_all(
        pool: &PgPool,
        page_path: &str,
        blocks: &[PreparedBlock],
    ) -> Result<u64, PageBlockError> {
        let mut tx = pool.begin().await?;

        for block in blocks {
            if Self::upsert_in(&mut tx, block).await? == 0 {
                return Err(PageBlockError::ForeignBlock(block.id));
            }
        }

        let keep: Vec<BlockId> = blocks.iter().map(|b| b.id).collect();
        let pruned = sqlx::query("DELETE FROM page_blocks WHERE page_path = $1 AND id <> ALL($2)")
            .bind(page_path)
            .bind(&keep)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(pruned)
    }

    /// Insert or update a single block by id, within its own page.
    pub async fn upsert(pool: &PgPool, block: &PreparedBlock) -> Result<PageBlock, PageBlockError> {
        let query = format!("{UPSERT} RETURNING {COLUMNS}");
        sqlx::query_as::<_, PageBlock>(&query)
            .bind(block.id)
            .bind(&block.page_path)
            .bind(&block.block_type)
            .bind(&block.content)
            .bind(block.order_index)
            .fetch_optional(pool)
            .await?
            .ok_or(PageBlockError::ForeignBlock(block.id))
    }

    /// Delete every block of a page. Returns the count of deleted rows.
    pub async fn delete_for_page(pool: &PgPool, page_path: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM page_blocks WHERE page_path = $1")
            .bind(page_path)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn upsert_in(
        tx: &mut Transaction<'_, Postgres>,
        block: &PreparedBlock,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(UPSERT)
            .bind(block.id)
            .bind(&block.page_path)
            .bind(&block.block_type)
            .bind(&block.content)
            .bind(block.order_index)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
