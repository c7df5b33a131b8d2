use async_trait::async_trait;
use clinic_core::error::CoreError;
use clinic_core::resource::{Source, Updatable};
use clinic_core::storage::ImageTarget;
use serde::Deserialize;
use sqlx::PgPool;

use super::{db_error, defaults};
use crate::models::section::{SectionContent, UpdateSection};
use crate::repositories::SectionRepo;

/// Identifies a section: the page it lives on and its key within the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SectionKey {
    pub page: String,
    pub section_key: String,
}

impl SectionKey {
    pub fn new(page: impl Into<String>, section_key: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            section_key: section_key.into(),
        }
    }
}

/// Singleton section copy with built-in defaults.
#[derive(Clone)]
pub struct SectionSource {
    pool: PgPool,
}

impl SectionSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Source for SectionSource {
    type Params = SectionKey;
    type Output = SectionContent;

    fn name(&self) -> &'static str {
        "section"
    }

    async fn fetch(&self, key: &SectionKey) -> Result<Option<SectionContent>, CoreError> {
        let row = SectionRepo::find(&self.pool, &key.page, &key.section_key)
            .await
            .map_err(db_error)?;
        Ok(row.map(SectionContent::from))
    }

    fn fallback(&self, key: &SectionKey) -> Option<SectionContent> {
        defaults::section(&key.page, &key.section_key)
    }
}

#[async_trait]
impl Updatable for SectionSource {
    type Patch = UpdateSection;

    /// `hero` on `eye-care` uploads to `hero-images/eye-care-<ts>.<ext>`.
    fn image_target(&self, key: &SectionKey) -> ImageTarget {
        ImageTarget::new(&key.section_key, &key.page)
    }

    async fn apply(&self, key: &SectionKey, patch: &UpdateSection) -> Result<(), CoreError> {
        let exists = SectionRepo::find(&self.pool, &key.page, &key.section_key)
            .await
            .map_err(db_error)?
            .is_some();

        // The first write over default copy keeps the default text for
        // fields the patch leaves unset.
        let patch = match defaults::section(&key.page, &key.section_key) {
            Some(base) if !exists => patch.or_from(&base),
            _ => patch.clone(),
        };

        let row = SectionRepo::upsert(&self.pool, &key.page, &key.section_key, &patch)
            .await
            .map_err(db_error)?;
        tracing::info!(
            section_id = row.id,
            page = %key.page,
            section_key = %key.section_key,
            "Section saved"
        );
        Ok(())
    }
}
