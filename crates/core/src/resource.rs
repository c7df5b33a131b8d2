//! Generic remote resource: one fetch/fallback/update state machine shared
//! by every content type.
//!
//! A [`Resource`] wraps a [`Source`] and exposes a [`ResourceState`]
//! (`data`, `is_loading`, `error`). Failures never escape: they are logged,
//! stored as a generic message, and previously loaded data is kept.
//!
//! Loads are numbered. When several loads overlap, only the most recently
//! issued one may write state; older completions are discarded.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::storage::{store_image, ContentBucket, ImageTarget, ImageUpload};

/// Message stored when a fetch fails.
pub const FETCH_ERROR: &str = "Failed to load content";

/// Message stored when an update or upload fails.
pub const UPDATE_ERROR: &str = "Failed to save changes";

/// Message stored when `update`/`refresh` runs before any `load`.
pub const NOT_LOADED_ERROR: &str = "Resource has not been loaded";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Snapshot of a resource, serialized as-is by public endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Source traits
// ---------------------------------------------------------------------------

/// Read side of a content type.
///
/// Singleton sources return `Ok(None)` when no row exists; list sources
/// always return `Ok(Some(vec))`, possibly empty.
#[async_trait]
pub trait Source: Send + Sync {
    type Params: Clone + Send + Sync;
    type Output: Clone + Send + Sync;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    async fn fetch(&self, params: &Self::Params) -> Result<Option<Self::Output>, CoreError>;

    /// Value exposed when `fetch` finds nothing. `None` means no default.
    fn fallback(&self, _params: &Self::Params) -> Option<Self::Output> {
        None
    }
}

/// Patches that can carry an uploaded image URL.
pub trait ImagePatch {
    fn set_image_url(&mut self, url: String);
}

/// Write side of a content type.
#[async_trait]
pub trait Updatable: Source {
    type Patch: ImagePatch + Send + Sync;

    /// Upload naming for images attached to a patch.
    fn image_target(&self, params: &Self::Params) -> ImageTarget;

    /// Apply `patch` to the row identified by `params`.
    async fn apply(&self, params: &Self::Params, patch: &Self::Patch) -> Result<(), CoreError>;
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

pub struct Resource<S: Source> {
    source: S,
    state: RwLock<ResourceState<S::Output>>,
    /// Parameters of the newest load, tagged with its generation.
    params: RwLock<Option<(u64, S::Params)>>,
    generation: AtomicU64,
}

impl<S: Source> Resource<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(ResourceState::default()),
            params: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current state without triggering a fetch.
    pub async fn snapshot(&self) -> ResourceState<S::Output> {
        self.state.read().await.clone()
    }

    /// Fetch with `params` and store the outcome.
    ///
    /// Returns the state after this load, or the current state if a newer
    /// load was issued while this one was in flight.
    pub async fn load(&self, params: S::Params) -> ResourceState<S::Output> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut current = self.params.write().await;
            let newer_exists = matches!(&*current, Some((g, _)) if *g > generation);
            if !newer_exists {
                *current = Some((generation, params.clone()));
            }
        }
        self.begin_loading(generation).await;

        let result = self.source.fetch(&params).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(
                source = self.source.name(),
                generation,
                "Discarding superseded resource response"
            );
            return state.clone();
        }

        match result {
            Ok(Some(data)) => {
                state.data = Some(data);
                state.error = None;
            }
            Ok(None) => {
                state.data = self.source.fallback(&params);
                state.error = None;
            }
            Err(e) => {
                tracing::error!(source = self.source.name(), error = %e, "Resource fetch failed");
                state.error = Some(FETCH_ERROR.to_string());
            }
        }
        state.is_loading = false;
        state.clone()
    }

    /// Re-run the newest load with the same parameters.
    pub async fn refresh(&self) -> ResourceState<S::Output> {
        match self.current_params().await {
            Some(params) => self.load(params).await,
            None => {
                self.state.write().await.error = Some(NOT_LOADED_ERROR.to_string());
                self.snapshot().await
            }
        }
    }

    /// Raise `is_loading` only for the newest load; a superseded load never
    /// completes its state, so it must not reopen the flag.
    async fn begin_loading(&self, generation: u64) {
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) == generation {
            state.is_loading = true;
        }
    }

    async fn current_params(&self) -> Option<S::Params> {
        self.params.read().await.as_ref().map(|(_, p)| p.clone())
    }

    async fn fail(&self, message: &str) -> bool {
        self.state.write().await.error = Some(message.to_string());
        false
    }
}

impl<S: Updatable> Resource<S> {
    /// Upload `image` (if any), merge its URL into `patch`, apply the patch,
    /// then re-fetch.
    ///
    /// Returns `true` when the write succeeded, even if the re-fetch that
    /// follows fails (that failure is stored in `error`).
    pub async fn update(
        &self,
        mut patch: S::Patch,
        image: Option<ImageUpload>,
        bucket: &dyn ContentBucket,
    ) -> bool {
        let Some(params) = self.current_params().await else {
            tracing::warn!(source = self.source.name(), "Update before load");
            return self.fail(NOT_LOADED_ERROR).await;
        };

        if let Some(image) = image {
            let target = self.source.image_target(&params);
            match store_image(bucket, &target, &image, chrono::Utc::now()).await {
                Ok(url) => patch.set_image_url(url),
                Err(e) => {
                    tracing::error!(source = self.source.name(), error = %e, "Image upload failed");
                    return self.fail(UPDATE_ERROR).await;
                }
            }
        }

        if let Err(e) = self.source.apply(&params, &patch).await {
            tracing::error!(source = self.source.name(), error = %e, "Resource update failed");
            return self.fail(UPDATE_ERROR).await;
        }

        tracing::info!(source = self.source.name(), "Resource updated");
        self.load(params).await;
        true
    }
}
