use std::sync::Arc;

use clinic_core::storage::ContentBucket;
use clinic_mail::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: clinic_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Content bucket for uploaded images.
    pub bucket: Arc<dyn ContentBucket>,
    /// Transport used by the email functions.
    pub mailer: Arc<dyn Mailer>,
}
