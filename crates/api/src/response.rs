//! Shared response envelope types for API handlers.
//!
//! Strict endpoints use a `{ "data": ... }` envelope. Admin content updates
//! use [`UpdateResponse`], mirroring the boolean-plus-error result of a
//! resource update.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "success", "data", "error" }` returned by resource updates.
#[derive(Debug, Serialize)]
pub struct UpdateResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}
