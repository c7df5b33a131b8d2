//! Clinic domain logic with no internal dependencies.
//!
//! Everything here is usable from the repository layer, the HTTP layer and
//! tests alike:
//!
//! - [`resource`] -- the generic remote resource (fetch, fallback, update).
//! - [`holiday`] -- holiday types and calendar-day matching.
//! - [`page_block`] -- page-builder block validation and ordering.
//! - [`storage`] -- content bucket abstraction for image uploads.
//! - [`viewport`] -- device classification by viewport width.
//! - [`scroll`] -- scroll target resolution and same-page anchor handling.

pub mod error;
pub mod holiday;
pub mod page_block;
pub mod resource;
pub mod scroll;
pub mod storage;
pub mod types;
pub mod viewport;
