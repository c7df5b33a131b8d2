//! Request extractors.
//!
//! - [`auth::AdminSession`] -- restores the admin session named by a Bearer token.

pub mod auth;
