//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation and validation.
//! - [`bootstrap`] -- first-admin creation at startup.

pub mod bootstrap;
pub mod jwt;
pub mod password;
