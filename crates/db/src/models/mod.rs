//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` DTOs for creates and patches (patch fields all `Option`)

pub mod admin;
pub mod doctor;
pub mod holiday;
pub mod page_block;
pub mod section;
pub mod section_item;
pub mod testimonial;
