//! Resource sources for every content type.
//!
//! Each source wraps a repository call in the [`Source`] contract:
//! singleton sources return `None` for a missing row (and supply default
//! copy where one exists), list sources always return a vector.
//!
//! [`Source`]: clinic_core::resource::Source

pub mod defaults;
mod doctors;
mod lists;
mod sections;

pub use doctors::DoctorSource;
pub use lists::{
    HolidaysSource, ManualHolidaysSource, PageBlocksSource, SectionItemsSource,
    TestimonialsSource,
};
pub use sections::{SectionKey, SectionSource};

use clinic_core::error::CoreError;

/// Repository failures surface to the resource as internal errors; the
/// resource logs them and stores a generic message.
fn db_error(e: sqlx::Error) -> CoreError {
    CoreError::Internal(e.to_string())
}
