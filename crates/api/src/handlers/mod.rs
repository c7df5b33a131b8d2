pub mod auth;
pub mod content;
pub mod doctors;
pub mod functions;
pub mod holidays;
pub mod page_blocks;
pub mod testimonials;
pub mod upload;

use clinic_core::error::CoreError;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run `validator` rules on a request body, mapping failures to 400.
pub(crate) fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}
