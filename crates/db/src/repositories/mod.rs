//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_session_repo;
pub mod admin_user_repo;
pub mod doctor_repo;
pub mod holiday_repo;
pub mod page_block_repo;
pub mod section_item_repo;
pub mod section_repo;
pub mod testimonial_repo;

pub use admin_session_repo::AdminSessionRepo;
pub use admin_user_repo::AdminUserRepo;
pub use doctor_repo::DoctorRepo;
pub use holiday_repo::HolidayRepo;
pub use page_block_repo::PageBlockRepo;
pub use section_item_repo::SectionItemRepo;
pub use section_repo::SectionRepo;
pub use testimonial_repo::TestimonialRepo;
