//! List sources. Each returns `Some(vec)`, empty when nothing is stored.

use async_trait::async_trait;
use clinic_core::error::CoreError;
use clinic_core::holiday::HolidayType;
use clinic_core::resource::Source;
use sqlx::PgPool;

use super::{db_error, SectionKey};
use crate::models::holiday::{Holiday, HolidayFilter};
use crate::models::page_block::PageBlock;
use crate::models::section_item::SectionItem;
use crate::models::testimonial::Testimonial;
use crate::repositories::{HolidayRepo, PageBlockRepo, SectionItemRepo, TestimonialRepo};

// ---------------------------------------------------------------------------
// Section items
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct SectionItemsSource {
    pool: PgPool,
}

impl SectionItemsSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Source for SectionItemsSource {
    type Params = SectionKey;
    type Output = Vec<SectionItem>;

    fn name(&self) -> &'static str {
        "section_items"
    }

    async fn fetch(&self, key: &SectionKey) -> Result<Option<Vec<SectionItem>>, CoreError> {
        SectionItemRepo::list(&self.pool, &key.page, &key.section_key)
            .await
            .map(Some)
            .map_err(db_error)
    }
}

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

/// Testimonials for one department, or all when the department is `None`.
#[derive(Clone)]
pub struct TestimonialsSource {
    pool: PgPool,
}

impl TestimonialsSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Source for TestimonialsSource {
    type Params = Option<String>;
    type Output = Vec<Testimonial>;

    fn name(&self) -> &'static str {
        "testimonials"
    }

    async fn fetch(&self, department: &Option<String>) -> Result<Option<Vec<Testimonial>>, CoreError> {
        TestimonialRepo::list(&self.pool, department.as_deref())
            .await
            .map(Some)
            .map_err(db_error)
    }
}

// ---------------------------------------------------------------------------
// Holidays
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct HolidaysSource {
    pool: PgPool,
}

impl HolidaysSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Source for HolidaysSource {
    type Params = HolidayFilter;
    type Output = Vec<Holiday>;

    fn name(&self) -> &'static str {
        "holidays"
    }

    async fn fetch(&self, filter: &HolidayFilter) -> Result<Option<Vec<Holiday>>, CoreError> {
        HolidayRepo::list(&self.pool, filter)
            .await
            .map(Some)
            .map_err(db_error)
    }
}

/// Holidays entered by hand in the admin.
#[derive(Clone)]
pub struct ManualHolidaysSource {
    pool: PgPool,
}

impl ManualHolidaysSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Source for ManualHolidaysSource {
    type Params = ();
    type Output = Vec<Holiday>;

    fn name(&self) -> &'static str {
        "manual_holidays"
    }

    async fn fetch(&self, _: &()) -> Result<Option<Vec<Holiday>>, CoreError> {
        let filter = HolidayFilter {
            holiday_type: Some(HolidayType::Manual),
            ..Default::default()
        };
        HolidayRepo::list(&self.pool, &filter)
            .await
            .map(Some)
            .map_err(db_error)
    }
}

// ---------------------------------------------------------------------------
// Page blocks
// ---------------------------------------------------------------------------

/// Blocks of one page path, in `order_index` order.
#[derive(Clone)]
pub struct PageBlocksSource {
    pool: PgPool,
}

impl PageBlocksSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Source for PageBlocksSource {
    type Params = String;
    type Output = Vec<PageBlock>;

    fn name(&self) -> &'static str {
        "page_blocks"
    }

    async fn fetch(&self, page_path: &String) -> Result<Option<Vec<PageBlock>>, CoreError> {
        PageBlockRepo::list_for_page(&self.pool, page_path)
            .await
            .map(Some)
            .map_err(db_error)
    }
}
