//! Holiday models and DTOs.

use chrono::NaiveDate;
use clinic_core::holiday::{CalendarEntry, HolidayType};
use clinic_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `holidays` table.
///
/// `holiday_type` is decoded strictly; a value outside the CHECK set fails
/// the row decode instead of being coerced.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Holiday {
    pub id: DbId,
    pub holiday_date: NaiveDate,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub holiday_type: HolidayType,
    pub doctor_key: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CalendarEntry for Holiday {
    fn day(&self) -> NaiveDate {
        self.holiday_date
    }

    fn doctor_scope(&self) -> Option<&str> {
        self.doctor_key.as_deref()
    }
}

/// DTO for creating a holiday. `holiday_type` defaults to manual and is
/// parsed strictly by the handler.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHoliday {
    pub holiday_date: NaiveDate,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub holiday_type: Option<String>,
    pub doctor_key: Option<String>,
    pub description: Option<String>,
}

/// Filter for listing holidays. All fields optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HolidayFilter {
    pub holiday_type: Option<HolidayType>,
    /// Holidays that apply to this doctor (clinic-wide ones included).
    pub doctor_key: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
