//! Holiday calendar rules.
//!
//! Holidays are matched by calendar day only. A holiday whose doctor scope
//! is `NULL` or `"all"` applies to every doctor.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Doctor scope value meaning "every doctor".
pub const ALL_DOCTORS: &str = "all";

// ---------------------------------------------------------------------------
// Holiday type
// ---------------------------------------------------------------------------

/// Origin of a holiday row. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    National,
    Doctor,
    Manual,
    Api,
}

impl HolidayType {
    pub const ALL: [HolidayType; 4] = [
        HolidayType::National,
        HolidayType::Doctor,
        HolidayType::Manual,
        HolidayType::Api,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HolidayType::National => "national",
            HolidayType::Doctor => "doctor",
            HolidayType::Manual => "manual",
            HolidayType::Api => "api",
        }
    }
}

impl fmt::Display for HolidayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HolidayType {
    type Err = CoreError;

    /// Strict parse; unknown values are rejected rather than coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HolidayType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown holiday type '{s}'. Must be one of: national, doctor, manual, api"
                ))
            })
    }
}

impl TryFrom<String> for HolidayType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Canonical storage form of a doctor scope: blank and `"all"` become `None`.
pub fn normalize_scope(scope: Option<&str>) -> Option<String> {
    match scope.map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case(ALL_DOCTORS) => None,
        Some(s) => Some(s.to_string()),
    }
}

/// Whether a holiday with `scope` applies to `doctor_key`.
///
/// Clinic-wide holidays apply to everyone. A doctor-scoped holiday applies
/// only when the same doctor is asked about; a query without a doctor only
/// sees clinic-wide holidays.
pub fn applies_to_doctor(scope: Option<&str>, doctor_key: Option<&str>) -> bool {
    match normalize_scope(scope) {
        None => true,
        Some(s) => doctor_key.is_some_and(|d| d == s),
    }
}

/// Validate a new holiday's type/scope combination.
pub fn validate_scope(holiday_type: HolidayType, scope: Option<&str>) -> Result<(), CoreError> {
    if holiday_type == HolidayType::Doctor && normalize_scope(scope).is_none() {
        return Err(CoreError::Validation(
            "Doctor holidays must name a specific doctor".into(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Anything that sits on the holiday calendar.
pub trait CalendarEntry {
    fn day(&self) -> NaiveDate;
    fn doctor_scope(&self) -> Option<&str>;
}

/// First holiday on `day` that applies to `doctor_key`.
pub fn holiday_for_date<'a, H: CalendarEntry>(
    holidays: &'a [H],
    day: NaiveDate,
    doctor_key: Option<&str>,
) -> Option<&'a H> {
    holidays
        .iter()
        .find(|h| h.day() == day && applies_to_doctor(h.doctor_scope(), doctor_key))
}

/// Same as [`holiday_for_date`], taking an instant; the time of day is
/// ignored in the instant's own timezone.
pub fn holiday_at<'a, H: CalendarEntry, Tz: TimeZone>(
    holidays: &'a [H],
    at: &DateTime<Tz>,
    doctor_key: Option<&str>,
) -> Option<&'a H> {
    holiday_for_date(holidays, at.date_naive(), doctor_key)
}

/// Holidays on or after `from`, soonest first, capped at `limit`.
pub fn upcoming<H: CalendarEntry>(holidays: &[H], from: NaiveDate, limit: usize) -> Vec<&H> {
    let mut next: Vec<&H> = holidays.iter().filter(|h| h.day() >= from).collect();
    next.sort_by_key(|h| h.day());
    next.truncate(limit);
    next
}
