//! Repository for the `holidays` table.

use chrono::NaiveDate;
use clinic_core::holiday::{HolidayType, ALL_DOCTORS};
use clinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::holiday::{Holiday, HolidayFilter};

const COLUMNS: &str = "id, holiday_date, name, holiday_type, doctor_key, description, \
                       created_at, updated_at";

/// Insert payload with the type already parsed and the scope normalized.
#[derive(Debug, Clone)]
pub struct NewHoliday {
    pub holiday_date: NaiveDate,
    pub name: String,
    pub holiday_type: HolidayType,
    pub doctor_key: Option<String>,
    pub description: Option<String>,
}

/// Provides CRUD operations for holidays.
pub struct HolidayRepo;

impl HolidayRepo {
    /// List holidays by date, applying every filter that is set.
    ///
    /// A doctor filter keeps clinic-wide holidays (`NULL` or `'all'` scope)
    /// alongside that doctor's own.
    pub async fn list(pool: &PgPool, filter: &HolidayFilter) -> Result<Vec<Holiday>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM holidays \
             WHERE ($1::TEXT IS NULL OR holiday_type = $1) \
               AND ($2::TEXT IS NULL OR doctor_key IS NULL OR doctor_key = $3 OR doctor_key = $2) \
               AND ($4::DATE IS NULL OR holiday_date >= $4) \
               AND ($5::DATE IS NULL OR holiday_date <= $5) \
             ORDER BY holiday_date, id"
        );
        sqlx::query_as::<_, Holiday>(&query)
            .bind(filter.holiday_type.map(HolidayType::as_str))
            .bind(filter.doctor_key.as_deref())
            .bind(ALL_DOCTORS)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_all(pool)
            .await
    }

    /// Every holiday on a calendar day, regardless of scope.
    pub async fn on_date(pool: &PgPool, day: NaiveDate) -> Result<Vec<Holiday>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM holidays WHERE holiday_date = $1 ORDER BY id"
        );
        sqlx::query_as::<_, Holiday>(&query)
            .bind(day)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Holiday>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM holidays WHERE id = $1");
        sqlx::query_as::<_, Holiday>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &NewHoliday) -> Result<Holiday, sqlx::Error> {
        let query = format!(
            "INSERT INTO holidays (holiday_date, name, holiday_type, doctor_key, description) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Holiday>(&query)
            .bind(input.holiday_date)
            .bind(&input.name)
            .bind(input.holiday_type.as_str())
            .bind(&input.doctor_key)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM holidays WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
