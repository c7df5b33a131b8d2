//! Handlers for the clinic holiday calendar.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use clinic_core::error::CoreError;
use clinic_core::holiday::{
    holiday_at, holiday_for_date, normalize_scope, upcoming, validate_scope, HolidayType,
};
use clinic_core::resource::ResourceState;
use clinic_core::types::DbId;
use clinic_db::content::{HolidaysSource, ManualHolidaysSource};
use clinic_db::models::holiday::{CreateHoliday, Holiday, HolidayFilter};
use clinic_db::repositories::holiday_repo::NewHoliday;
use clinic_db::repositories::HolidayRepo;
use serde::Deserialize;

use super::content::load_state;
use super::validate_input;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

/// Upcoming holidays returned when no `limit` is given.
const DEFAULT_UPCOMING_LIMIT: usize = 10;

/// Largest accepted `limit` for upcoming holidays.
const MAX_UPCOMING_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters shared by the holiday list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct HolidayQuery {
    #[serde(rename = "type")]
    pub holiday_type: Option<String>,
    pub doctor: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl HolidayQuery {
    /// Parse into a repository filter. Unknown types are a validation error.
    fn into_filter(self) -> AppResult<HolidayFilter> {
        let holiday_type = self
            .holiday_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::parse::<HolidayType>)
            .transpose()?;
        Ok(HolidayFilter {
            holiday_type,
            doctor_key: normalize_scope(self.doctor.as_deref()),
            from: self.from,
            to: self.to,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    pub doctor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub doctor: Option<String>,
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/holidays?type=&doctor=
pub async fn list_holidays(
    State(state): State<AppState>,
    Query(query): Query<HolidayQuery>,
) -> AppResult<Json<ResourceState<Vec<Holiday>>>> {
    let filter = query.into_filter()?;
    Ok(Json(load_state(HolidaysSource::new(state.pool), filter).await))
}

/// GET /api/v1/holidays/manual
pub async fn list_manual_holidays(
    State(state): State<AppState>,
) -> Json<ResourceState<Vec<Holiday>>> {
    Json(load_state(ManualHolidaysSource::new(state.pool), ()).await)
}

/// GET /api/v1/holidays/check?date=&doctor=
///
/// The holiday falling on that calendar day for the doctor, or `null`.
/// Timestamps are reduced to their date in their own offset.
pub async fn check_date(
    State(state): State<AppState>,
    Query(query): Query<CheckQuery>,
) -> AppResult<Json<DataResponse<Option<Holiday>>>> {
    let doctor = normalize_scope(query.doctor.as_deref());
    let raw = query.date.trim();

    let holiday = if let Ok(day) = raw.parse::<NaiveDate>() {
        let holidays = HolidayRepo::on_date(&state.pool, day).await?;
        holiday_for_date(&holidays, day, doctor.as_deref()).cloned()
    } else if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        let holidays = HolidayRepo::on_date(&state.pool, at.date_naive()).await?;
        holiday_at(&holidays, &at, doctor.as_deref()).cloned()
    } else {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Invalid date '{raw}'. Expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))));
    };

    Ok(Json(DataResponse { data: holiday }))
}

/// GET /api/v1/holidays/upcoming?doctor=&limit=
pub async fn list_upcoming(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> AppResult<Json<DataResponse<Vec<Holiday>>>> {
    let today = Utc::now().date_naive();
    let filter = HolidayFilter {
        doctor_key: normalize_scope(query.doctor.as_deref()),
        from: Some(today),
        ..HolidayFilter::default()
    };
    let holidays = HolidayRepo::list(&state.pool, &filter).await?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_UPCOMING_LIMIT)
        .min(MAX_UPCOMING_LIMIT);

    let next = upcoming(&holidays, today, limit)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DataResponse { data: next }))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/holidays?type=&doctor=&from=&to=
pub async fn admin_list_holidays(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<HolidayQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = query.into_filter()?;
    let holidays = HolidayRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: holidays }))
}

/// POST /api/v1/admin/holidays
///
/// `holiday_type` defaults to `manual`.
pub async fn create_holiday(
    admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateHoliday>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let holiday_type = match input.holiday_type.as_deref().map(str::trim) {
        None | Some("") => HolidayType::Manual,
        Some(raw) => raw.parse::<HolidayType>()?,
    };
    validate_scope(holiday_type, input.doctor_key.as_deref())?;

    let new = NewHoliday {
        holiday_date: input.holiday_date,
        name: input.name.trim().to_string(),
        holiday_type,
        doctor_key: normalize_scope(input.doctor_key.as_deref()),
        description: input.description,
    };
    let holiday = HolidayRepo::create(&state.pool, &new).await?;

    tracing::info!(
        holiday_id = holiday.id,
        admin_id = admin.admin_id,
        date = %holiday.holiday_date,
        holiday_type = %holiday.holiday_type,
        "Holiday created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: holiday })))
}

/// DELETE /api/v1/admin/holidays/{id}
pub async fn delete_holiday(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(holiday_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = HolidayRepo::delete(&state.pool, holiday_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Holiday", holiday_id)));
    }

    tracing::info!(holiday_id, admin_id = admin.admin_id, "Holiday deleted");

    Ok(StatusCode::NO_CONTENT)
}
