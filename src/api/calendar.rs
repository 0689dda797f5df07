use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::calendar::{self, DayDetail, MonthCalendar, MonthSummary, ResolvedStatus, grid};
use crate::error::{ApiError, ApiResult};
use crate::model::{attendance::AttendanceRecord, holiday::Holiday, leave_request::LeaveRequest};
use crate::store::{self, holiday::HolidayCache};

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Defaults to the current year
    #[schema(example = 2024)]
    pub year: Option<i32>,
    /// 0-based month (0 = January), defaults to the current month
    #[schema(example = 2)]
    pub month: Option<u32>,
    /// HR only: whose calendar to show
    #[schema(example = 1000)]
    pub employee_id: Option<u64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DayQuery {
    /// HR only: whose day to show
    #[schema(example = 1000)]
    pub employee_id: Option<u64>,
}

/// One rendered grid position.
#[derive(Serialize, ToSchema)]
pub struct CalendarCell {
    #[schema(example = 12, nullable = true)]
    pub day: Option<u32>,
    #[schema(value_type = Option<String>, format = "date", example = "2024-03-12")]
    pub date: Option<NaiveDate>,
    /// Absent for padding cells
    pub status: Option<ResolvedStatus>,
}

#[derive(Serialize, ToSchema)]
pub struct CalendarResponse {
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 2)]
    pub month: u32,
    /// Always 42 cells, Sunday first
    pub cells: Vec<CalendarCell>,
    pub summary: MonthSummary,
    /// Sources that failed to load; the month was resolved without them
    #[schema(value_type = Vec<String>, example = json!([]))]
    pub incomplete: Vec<&'static str>,
}

/// Month selection with defaults taken from `today`.
pub fn selected_month(year: Option<i32>, month: Option<u32>, today: NaiveDate) -> (i32, u32) {
    (
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| calendar::month_index(today)),
    )
}

/// The three input collections of one month.
struct MonthInputs {
    attendance: Vec<AttendanceRecord>,
    leaves: Vec<LeaveRequest>,
    holidays: Vec<Holiday>,
    incomplete: Vec<&'static str>,
}

impl MonthInputs {
    fn resolve(&self, year: i32, month: u32) -> Result<MonthCalendar, ApiError> {
        Ok(MonthCalendar::resolve(
            year,
            month,
            &self.attendance,
            &self.leaves,
            &self.holidays,
        )?)
    }
}

/// Swaps a failed load for an empty collection and records the source.
fn or_empty<T, E: std::fmt::Display>(
    source: &'static str,
    loaded: Result<Vec<T>, E>,
    incomplete: &mut Vec<&'static str>,
) -> Vec<T> {
    loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, source, "Calendar source failed to load");
        incomplete.push(source);
        Vec::new()
    })
}

async fn load_month(
    pool: &MySqlPool,
    holidays: &HolidayCache,
    employee_id: u64,
    from: NaiveDate,
    to: NaiveDate,
) -> MonthInputs {
    let (attendance, leaves, holiday_list) = futures::join!(
        store::attendance::for_range(pool, employee_id, from, to),
        store::leave::overlapping(pool, employee_id, from, to),
        store::holiday::for_year(pool, holidays, from.year()),
    );

    let mut incomplete = Vec::new();
    MonthInputs {
        attendance: or_empty("attendance", attendance, &mut incomplete),
        leaves: or_empty("leaves", leaves, &mut incomplete),
        holidays: or_empty(
            "holidays",
            holiday_list.map(|h| h.to_vec()),
            &mut incomplete,
        ),
        incomplete,
    }
}

/// Month calendar with one resolved status per day
#[utoipa::path(
    get,
    path = "/api/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Resolved month", body = CalendarResponse),
        (status = 400, description = "Month outside 0-11", body = Object, example = json!({
            "error": "invalid month 12 of year 2024 (expected 0-11)"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Calendar"
)]
#[instrument(name = "month_calendar", skip_all, fields(year = ?query.year, month = ?query.month))]
pub async fn month_calendar(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    holidays: web::Data<HolidayCache>,
    query: web::Query<CalendarQuery>,
) -> ApiResult<HttpResponse> {
    let employee_id = auth.employee_scope(query.employee_id)?;
    let (year, month) = selected_month(query.year, query.month, Local::now().date_naive());
    let (from, to) = grid::month_bounds(year, month)?;

    let inputs = load_month(pool.get_ref(), holidays.get_ref(), employee_id, from, to).await;
    let resolved = inputs.resolve(year, month)?;

    let cells = resolved
        .cells()
        .iter()
        .zip(resolved.statuses())
        .map(|(cell, status)| CalendarCell {
            day: cell.day,
            date: cell.date,
            status,
        })
        .collect();

    Ok(HttpResponse::Ok().json(CalendarResponse {
        employee_id,
        year,
        month,
        cells,
        summary: resolved.summary(),
        incomplete: inputs.incomplete,
    }))
}

/// Every fact recorded for one day
#[utoipa::path(
    get,
    path = "/api/calendar/{date}",
    params(
        ("date" = String, Path, description = "Day to expand, YYYY-MM-DD"),
        DayQuery
    ),
    responses(
        (status = 200, description = "Day detail", body = DayDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Day not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Calendar"
)]
#[instrument(name = "day_detail", skip_all, fields(date = %path))]
pub async fn day_detail(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    holidays: web::Data<HolidayCache>,
    path: web::Path<NaiveDate>,
    query: web::Query<DayQuery>,
) -> ApiResult<HttpResponse> {
    let date = path.into_inner();
    let employee_id = auth.employee_scope(query.employee_id)?;
    let (year, month) = (date.year(), calendar::month_index(date));
    let (from, to) = grid::month_bounds(year, month)?;

    let inputs = load_month(pool.get_ref(), holidays.get_ref(), employee_id, from, to).await;
    let detail = inputs
        .resolve(year, month)?
        .detail_for(date)
        .ok_or_else(|| ApiError::NotFound("Day not found".into()))?;

    Ok(HttpResponse::Ok().json(detail))
}
