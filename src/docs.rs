use crate::api::attendance::MarkAttendance;
use crate::api::calendar::{CalendarCell, CalendarQuery, CalendarResponse, DayQuery};
use crate::api::holiday::{CreateHoliday, HolidayQuery};
use crate::api::leave::{CreateLeave, LeaveFilter, LeaveListResponse};
use crate::calendar::{DayDetail, DayStatus, MonthSummary, ResolvedStatus};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::holiday::Holiday;
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WorkMatrix API",
        version = "1.0.0",
        description = r#"
## WorkMatrix attendance calendar

Attendance, leave and holidays for employees and HR.

### Calendar
`GET /api/calendar` returns a 42-cell month grid (Sunday first). Each real
day carries one status, chosen in this order:
**holiday > sunday > leave / wfh > absent > half-day > present > none**.
`GET /api/calendar/{date}` expands a single day with every fact behind it.

### Security
All endpoints require a **JWT Bearer** token from the identity backend.
Tokens whose `role` claim is `hr` may act for any employee, approve leave,
mark attendance and add holidays.
"#,
    ),
    paths(
        crate::api::calendar::month_calendar,
        crate::api::calendar::day_detail,

        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::mark_day,

        crate::api::leave::create_leave,
        crate::api::leave::my_leaves,
        crate::api::leave::leave_list,
        crate::api::leave::get_leave,
        crate::api::leave::approve_leave,
        crate::api::leave::reject_leave,

        crate::api::holiday::list_holidays,
        crate::api::holiday::create_holiday
    ),
    components(
        schemas(
            CalendarQuery,
            DayQuery,
            CalendarCell,
            CalendarResponse,
            DayDetail,
            DayStatus,
            ResolvedStatus,
            MonthSummary,
            AttendanceRecord,
            AttendanceStatus,
            MarkAttendance,
            LeaveRequest,
            LeaveStatus,
            CreateLeave,
            LeaveFilter,
            LeaveListResponse,
            Holiday,
            HolidayQuery,
            CreateHoliday
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Calendar", description = "Resolved month calendar"),
        (name = "Attendance", description = "Punch in/out and HR marking"),
        (name = "Leave", description = "Leave applications and approvals"),
        (name = "Holiday", description = "Company holidays"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme the paths refer to.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
