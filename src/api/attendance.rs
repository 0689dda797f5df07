use crate::auth::auth::AuthUser;
use crate::error::{ApiError, ApiResult, is_duplicate_key};
use crate::model::attendance::AttendanceStatus;
use crate::store;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

const MAX_NOTE_LEN: usize = 500;

#[derive(Deserialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = "half-day")]
    pub status: String,
    #[schema(example = "Doctor's appointment", nullable = true)]
    pub note: Option<String>,
}

impl MarkAttendance {
    /// Parsed status and trimmed, non-empty note.
    fn validate(&self) -> Result<(AttendanceStatus, Option<&str>), ApiError> {
        let status = self.status.parse::<AttendanceStatus>().map_err(|_| {
            ApiError::BadRequest(
                "Invalid status. Allowed: present, absent, half-day, work-from-home, other".into(),
            )
        })?;

        let note = self.note.as_deref().map(str::trim).filter(|n| !n.is_empty());
        if note.is_some_and(|n| n.chars().count() > MAX_NOTE_LEN) {
            return Err(ApiError::BadRequest(format!(
                "note must be at most {MAX_NOTE_LEN} characters"
            )));
        }

        Ok((status, note))
    }
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully"
        })),
        (status = 409, description = "Already checked in today", body = Object, example = json!({
            "error": "Already checked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(auth: AuthUser, pool: web::Data<MySqlPool>) -> ApiResult<HttpResponse> {
    let employee_id = auth.own_employee_id()?;

    match store::attendance::check_in(pool.get_ref(), employee_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Checked in successfully"
        }))),
        Err(e) if is_duplicate_key(&e) => {
            Err(ApiError::Conflict("Already checked in today".into()))
        }
        Err(e) => {
            tracing::error!(error = %e, employee_id, "Check-in failed");
            Err(ApiError::Internal)
        }
    }
}

/// Check-out endpoint
#[utoipa::path(
    put,
    path = "/api/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully"
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "error": "No active check-in found for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(auth: AuthUser, pool: web::Data<MySqlPool>) -> ApiResult<HttpResponse> {
    let employee_id = auth.own_employee_id()?;

    let closed = store::attendance::check_out(pool.get_ref(), employee_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Check-out failed");
            ApiError::Internal
        })?;

    if !closed {
        return Err(ApiError::BadRequest(
            "No active check-in found for today".into(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked out successfully"
    })))
}

/// Mark a day's attendance (HR)
#[utoipa::path(
    put,
    path = "/api/attendance/{employee_id}/{date}",
    params(
        ("employee_id" = u64, Path, description = "Employee whose day is marked"),
        ("date" = String, Path, description = "Day to mark, YYYY-MM-DD")
    ),
    request_body = MarkAttendance,
    responses(
        (status = 200, description = "Attendance marked", body = Object, example = json!({
            "message": "Attendance marked",
            "status": "half-day"
        })),
        (status = 400, description = "Invalid status or note"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn mark_day(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<(u64, NaiveDate)>,
    payload: web::Json<MarkAttendance>,
) -> ApiResult<HttpResponse> {
    auth.require_hr()?;

    let (employee_id, date) = path.into_inner();
    let (status, note) = payload.validate()?;

    store::attendance::mark(pool.get_ref(), employee_id, date, status, note).await?;

    tracing::info!(employee_id, %date, %status, marked_by = %auth.account_id, "Attendance marked");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance marked",
        "status": status.as_ref()
    })))
}
