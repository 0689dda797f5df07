use crate::auth::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::model::leave_request::{LeaveRequest, LeaveStatus};
use crate::store;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

const MAX_TYPE_LEN: usize = 100;
const DEFAULT_PER_PAGE: u64 = 10;
const MAX_PER_PAGE: u64 = 100;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2024-03-10", format = "date", value_type = String)]
    pub from_date: NaiveDate,
    #[schema(example = "2024-03-12", format = "date", value_type = String)]
    pub to_date: NaiveDate,
    /// Free text; anything containing "wfh" counts as work from home
    #[schema(example = "Casual Leave")]
    pub leave_type: String,
    #[schema(example = "Family function", nullable = true)]
    pub reason: Option<String>,
}

impl CreateLeave {
    /// Trimmed type and reason, once the span and type check out.
    fn validate(&self) -> Result<(&str, Option<&str>), ApiError> {
        if self.from_date > self.to_date {
            return Err(ApiError::BadRequest(
                "from_date cannot be after to_date".into(),
            ));
        }

        let leave_type = self.leave_type.trim();
        if leave_type.is_empty() {
            return Err(ApiError::BadRequest("leave_type must not be empty".into()));
        }
        if leave_type.chars().count() > MAX_TYPE_LEN {
            return Err(ApiError::BadRequest(format!(
                "leave_type must be at most {MAX_TYPE_LEN} characters"
            )));
        }

        let reason = self.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());
        Ok((leave_type, reason))
    }
}

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LeaveFilter {
    /// Filter by employee ID
    #[schema(example = 1000)]
    pub employee_id: Option<u64>,
    /// Filter by leave status
    #[schema(example = "pending")]
    pub status: Option<LeaveStatus>,
    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u64>,
    /// Pagination per page number
    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
struct Page {
    page: u64,
    per_page: u64,
}

impl Page {
    fn from_filter(page: Option<u64>, per_page: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
        }
    }

    fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 10)]
    pub per_page: u64,
    #[schema(example = 1)]
    pub total: i64,
}

/// Apply for leave
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "id": 12,
            "status": "pending"
         })
        ),
        (status = 400, description = "Bad request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
#[instrument(name = "create_leave", skip_all)]
pub async fn create_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeave>,
) -> ApiResult<HttpResponse> {
    let employee_id = auth.own_employee_id()?;
    let (leave_type, reason) = payload.validate()?;

    let id = store::leave::insert(
        pool.get_ref(),
        employee_id,
        payload.from_date,
        payload.to_date,
        leave_type,
        reason,
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to create leave request");
        ApiError::Internal
    })?;

    tracing::info!(leave_id = id, employee_id, "Leave request submitted");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Leave request submitted",
        "id": id,
        "status": LeaveStatus::Pending.as_ref()
    })))
}

/// The caller's own leave requests, newest first
#[utoipa::path(
    get,
    path = "/api/leave/mine",
    responses(
        (status = 200, description = "Own leave requests", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leaves(auth: AuthUser, pool: web::Data<MySqlPool>) -> ApiResult<HttpResponse> {
    let employee_id = auth.own_employee_id()?;
    let leaves = store::leave::for_employee(pool.get_ref(), employee_id).await?;
    Ok(HttpResponse::Ok().json(leaves))
}

/// Paginated leave list (HR)
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> ApiResult<HttpResponse> {
    auth.require_hr()?;

    let page = Page::from_filter(query.page, query.per_page);
    let (data, total) = store::leave::list(
        pool.get_ref(),
        query.employee_id,
        query.status,
        page.per_page,
        page.offset(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data,
        page: page.page,
        per_page: page.per_page,
        total,
    }))
}

/// One leave request. HR sees any, employees only their own.
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "error": "Leave request not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let leave_id = path.into_inner();

    let leave = store::leave::by_id(pool.get_ref(), leave_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Leave request not found".into()))?;

    auth.employee_scope(Some(leave.employee_id))?;

    Ok(HttpResponse::Ok().json(leave))
}

async fn decide(
    auth: AuthUser,
    pool: &MySqlPool,
    leave_id: u64,
    decision: LeaveStatus,
) -> ApiResult<HttpResponse> {
    auth.require_hr()?;

    if !store::leave::decide(pool, leave_id, decision).await? {
        return Err(ApiError::BadRequest(
            "Leave request not found or already processed".into(),
        ));
    }

    tracing::info!(leave_id, %decision, decided_by = %auth.account_id, "Leave decided");

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Leave {decision}")
    })))
}

/// Approve a pending leave (HR)
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved successfully", body = Object, example = json!({
            "message": "Leave approved"
        })),
        (status = 400, description = "Leave request not found or already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    decide(auth, pool.get_ref(), path.into_inner(), LeaveStatus::Approved).await
}

/// Reject a pending leave (HR)
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected successfully", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 400, description = "Leave request not found or already processed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    decide(auth, pool.get_ref(), path.into_inner(), LeaveStatus::Rejected).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(from: (i32, u32, u32), to: (i32, u32, u32), leave_type: &str) -> CreateLeave {
        CreateLeave {
            from_date: NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            to_date: NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
            leave_type: leave_type.into(),
            reason: Some("  ".into()),
        }
    }

    #[test]
    fn single_day_leave_is_valid() {
        let p = payload((2024, 3, 10), (2024, 3, 10), "  Sick ");
        assert_eq!(p.validate().unwrap(), ("Sick", None));
    }

    #[test]
    fn inverted_span_is_rejected() {
        let p = payload((2024, 3, 12), (2024, 3, 10), "Sick");
        assert!(matches!(p.validate(), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn empty_or_huge_type_is_rejected() {
        assert!(payload((2024, 3, 10), (2024, 3, 11), "   ").validate().is_err());
        let long = "a".repeat(MAX_TYPE_LEN + 1);
        assert!(payload((2024, 3, 10), (2024, 3, 11), &long).validate().is_err());
    }

    #[test]
    fn page_defaults_and_bounds() {
        assert_eq!(
            Page::from_filter(None, None),
            Page { page: 1, per_page: DEFAULT_PER_PAGE }
        );
        assert_eq!(Page::from_filter(Some(0), Some(0)), Page { page: 1, per_page: 1 });
        assert_eq!(Page::from_filter(Some(3), Some(500)).per_page, MAX_PER_PAGE);
        assert_eq!(Page::from_filter(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn huge_page_number_saturates_offset() {
        let page = Page::from_filter(Some(u64::MAX), Some(100));
        assert_eq!(page.page, u64::MAX);
        assert_eq!(page.offset(), u64::MAX);
    }

    #[test]
    fn status_filter_parses_lowercase() {
        let filter: LeaveFilter =
            serde_json::from_str(r#"{"status":"approved","page":2}"#).unwrap();
        assert_eq!(filter.status, Some(LeaveStatus::Approved));
        assert_eq!(filter.page, Some(2));
        assert!(filter.employee_id.is_none());
    }
}
