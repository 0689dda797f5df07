use crate::auth::auth::AuthUser;
use crate::error::{ApiError, ApiResult, is_duplicate_key};
use crate::model::holiday::Holiday;
use crate::store::{self, holiday::HolidayCache};
use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

const MAX_NAME_LEN: usize = 100;

#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct HolidayQuery {
    /// Defaults to the current year
    #[schema(example = 2024)]
    pub year: Option<i32>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2024-03-25", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[schema(example = "Holi")]
    pub name: String,
}

impl CreateHoliday {
    fn validated_name(&self) -> Result<&str, ApiError> {
        let name = self.name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            return Err(ApiError::BadRequest(format!(
                "name must be 1-{MAX_NAME_LEN} characters"
            )));
        }
        Ok(name)
    }
}

/// Holidays of a year
#[utoipa::path(
    get,
    path = "/api/holiday",
    params(HolidayQuery),
    responses(
        (status = 200, description = "Holidays ordered by date", body = [Holiday]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Holiday"
)]
pub async fn list_holidays(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    cache: web::Data<HolidayCache>,
    query: web::Query<HolidayQuery>,
) -> ApiResult<HttpResponse> {
    let year = query.year.unwrap_or_else(|| Local::now().year());

    let holidays = store::holiday::for_year(pool.get_ref(), cache.get_ref(), year)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, year, "Failed to load holidays");
            ApiError::Internal
        })?;

    Ok(HttpResponse::Ok().json(holidays.as_slice()))
}

/// Add a holiday (HR)
#[utoipa::path(
    post,
    path = "/api/holiday",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created", body = Object, example = json!({
            "message": "Holiday created",
            "id": 4
        })),
        (status = 400, description = "Invalid name"),
        (status = 409, description = "A holiday already exists on that date"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Holiday"
)]
pub async fn create_holiday(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    cache: web::Data<HolidayCache>,
    payload: web::Json<CreateHoliday>,
) -> ApiResult<HttpResponse> {
    auth.require_hr()?;
    let name = payload.validated_name()?;

    let id = match store::holiday::insert(pool.get_ref(), payload.date, name).await {
        Ok(id) => id,
        Err(e) if is_duplicate_key(&e) => {
            return Err(ApiError::Conflict(
                "A holiday already exists on that date".into(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    cache.invalidate(payload.date.year()).await;
    tracing::info!(holiday_id = id, date = %payload.date, "Holiday created");

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Holiday created",
        "id": id
    })))
}
