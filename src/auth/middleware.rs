use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::model::role::Role;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

/// Verifies the bearer token and stores the resulting [`AuthUser`] in the
/// request extensions.
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let token = match bearer_token(&req) {
        Ok(t) => t,
        Err(message) => return Ok(unauthorized(req, json!({ "error": message }))),
    };

    let claims = match verify_token(&token, &config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected bearer token");
            return Ok(unauthorized(
                req,
                json!({"error": "Invalid or expired token", "details": e.to_string()}),
            ));
        }
    };

    let auth_user = AuthUser {
        account_id: claims.sub,
        role: Role::from_claim(&claims.role),
        employee_id: claims.employee_id,
    };

    req.extensions_mut().insert(auth_user);

    next.call(req).await
}

fn bearer_token(req: &ServiceRequest) -> Result<String, &'static str> {
    let header = req
        .headers()
        .get("Authorization")
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header encoding")?;

    header
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or("Authorization header must start with Bearer")
}

fn unauthorized(req: ServiceRequest, body: serde_json::Value) -> ServiceResponse<BoxBody> {
    req.into_response(HttpResponse::Unauthorized().json(body).map_into_boxed_body())
}
