use crate::{error::ApiError, model::role::Role};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

/// The signed-in account, placed in request extensions by `auth_middleware`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: String,
    pub role: Role,

    /// Present only if this account is linked to an employee record
    pub employee_id: Option<u64>,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Not authenticated")),
        )
    }
}

impl AuthUser {
    pub fn require_hr(&self) -> Result<(), ApiError> {
        if self.role.can_approve() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("HR only".into()))
        }
    }

    /// The caller's own employee id.
    pub fn own_employee_id(&self) -> Result<u64, ApiError> {
        self.employee_id
            .ok_or_else(|| ApiError::Forbidden("No employee profile".into()))
    }

    /// Whose records a request may read: HR may name anyone, everybody else
    /// only themselves.
    pub fn employee_scope(&self, requested: Option<u64>) -> Result<u64, ApiError> {
        match requested {
            Some(id) if self.role.can_approve() => Ok(id),
            Some(id) if Some(id) == self.employee_id => Ok(id),
            Some(_) => Err(ApiError::Forbidden("Cannot view another employee".into())),
            None => self.own_employee_id(),
        }
    }
}
