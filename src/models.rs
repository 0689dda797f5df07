use serde::{Deserialize, Serialize};

/// Claims of the bearer tokens issued by the identity backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id at the identity backend
    pub sub: String,
    pub role: String,
    pub exp: usize,

    /// Present only if this account is linked to an employee record
    #[serde(default)]
    pub employee_id: Option<u64>,
}
