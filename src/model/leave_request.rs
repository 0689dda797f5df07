use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// A leave application covering `from_date..=to_date`.
///
/// `leave_type` is free text ("Casual Leave", "Work From Home (WFH)", ...);
/// dates are `YYYY-MM-DD` strings as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1000)]
    pub employee_id: u64,

    #[schema(example = "2024-03-10")]
    pub from_date: String,

    #[schema(example = "2024-03-12")]
    pub to_date: String,

    #[schema(example = "Casual Leave")]
    pub leave_type: String,

    #[schema(example = "pending")]
    pub status: String,

    #[schema(example = "Family function", nullable = true)]
    pub reason: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, Display, AsRefStr, Serialize, Deserialize, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveRequest {
    /// True when the type marks a work-from-home request ("wfh", any case).
    pub fn is_work_from_home(&self) -> bool {
        self.leave_type.to_ascii_lowercase().contains("wfh")
    }
}
