use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// One attendance entry per employee per calendar day.
///
/// `date` is kept as the `YYYY-MM-DD` string the store hands out so the
/// calendar can match it verbatim; a malformed value simply never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "2024-03-11")]
    pub date: String,

    #[schema(example = "present")]
    pub status: String,

    #[schema(example = "Left early for a client visit", nullable = true)]
    pub note: Option<String>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, Display, AsRefStr, Serialize, Deserialize, ToSchema)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    HalfDay,
    WorkFromHome,
    Other,
}

impl AttendanceRecord {
    /// Parsed status; anything outside the known set is `Other`.
    pub fn status_kind(&self) -> AttendanceStatus {
        self.status
            .parse()
            .unwrap_or(AttendanceStatus::Other)
    }
}
