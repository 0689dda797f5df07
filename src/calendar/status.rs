use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::model::attendance::AttendanceStatus;

use super::grid::DayCell;

/// Visual category of a calendar day, listed from highest priority down.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, EnumString, Display, AsRefStr, Serialize, ToSchema,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DayStatus {
    Holiday,
    Sunday,
    Leave,
    Wfh,
    Absent,
    HalfDay,
    Present,
    #[strum(serialize = "none")]
    #[serde(rename = "none")]
    NoData,
}

pub const SUNDAY_LABEL: &str = "Sunday";
pub const NO_DATA_LABEL: &str = "No data";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ResolvedStatus {
    pub kind: DayStatus,

    #[schema(example = "Casual Leave")]
    pub label: String,
}

impl ResolvedStatus {
    fn new(kind: DayStatus, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Reduces a cell's facts to one status. Padding cells resolve to nothing.
///
/// Order: holiday, Sunday, leave/wfh, absent, half-day, present, none.
pub fn resolve(cell: &DayCell) -> Option<ResolvedStatus> {
    if cell.is_blank() {
        return None;
    }

    if let Some(holiday) = &cell.holiday {
        return Some(ResolvedStatus::new(DayStatus::Holiday, holiday.name.as_str()));
    }

    if cell.is_sunday {
        return Some(ResolvedStatus::new(DayStatus::Sunday, SUNDAY_LABEL));
    }

    if !cell.leaves.is_empty() {
        let kind = if cell.leaves.iter().any(|l| l.is_work_from_home()) {
            DayStatus::Wfh
        } else {
            DayStatus::Leave
        };
        let label = cell
            .leaves
            .iter()
            .map(|l| l.leave_type.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Some(ResolvedStatus::new(kind, label));
    }

    let status = match cell.attendance.as_ref().map(|a| a.status_kind()) {
        Some(AttendanceStatus::Absent) => ResolvedStatus::new(DayStatus::Absent, "Absent"),
        Some(AttendanceStatus::HalfDay) => ResolvedStatus::new(DayStatus::HalfDay, "Half Day"),
        Some(AttendanceStatus::Present) => ResolvedStatus::new(DayStatus::Present, "Present"),
        _ => ResolvedStatus::new(DayStatus::NoData, NO_DATA_LABEL),
    };
    Some(status)
}
