use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{attendance::AttendanceRecord, leave_request::LeaveRequest};

use super::grid::DayCell;
use super::status::{ResolvedStatus, resolve};

/// Everything known about one selected day.
///
/// Unlike the grid cell this keeps every overlapping fact, not just the one
/// that wins the status priority.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DayDetail {
    #[schema(value_type = String, format = "date", example = "2024-03-12")]
    pub date: NaiveDate,
    #[schema(example = 12)]
    pub day: u32,
    pub is_sunday: bool,
    pub status: ResolvedStatus,
    #[schema(example = "Holi", nullable = true)]
    pub holiday_name: Option<String>,
    pub attendance: Option<AttendanceRecord>,
    pub leaves: Vec<LeaveRequest>,
}

impl DayDetail {
    /// `None` for padding cells.
    pub fn from_cell(cell: &DayCell) -> Option<Self> {
        let date = cell.date?;
        let day = cell.day?;
        let status = resolve(cell)?;

        Some(Self {
            date,
            day,
            is_sunday: cell.is_sunday,
            status,
            holiday_name: cell.holiday.as_ref().map(|h| h.name.clone()),
            attendance: cell.attendance.clone(),
            leaves: cell.leaves.clone(),
        })
    }
}
