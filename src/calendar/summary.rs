use serde::Serialize;
use utoipa::ToSchema;

use super::status::{DayStatus, ResolvedStatus};

/// Monthly totals over resolved day statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthSummary {
    #[schema(example = 31)]
    pub total_days: u32,
    #[schema(example = 18)]
    pub present: u32,
    #[schema(example = 1)]
    pub absent: u32,
    #[schema(example = 1)]
    pub half_day: u32,
    /// Days resolving to leave, work-from-home included
    #[schema(example = 3)]
    pub leave_days: u32,
    #[schema(example = 1)]
    pub work_from_home_days: u32,
    #[schema(example = 1)]
    pub holidays: u32,
    #[schema(example = 5)]
    pub sundays: u32,
}

impl MonthSummary {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a ResolvedStatus>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut acc, status| {
            acc.total_days += 1;
            match status.kind {
                DayStatus::Holiday => acc.holidays += 1,
                DayStatus::Sunday => acc.sundays += 1,
                DayStatus::Leave => acc.leave_days += 1,
                DayStatus::Wfh => {
                    acc.leave_days += 1;
                    acc.work_from_home_days += 1;
                }
                DayStatus::Absent => acc.absent += 1,
                DayStatus::HalfDay => acc.half_day += 1,
                DayStatus::Present => acc.present += 1,
                DayStatus::NoData => {}
            }
            acc
        })
    }
}
