//! Month calendar for one employee.
//!
//! Builds a 42-cell grid for a month, attaches attendance, leave and holiday
//! facts to each day and reduces every day to a single display status.
//! Everything here is a pure function of its inputs; callers rebuild a
//! [`MonthCalendar`] whenever the month or any input collection changes.

use chrono::{Datelike, NaiveDate};
use derive_more::{Display, Error};

use crate::model::{attendance::AttendanceRecord, holiday::Holiday, leave_request::LeaveRequest};

pub mod detail;
pub mod facts;
pub mod grid;
pub mod status;
pub mod summary;

pub use detail::DayDetail;
pub use grid::{DayCell, GRID_CELLS, MonthGrid};
pub use status::{DayStatus, ResolvedStatus};
pub use summary::MonthSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CalendarError {
    #[display(fmt = "invalid month {} of year {} (expected 0-11)", month, year)]
    InvalidMonth { year: i32, month: u32 },
}

/// A resolved month: grid plus attached facts.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCalendar {
    year: i32,
    month: u32,
    grid: MonthGrid,
}

impl MonthCalendar {
    /// `month` is 0-based.
    pub fn resolve(
        year: i32,
        month: u32,
        attendance: &[AttendanceRecord],
        leaves: &[LeaveRequest],
        holidays: &[Holiday],
    ) -> Result<Self, CalendarError> {
        let mut grid = MonthGrid::build(year, month)?;
        facts::attach(&mut grid, attendance, leaves, holidays);
        Ok(Self { year, month, grid })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    pub fn cells(&self) -> &[DayCell] {
        self.grid.cells()
    }

    /// One entry per grid cell, `None` for padding.
    pub fn statuses(&self) -> Vec<Option<ResolvedStatus>> {
        self.cells().iter().map(status::resolve).collect()
    }

    pub fn summary(&self) -> MonthSummary {
        let resolved: Vec<ResolvedStatus> = self.statuses().into_iter().flatten().collect();
        MonthSummary::tally(&resolved)
    }

    /// Detail for day number `day` (1-based) of this month.
    pub fn detail(&self, day: u32) -> Option<DayDetail> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month + 1, day)?;
        self.detail_for(date)
    }

    pub fn detail_for(&self, date: NaiveDate) -> Option<DayDetail> {
        let idx = self.grid.index_of(date)?;
        DayDetail::from_cell(&self.cells()[idx])
    }
}

/// 0-based month index of `date`, the form the month selector works in.
pub fn month_index(date: NaiveDate) -> u32 {
    date.month0()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendance(date: &str, status: &str) -> AttendanceRecord {
        AttendanceRecord {
            date: date.into(),
            status: status.into(),
            note: None,
        }
    }

    fn leave(id: u64, from: &str, to: &str, leave_type: &str, reason: Option<&str>) -> LeaveRequest {
        LeaveRequest {
            id,
            employee_id: 7,
            from_date: from.into(),
            to_date: to.into(),
            leave_type: leave_type.into(),
            status: "approved".into(),
            reason: reason.map(Into::into),
        }
    }

    fn holiday(date: &str, name: &str) -> Holiday {
        Holiday {
            id: 1,
            date: date.into(),
            name: name.into(),
        }
    }

    fn kinds(calendar: &MonthCalendar) -> Vec<(u32, DayStatus)> {
        calendar
            .cells()
            .iter()
            .zip(calendar.statuses())
            .filter_map(|(cell, status)| Some((cell.day?, status?.kind)))
            .collect()
    }

    #[test]
    fn empty_month_is_sundays_and_no_data() {
        let calendar = MonthCalendar::resolve(2024, 2, &[], &[], &[]).unwrap();
        let statuses = calendar.statuses();
        assert_eq!(statuses.len(), GRID_CELLS);

        for (cell, status) in calendar.cells().iter().zip(&statuses) {
            match (cell.is_blank(), status) {
                (true, None) => {}
                (false, Some(s)) if cell.is_sunday => assert_eq!(s.kind, DayStatus::Sunday),
                (false, Some(s)) => assert_eq!(s.kind, DayStatus::NoData),
                other => panic!("unexpected cell/status pair {other:?}"),
            }
        }

        let summary = calendar.summary();
        assert_eq!(summary.total_days, 31);
        assert_eq!(summary.sundays, 5);
        assert_eq!(summary.present + summary.absent + summary.leave_days, 0);
    }

    #[test]
    fn every_real_cell_gets_exactly_one_status() {
        let calendar = MonthCalendar::resolve(
            2024,
            2,
            &[attendance("2024-03-10", "absent"), attendance("2024-03-11", "absent")],
            &[leave(1, "2024-03-11", "2024-03-11", "Sick", None)],
            &[holiday("2024-03-10", "Founders Day")],
        )
        .unwrap();

        let real = calendar.cells().iter().filter(|c| !c.is_blank()).count();
        let resolved = calendar.statuses().into_iter().flatten().count();
        assert_eq!(real, resolved);

        let kinds = kinds(&calendar);
        assert!(kinds.contains(&(10, DayStatus::Holiday)));
        assert!(kinds.contains(&(11, DayStatus::Leave)));
    }

    #[test]
    fn present_count_uses_resolved_status_not_raw_records() {
        let calendar = MonthCalendar::resolve(
            2024,
            2,
            &[
                attendance("2024-03-04", "present"),
                attendance("2024-03-05", "present"),
                // Sunday
                attendance("2024-03-10", "present"),
                // holiday
                attendance("2024-03-25", "present"),
                // on leave
                attendance("2024-03-12", "present"),
            ],
            &[leave(1, "2024-03-12", "2024-03-12", "Casual Leave", None)],
            &[holiday("2024-03-25", "Holi")],
        )
        .unwrap();

        let summary = calendar.summary();
        let resolved_present = calendar
            .statuses()
            .into_iter()
            .flatten()
            .filter(|s| s.kind == DayStatus::Present)
            .count() as u32;
        assert_eq!(summary.present, resolved_present);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.leave_days, 1);
        assert_eq!(summary.holidays, 1);
    }

    #[test]
    fn leave_days_counted_once_even_when_leaves_overlap() {
        let calendar = MonthCalendar::resolve(
            2024,
            2,
            &[],
            &[
                leave(1, "2024-03-11", "2024-03-13", "Casual Leave", None),
                leave(2, "2024-03-12", "2024-03-14", "WFH", None),
            ],
            &[],
        )
        .unwrap();

        let summary = calendar.summary();
        assert_eq!(summary.leave_days, 4);
        assert_eq!(summary.work_from_home_days, 3);
    }

    #[test]
    fn detail_exposes_every_overlapping_fact() {
        let calendar = MonthCalendar::resolve(
            2024,
            2,
            &[AttendanceRecord {
                date: "2024-03-25".into(),
                status: "absent".into(),
                note: Some("Travelling".into()),
            }],
            &[
                leave(1, "2024-03-24", "2024-03-26", "Casual Leave", Some("Wedding")),
                leave(2, "2024-03-25", "2024-03-25", "WFH", None),
            ],
            &[holiday("2024-03-25", "Holi")],
        )
        .unwrap();

        let detail = calendar.detail(25).unwrap();
        assert_eq!(detail.status.kind, DayStatus::Holiday);
        assert_eq!(detail.holiday_name.as_deref(), Some("Holi"));
        assert_eq!(
            detail.attendance.as_ref().and_then(|a| a.note.as_deref()),
            Some("Travelling")
        );
        assert_eq!(detail.leaves.len(), 2);
        assert_eq!(detail.leaves[0].reason.as_deref(), Some("Wedding"));
        assert_eq!(detail.leaves[0].from_date, "2024-03-24");
        assert_eq!(detail.leaves[1].leave_type, "WFH");
    }

    #[test]
    fn unapproved_leave_still_resolves_to_leave() {
        let mut pending = leave(1, "2024-03-11", "2024-03-11", "Casual Leave", None);
        pending.status = "pending".into();
        let mut rejected = leave(2, "2024-03-12", "2024-03-12", "WFH", None);
        rejected.status = "rejected".into();

        let calendar = MonthCalendar::resolve(
            2024,
            2,
            &[attendance("2024-03-11", "absent")],
            &[pending, rejected],
            &[],
        )
        .unwrap();

        let kinds = kinds(&calendar);
        assert!(kinds.contains(&(11, DayStatus::Leave)));
        assert!(kinds.contains(&(12, DayStatus::Wfh)));
        assert_eq!(calendar.summary().leave_days, 2);
    }

    #[test]
    fn detail_outside_the_month_is_none() {
        let calendar = MonthCalendar::resolve(2024, 1, &[], &[], &[]).unwrap();
        assert!(calendar.detail(30).is_none());
        assert!(calendar.detail(0).is_none());
        assert!(
            calendar
                .detail_for(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
                .is_none()
        );
        assert_eq!(calendar.detail(29).map(|d| d.day), Some(29));
    }

    #[test]
    fn invalid_month_is_an_error() {
        let err = MonthCalendar::resolve(2024, 12, &[], &[], &[]).unwrap_err();
        assert_eq!(err, CalendarError::InvalidMonth { year: 2024, month: 12 });
        assert_eq!(err.to_string(), "invalid month 12 of year 2024 (expected 0-11)");
    }

    #[test]
    fn month_index_is_zero_based() {
        assert_eq!(month_index(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()), 0);
        assert_eq!(month_index(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()), 11);
    }
}
