use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{attendance::AttendanceRecord, holiday::Holiday, leave_request::LeaveRequest};

use super::grid::{DATE_FORMAT, MonthGrid};

/// Attaches holidays, attendance and leave spans to the real cells of `grid`.
///
/// Records whose dates do not parse never attach. For holidays and
/// attendance the last record seen for a date wins.
pub fn attach(
    grid: &mut MonthGrid,
    attendance: &[AttendanceRecord],
    leaves: &[LeaveRequest],
    holidays: &[Holiday],
) {
    let holidays_by_date: HashMap<&str, &Holiday> =
        holidays.iter().map(|h| (h.date.as_str(), h)).collect();
    let attendance_by_date: HashMap<&str, &AttendanceRecord> =
        attendance.iter().map(|a| (a.date.as_str(), a)).collect();

    for cell in grid.cells.iter_mut() {
        let Some(key) = cell.date_key() else {
            continue;
        };
        cell.holiday = holidays_by_date.get(key.as_str()).map(|h| (*h).clone());
        cell.attendance = attendance_by_date.get(key.as_str()).map(|a| (*a).clone());
    }

    for leave in leaves {
        let Some((from, to)) = leave_span(leave) else {
            tracing::debug!(leave_id = leave.id, "Skipping leave with unusable date span");
            continue;
        };

        let start = from.max(grid.first_day());
        let end = to.min(grid.last_day());
        for date in start.iter_days().take_while(|d| *d <= end) {
            if let Some(cell) = grid.cell_mut(date) {
                cell.leaves.push(leave.clone());
            }
        }
    }
}

/// Inclusive span of a leave, `None` if either bound is malformed or the
/// span is inverted.
pub fn leave_span(leave: &LeaveRequest) -> Option<(NaiveDate, NaiveDate)> {
    let from = parse_date(&leave.from_date)?;
    let to = parse_date(&leave.to_date)?;
    (from <= to).then_some((from, to))
}

/// Strict `YYYY-MM-DD`; unpadded forms like `2024-3-1` are rejected so a
/// leave matches exactly the strings attendance and holidays match on.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|d| d.format(DATE_FORMAT).to_string() == raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::grid::DayCell;

    fn leave(id: u64, from: &str, to: &str, leave_type: &str) -> LeaveRequest {
        LeaveRequest {
            id,
            employee_id: 7,
            from_date: from.into(),
            to_date: to.into(),
            leave_type: leave_type.into(),
            status: "approved".into(),
            reason: None,
        }
    }

    fn attendance(date: &str, status: &str, note: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            date: date.into(),
            status: status.into(),
            note: note.map(Into::into),
        }
    }

    fn holiday(date: &str, name: &str) -> Holiday {
        Holiday {
            id: 1,
            date: date.into(),
            name: name.into(),
        }
    }

    fn cell<'a>(grid: &'a MonthGrid, date: &str) -> &'a DayCell {
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap();
        &grid.cells()[grid.index_of(date).unwrap()]
    }

    fn dates_with_leave(grid: &MonthGrid) -> Vec<String> {
        grid.cells()
            .iter()
            .filter(|c| !c.leaves.is_empty())
            .filter_map(DayCell::date_key)
            .collect()
    }

    #[test]
    fn leave_attaches_to_each_day_of_its_span_only() {
        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(
            &mut grid,
            &[],
            &[leave(1, "2024-03-10", "2024-03-12", "Casual Leave")],
            &[],
        );
        assert_eq!(
            dates_with_leave(&grid),
            vec!["2024-03-10", "2024-03-11", "2024-03-12"]
        );
    }

    #[test]
    fn leave_crossing_month_boundary_is_clipped() {
        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(
            &mut grid,
            &[],
            &[
                leave(1, "2024-02-27", "2024-03-02", "Sick"),
                leave(2, "2024-03-30", "2024-04-03", "Annual"),
            ],
            &[],
        );
        assert_eq!(
            dates_with_leave(&grid),
            vec!["2024-03-01", "2024-03-02", "2024-03-30", "2024-03-31"]
        );
    }

    #[test]
    fn pending_and_rejected_leaves_attach_too() {
        let mut pending = leave(1, "2024-03-11", "2024-03-11", "Casual Leave");
        pending.status = "pending".into();
        let mut rejected = leave(2, "2024-03-13", "2024-03-13", "Sick");
        rejected.status = "rejected".into();

        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(&mut grid, &[], &[pending, rejected], &[]);

        assert_eq!(dates_with_leave(&grid), vec!["2024-03-11", "2024-03-13"]);
        assert_eq!(cell(&grid, "2024-03-11").leaves[0].status, "pending");
        assert_eq!(cell(&grid, "2024-03-13").leaves[0].status, "rejected");
    }

    #[test]
    fn leave_outside_month_attaches_nowhere() {
        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(&mut grid, &[], &[leave(1, "2024-04-01", "2024-04-05", "Sick")], &[]);
        assert!(dates_with_leave(&grid).is_empty());
    }

    #[test]
    fn overlapping_leaves_accumulate_in_input_order() {
        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(
            &mut grid,
            &[],
            &[
                leave(1, "2024-03-10", "2024-03-12", "Casual Leave"),
                leave(2, "2024-03-12", "2024-03-12", "WFH"),
            ],
            &[],
        );
        let ids: Vec<u64> = cell(&grid, "2024-03-12").leaves.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(cell(&grid, "2024-03-11").leaves.len(), 1);
    }

    #[test]
    fn malformed_or_inverted_spans_are_ignored() {
        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(
            &mut grid,
            &[],
            &[
                leave(1, "", "2024-03-12", "Sick"),
                leave(2, "2024-03-10", "12/03/2024", "Sick"),
                leave(3, "2024-03-12", "2024-03-10", "Sick"),
                leave(4, "2024-3-10", "2024-03-12", "Sick"),
            ],
            &[],
        );
        assert!(dates_with_leave(&grid).is_empty());
    }

    #[test]
    fn attendance_and_holiday_match_exact_date_strings() {
        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(
            &mut grid,
            &[
                attendance("2024-03-11", "present", None),
                attendance("2024-3-12", "absent", None),
                attendance("garbage", "absent", None),
            ],
            &[],
            &[holiday("2024-03-25", "Holi"), holiday("", "Nameless")],
        );
        assert_eq!(
            cell(&grid, "2024-03-11").attendance.as_ref().map(|a| a.status.as_str()),
            Some("present")
        );
        assert!(cell(&grid, "2024-03-12").attendance.is_none());
        assert_eq!(
            cell(&grid, "2024-03-25").holiday.as_ref().map(|h| h.name.as_str()),
            Some("Holi")
        );
        let attached = grid.cells().iter().filter(|c| c.holiday.is_some()).count();
        assert_eq!(attached, 1);
    }

    #[test]
    fn duplicate_attendance_last_one_wins() {
        let mut grid = MonthGrid::build(2024, 2).unwrap();
        attach(
            &mut grid,
            &[
                attendance("2024-03-11", "absent", Some("first")),
                attendance("2024-03-11", "present", Some("second")),
            ],
            &[],
            &[],
        );
        let record = cell(&grid, "2024-03-11").attendance.clone().unwrap();
        assert_eq!(record.status, "present");
        assert_eq!(record.note.as_deref(), Some("second"));
    }

    #[test]
    fn blank_cells_never_receive_facts() {
        let mut grid = MonthGrid::build(2024, 4).unwrap();
        attach(
            &mut grid,
            &[attendance("2024-05-01", "present", None)],
            &[leave(1, "2024-04-20", "2024-06-10", "Sick")],
            &[holiday("2024-05-01", "May Day")],
        );
        for blank in grid.cells().iter().filter(|c| c.is_blank()) {
            assert!(blank.attendance.is_none());
            assert!(blank.holiday.is_none());
            assert!(blank.leaves.is_empty());
        }
        assert_eq!(dates_with_leave(&grid).len(), 31);
    }
}
