use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{attendance::AttendanceRecord, holiday::Holiday, leave_request::LeaveRequest};

use super::CalendarError;

/// Six full weeks, whatever the month length.
pub const GRID_CELLS: usize = 42;

/// `YYYY-MM-DD`, the form dates take in every input collection.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One grid position: either a padding cell or a real day with its facts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DayCell {
    #[schema(example = 11, nullable = true)]
    pub day: Option<u32>,

    #[schema(value_type = Option<String>, format = "date", example = "2024-03-11")]
    pub date: Option<NaiveDate>,

    pub is_sunday: bool,
    pub attendance: Option<AttendanceRecord>,
    pub leaves: Vec<LeaveRequest>,
    pub holiday: Option<Holiday>,
}

impl DayCell {
    fn blank() -> Self {
        Self::default()
    }

    fn for_date(date: NaiveDate) -> Self {
        Self {
            day: Some(date.day()),
            date: Some(date),
            is_sunday: date.weekday() == Weekday::Sun,
            ..Self::default()
        }
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }

    /// The cell's date in store format, `None` for padding.
    pub fn date_key(&self) -> Option<String> {
        self.date.map(|d| d.format(DATE_FORMAT).to_string())
    }
}

/// A displayed month padded to 42 cells, Sunday in column 0.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    first: NaiveDate,
    last: NaiveDate,
    leading: usize,
    pub(crate) cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Builds the grid for `year` and a 0-based `month` (0 = January).
    pub fn build(year: i32, month: u32) -> Result<Self, CalendarError> {
        let (first, last) = month_bounds(year, month)?;
        let leading = first.weekday().num_days_from_sunday() as usize;

        let mut cells = Vec::with_capacity(GRID_CELLS);
        cells.extend((0..leading).map(|_| DayCell::blank()));
        cells.extend(first.iter_days().take_while(|d| *d <= last).map(DayCell::for_date));
        cells.resize_with(GRID_CELLS, DayCell::blank);

        Ok(Self {
            first,
            last,
            leading,
            cells,
        })
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn leading_blanks(&self) -> usize {
        self.leading
    }

    pub fn days_in_month(&self) -> u32 {
        self.last.day()
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }

    /// Index of the cell holding `date`, if it belongs to this month.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.contains(date)
            .then(|| self.leading + date.day0() as usize)
    }

    pub(crate) fn cell_mut(&mut self, date: NaiveDate) -> Option<&mut DayCell> {
        let idx = self.index_of(date)?;
        self.cells.get_mut(idx)
    }
}

/// First and last day of a 0-based month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), CalendarError> {
    let invalid = || CalendarError::InvalidMonth { year, month };
    if month > 11 {
        return Err(invalid());
    }

    let first = NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or_else(invalid)?;
    let next_first = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    let last = next_first
        .and_then(|d| d.pred_opt())
        .ok_or_else(invalid)?;

    Ok((first, last))
}
