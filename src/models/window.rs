use chrono::{Months, NaiveDate};
use serde::Serialize;
use crate::errors::ReportError;

/// Length of one sliding report window.
pub const WINDOW_MONTHS: u32 = 6;

/// Half-open date range `[start, end)` for one interval of a sliding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalWindow {
    /// 1-based position in the run; also names the output file.
    pub index: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl IntervalWindow {
    /// The `index`-th window of a run starting at `origin`.
    ///
    /// Bounds are computed from the origin rather than the previous window so
    /// that end-of-month clamping never accumulates.
    pub fn nth(origin: NaiveDate, index: u32) -> Result<Self, ReportError> {
        if index == 0 {
            return Err(ReportError::Config("interval index is 1-based".into()));
        }
        let start = add_months(origin, WINDOW_MONTHS * (index - 1))?;
        let end = add_months(origin, WINDOW_MONTHS * index)?;
        Ok(Self { index, start, end })
    }
}

impl std::fmt::Display for IntervalWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} [{}, {})", self.index, self.start, self.end)
    }
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, ReportError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| ReportError::Config(format!("date overflow adding {} months to {}", months, date)))
}

/// All `count` chained windows starting at `origin`.
pub fn sliding_windows(origin: NaiveDate, count: u32) -> Result<Vec<IntervalWindow>, ReportError> {
    if count == 0 {
        return Err(ReportError::Config("number of intervals must be at least 1".into()));
    }
    (1..=count).map(|i| IntervalWindow::nth(origin, i)).collect()
}
