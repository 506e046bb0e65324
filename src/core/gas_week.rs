use std::fmt::{Display, Formatter};

use chrono::{Datelike, Days, NaiveDate};

/// Operational weekly cycle used for nomination planning: Saturday through Friday.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[must_use]
pub struct GasWeek {
    start: NaiveDate,
}

impl GasWeek {
    /// Gas week the given date falls into, anchored on the most recent Saturday.
    pub fn containing(date: NaiveDate) -> Self {
        let days_after_saturday = (date.weekday().num_days_from_monday() + 2) % 7;
        Self { start: date - Days::new(u64::from(days_after_saturday)) }
    }

    pub const fn start(self) -> NaiveDate {
        self.start
    }

    pub fn end(self) -> NaiveDate {
        self.start + Days::new(6)
    }

    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(7)
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        (self.start..=self.end()).contains(&date)
    }
}

impl Display for GasWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end())
    }
}
