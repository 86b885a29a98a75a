use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar days.
///
/// Both ends are part of the range, so a range whose `from` equals its `to`
/// covers exactly one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Creates a range, or `None` if `from` is after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    /// A range covering a single day.
    pub fn single(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Number of days in the range (always at least one).
    pub fn len(&self) -> usize {
        // from <= to is guaranteed by construction
        (self.to - self.from).num_days() as usize + 1
    }

    /// Never true; a range always holds at least one day.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `day` falls within the range.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Iterates every day in the range in chronological order.
    pub fn days(&self) -> Days {
        Days {
            next: Some(self.from),
            last: self.to,
        }
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = Days;

    fn into_iter(self) -> Days {
        self.days()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

/// Iterator over the days of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.last {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }
}
