// Calendar month arithmetic
use chrono::{Datelike, NaiveDate};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month (1 = January)
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self::new(date.year(), date.month())
    }

    fn ordinal(self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self::new(ordinal.div_euclid(12) as i32, ordinal.rem_euclid(12) as u32 + 1)
    }

    /// Shift by a signed number of months
    pub fn offset(self, months: i64) -> Self {
        Self::from_ordinal(self.ordinal() + months)
    }

    /// Number of month boundaries from `self` to `other` (negative if `other` is earlier)
    pub fn months_until(self, other: MonthKey) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// Every month from `start` to `end`, both inclusive. Empty when `end < start`.
    pub fn range_inclusive(start: MonthKey, end: MonthKey) -> impl Iterator<Item = MonthKey> {
        (0..=start.months_until(end)).map(move |i| start.offset(i))
    }

    /// Display label, e.g. "Jan 2023"
    pub fn label(self) -> String {
        format!("{} {}", MONTH_ABBREVIATIONS[(self.month - 1) as usize], self.year)
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }
}
