use chrono::{Datelike, Months, NaiveDate};

/// Adds whole calendar months to a date, rolling over year boundaries.
///
/// Days past the end of the target month are clamped to its last day
/// (January 31 plus one month is the last day of February).
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Calendar `(year, month)` bucket of a date, month is 1-based.
pub fn month_bucket(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Months of `year` that are not in the future relative to `today`.
pub fn elapsed_months(year: i32, today: NaiveDate) -> Vec<u32> {
    match year.cmp(&today.year()) {
        std::cmp::Ordering::Less => (1..=12).collect(),
        std::cmp::Ordering::Equal => (1..=today.month()).collect(),
        std::cmp::Ordering::Greater => Vec::new(),
    }
}
