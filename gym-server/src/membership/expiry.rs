use chrono::{Days, NaiveDate};

/// `join_date` advanced by `duration_days` calendar days.
///
/// Pure date arithmetic: month/year boundaries and leap days are handled by
/// the calendar, and there is no time-of-day for DST to shift. Saturates at
/// [`NaiveDate::MAX`].
pub fn compute_expiry(join_date: NaiveDate, duration_days: u32) -> NaiveDate {
    join_date
        .checked_add_days(Days::new(u64::from(duration_days)))
        .unwrap_or(NaiveDate::MAX)
}
