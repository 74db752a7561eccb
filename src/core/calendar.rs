//! Pure calendar arithmetic shared by the scale, range, and gesture layers.
//!
//! Every helper takes values and returns values; nothing in here mutates a
//! date in place or reads the clock.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};

use crate::core::types::{DateRange, TimeUnit};

/// Advances `date` by `n` whole units using calendar arithmetic.
///
/// Day and week steps are exact multiples of 24 hours. Month and quarter
/// steps move by calendar months, clamping the day-of-month when the target
/// month is shorter (Jan 31 + 1 month lands on the last day of February).
#[must_use]
pub fn add_units(date: DateTime<Utc>, n: i32, unit: TimeUnit) -> DateTime<Utc> {
    match unit {
        TimeUnit::Day => date + Duration::days(i64::from(n)),
        TimeUnit::Week => date + Duration::weeks(i64::from(n)),
        TimeUnit::Month => add_months(date, n),
        TimeUnit::Quarter => add_months(date, n.saturating_mul(3)),
    }
}

fn add_months(date: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let stepped = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    // Only unreachable calendar overflow returns None; keep the input then.
    stepped.unwrap_or(date)
}

/// Truncates to the preceding midnight.
#[must_use]
pub fn floor_to_day(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Rounds to the nearest midnight; exactly noon rounds forward.
#[must_use]
pub fn round_to_day(date: DateTime<Utc>) -> DateTime<Utc> {
    let day_start = floor_to_day(date);
    if date - day_start >= Duration::hours(12) {
        day_start + Duration::days(1)
    } else {
        day_start
    }
}

/// Advances to the following midnight unless already on one.
#[must_use]
pub fn ceil_to_day(date: DateTime<Utc>) -> DateTime<Utc> {
    let day_start = floor_to_day(date);
    if date == day_start {
        day_start
    } else {
        day_start + Duration::days(1)
    }
}

/// First and last day of the calendar month containing `day`.
#[must_use]
pub fn month_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = day.with_day(1).unwrap_or(day);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.pred_opt())
        .unwrap_or(day);
    (first, last)
}

#[must_use]
pub fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Tick instants covering `range` at `unit` spacing.
///
/// The first tick lands exactly on the range start; later ticks step by one
/// calendar unit each until the range end is passed. The iterator is finite
/// and yields at least one instant for any valid range.
pub fn tick_dates(range: DateRange, unit: TimeUnit) -> impl Iterator<Item = DateTime<Utc>> {
    let end = range.end();
    let mut pending = Some(range.start());
    std::iter::from_fn(move || {
        let current = pending?;
        if current > end {
            pending = None;
            return None;
        }
        let stepped = add_units(current, 1, unit);
        // A step that fails to advance would loop forever; stop instead.
        pending = (stepped > current).then_some(stepped);
        Some(current)
    })
}
