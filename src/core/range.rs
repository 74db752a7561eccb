use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calendar;
use crate::core::types::DateRange;
use crate::error::{GanttError, GanttResult};
use crate::model::Activity;

/// Tuning for visible range fitting around activity extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTuning {
    /// Days of breathing room added before the earliest start and after the
    /// latest end.
    pub buffer_days: i64,
}

impl Default for RangeTuning {
    fn default() -> Self {
        Self { buffer_days: 7 }
    }
}

impl RangeTuning {
    pub(crate) fn validate(self) -> GanttResult<Self> {
        if self.buffer_days < 0 {
            return Err(GanttError::InvalidConfig(format!(
                "range buffer days must be >= 0, got {}",
                self.buffer_days
            )));
        }
        Ok(self)
    }
}

/// Derives the visible date window from activity extents.
///
/// The earliest start is floored to its day and the latest end is ceiled to
/// its day, then both are widened by the buffer. Activities with inverted
/// intervals never extend the window; when no valid interval exists at all
/// the window falls back to `today`'s calendar month.
///
/// Deterministic for a given `today`: the clock is an input, not a read.
pub fn compute_range(
    activities: &[Activity],
    tuning: RangeTuning,
    today: NaiveDate,
) -> GanttResult<DateRange> {
    let tuning = tuning.validate()?;

    let mut earliest: Option<DateTime<Utc>> = None;
    let mut latest: Option<DateTime<Utc>> = None;

    for activity in activities {
        if !activity.has_valid_interval() {
            continue;
        }
        earliest = Some(earliest.map_or(activity.start, |seen| seen.min(activity.start)));
        latest = Some(latest.map_or(activity.end, |seen| seen.max(activity.end)));
    }

    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return fallback_month_range(today);
    };

    let buffer = Duration::days(tuning.buffer_days);
    let start = calendar::floor_to_day(earliest) - buffer;
    let end = calendar::ceil_to_day(latest) + buffer;
    DateRange::new(start, end)
}

/// First through last day of `today`'s calendar month.
pub fn fallback_month_range(today: NaiveDate) -> GanttResult<DateRange> {
    let (first, last) = calendar::month_bounds(today);
    DateRange::new(day_start(first), day_start(last))
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
