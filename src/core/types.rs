use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// View granularity of the timeline axis.
///
/// The unit controls tick spacing and the default column width. Positions are
/// always projected through a fixed day span per unit so the date/pixel
/// mapping stays linear even where calendar months vary in length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Day,
    Week,
    Month,
    Quarter,
}

impl TimeUnit {
    /// Unscaled column width in pixels at zoom factor 1.0.
    #[must_use]
    pub fn base_px_per_unit(self) -> f64 {
        match self {
            TimeUnit::Day => 24.0,
            TimeUnit::Week => 84.0,
            TimeUnit::Month => 90.0,
            TimeUnit::Quarter => 182.0,
        }
    }

    /// Fixed day span used for linear position projection.
    #[must_use]
    pub fn projection_days(self) -> i64 {
        match self {
            TimeUnit::Day => 1,
            TimeUnit::Week => 7,
            TimeUnit::Month => 30,
            TimeUnit::Quarter => 91,
        }
    }
}

/// Closed time interval between two UTC instants with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> GanttResult<Self> {
        if end <= start {
            return Err(GanttError::InvalidConfig(format!(
                "date range end must be after start: start={start}, end={end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, date: DateTime<Utc>) -> bool {
        date >= self.start && date <= self.end
    }
}
