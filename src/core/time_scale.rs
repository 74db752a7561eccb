use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::calendar;
use crate::core::types::{DateRange, TimeUnit};
use crate::error::{GanttError, GanttResult};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Bidirectional mapping between UTC dates and horizontal pixel positions.
///
/// The mapping is linear: a date is projected through the unit's fixed day
/// span (`TimeUnit::projection_days`), so equal time deltas always produce
/// equal pixel deltas regardless of where they fall in the calendar. Tick
/// generation is the one calendar-aware part: month and quarter ticks step
/// by true calendar months from the range start, so their pixel spacing
/// varies with month length while the projection itself stays linear.
///
/// Positions are relative to the range start in content space. Dates before
/// the range start map to negative positions; nothing clamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    range: DateRange,
    unit: TimeUnit,
    px_per_unit: f64,
}

impl TimeScale {
    pub fn new(range: DateRange, unit: TimeUnit, px_per_unit: f64) -> GanttResult<Self> {
        Ok(Self {
            range,
            unit,
            px_per_unit: validate_px_per_unit(px_per_unit)?,
        })
    }

    #[must_use]
    pub fn range(self) -> DateRange {
        self.range
    }

    #[must_use]
    pub fn unit(self) -> TimeUnit {
        self.unit
    }

    #[must_use]
    pub fn px_per_unit(self) -> f64 {
        self.px_per_unit
    }

    /// Pixel width of one 24-hour day under the current unit and zoom.
    #[must_use]
    pub fn px_per_day(self) -> f64 {
        self.px_per_unit / self.unit.projection_days() as f64
    }

    /// Projects a date onto the horizontal axis in content-space pixels.
    #[must_use]
    pub fn date_to_position(self, date: DateTime<Utc>) -> f64 {
        let elapsed_seconds = (date - self.range.start()).num_seconds() as f64;
        elapsed_seconds / self.unit_seconds() * self.px_per_unit
    }

    /// Inverts a content-space position back to a date, rounded to the
    /// nearest whole day.
    ///
    /// Rounding makes the inverse lossy above day precision on purpose:
    /// every date handed back to a host is a clean midnight boundary.
    pub fn position_to_date(self, position: f64) -> GanttResult<DateTime<Utc>> {
        if !position.is_finite() {
            return Err(GanttError::InvalidData(
                "position must be finite".to_owned(),
            ));
        }

        let offset_seconds = position / self.px_per_unit * self.unit_seconds();
        let offset = Duration::try_seconds(offset_seconds.round() as i64)
            .ok_or_else(|| out_of_range(position))?;
        let raw = self
            .range
            .start()
            .checked_add_signed(offset)
            .ok_or_else(|| out_of_range(position))?;
        Ok(calendar::round_to_day(raw))
    }

    /// Calendar-aware tick instants across the whole range.
    #[must_use]
    pub fn ticks(self) -> Vec<DateTime<Utc>> {
        calendar::tick_dates(self.range, self.unit).collect()
    }

    /// Total content width in pixels, i.e. the position of the range end.
    #[must_use]
    pub fn content_width(self) -> f64 {
        self.date_to_position(self.range.end())
    }

    fn unit_seconds(self) -> f64 {
        self.unit.projection_days() as f64 * SECONDS_PER_DAY
    }
}

fn validate_px_per_unit(px_per_unit: f64) -> GanttResult<f64> {
    if !px_per_unit.is_finite() || px_per_unit <= 0.0 {
        return Err(GanttError::InvalidConfig(format!(
            "pixels per unit must be finite and > 0, got {px_per_unit}"
        )));
    }
    Ok(px_per_unit)
}

fn out_of_range(position: f64) -> GanttError {
    GanttError::InvalidData(format!(
        "position {position} maps outside the representable date range"
    ))
}
