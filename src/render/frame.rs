use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{GanttError, GanttResult};
use crate::model::ActivityKind;

/// One resource row in viewport space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneRow {
    pub resource_id: String,
    pub name: String,
    pub y: f64,
    pub height: f64,
}

impl LaneRow {
    pub fn validate(&self) -> GanttResult<()> {
        ensure_finite(self.y, "lane row y")?;
        ensure_non_negative(self.height, "lane row height")
    }
}

/// One activity bar in viewport space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub activity_id: String,
    pub resource_id: String,
    pub kind: ActivityKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Completion percentage carried through for fill rendering.
    pub progress: Option<u8>,
    pub label: Option<String>,
    /// True while this bar shows an uncommitted drag proposal.
    pub dragging: bool,
}

impl BarGeometry {
    pub fn validate(&self) -> GanttResult<()> {
        ensure_finite(self.x, "bar x")?;
        ensure_finite(self.y, "bar y")?;
        ensure_non_negative(self.width, "bar width")?;
        ensure_non_negative(self.height, "bar height")
    }
}

/// Labeled axis tick in viewport space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    pub date: DateTime<Utc>,
    pub x: f64,
    pub label: String,
}

impl TickMark {
    pub fn validate(&self) -> GanttResult<()> {
        ensure_finite(self.x, "tick x")
    }
}

/// Vertical shading band in viewport space, spanning the lane area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeBand {
    pub x: f64,
    pub width: f64,
}

impl TimeBand {
    pub fn validate(self) -> GanttResult<()> {
        ensure_finite(self.x, "band x")?;
        ensure_non_negative(self.width, "band width")
    }
}

/// Milestone dot pinned to the axis in viewport space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerDot {
    pub marker_id: String,
    pub x: f64,
    /// Stacking row assigned by collision placement.
    pub lane: usize,
    pub label: Option<String>,
    pub emphasized: bool,
}

impl MarkerDot {
    pub fn validate(&self) -> GanttResult<()> {
        ensure_finite(self.x, "marker x")
    }
}

/// Backend-agnostic scene for one timeline draw pass.
///
/// Everything is in viewport space with the scroll offset already applied
/// and off-screen geometry culled, so backends only draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub viewport: Viewport,
    /// Full scrollable width in pixels, for host scrollbar sizing.
    pub content_width: f64,
    pub lane_rows: Vec<LaneRow>,
    pub bars: Vec<BarGeometry>,
    pub ticks: Vec<TickMark>,
    pub bands: Vec<TimeBand>,
    pub markers: Vec<MarkerDot>,
}

impl TimelineFrame {
    #[must_use]
    pub fn new(viewport: Viewport, content_width: f64) -> Self {
        Self {
            viewport,
            content_width,
            lane_rows: Vec::new(),
            bars: Vec::new(),
            ticks: Vec::new(),
            bands: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn validate(&self) -> GanttResult<()> {
        if !self.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        ensure_non_negative(self.content_width, "content width")?;

        for row in &self.lane_rows {
            row.validate()?;
        }
        for bar in &self.bars {
            bar.validate()?;
        }
        for tick in &self.ticks {
            tick.validate()?;
        }
        for band in &self.bands {
            band.validate()?;
        }
        for marker in &self.markers {
            marker.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lane_rows.is_empty()
            && self.bars.is_empty()
            && self.ticks.is_empty()
            && self.bands.is_empty()
            && self.markers.is_empty()
    }
}

fn ensure_finite(value: f64, what: &str) -> GanttResult<()> {
    if !value.is_finite() {
        return Err(GanttError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}

fn ensure_non_negative(value: f64, what: &str) -> GanttResult<()> {
    ensure_finite(value, what)?;
    if value < 0.0 {
        return Err(GanttError::InvalidData(format!(
            "{what} must be >= 0, got {value}"
        )));
    }
    Ok(())
}
