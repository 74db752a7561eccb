use serde::{Deserialize, Serialize};

use crate::core::{DateRange, RangeTuning, TimeUnit, Viewport};
use crate::error::{GanttError, GanttResult};
use crate::interaction::GestureBehavior;

use super::{FrameStyle, ZoomLimits};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GanttEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_granularity")]
    pub granularity: TimeUnit,
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    #[serde(default)]
    pub zoom_limits: ZoomLimits,
    #[serde(default)]
    pub scroll_offset_px: f64,
    #[serde(default = "default_true")]
    pub show_non_working_periods: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub range_tuning: RangeTuning,
    #[serde(default)]
    pub gesture_behavior: GestureBehavior,
    #[serde(default)]
    pub frame_style: FrameStyle,
    /// Fixed visible range; skips fitting the range to activity data.
    #[serde(default)]
    pub explicit_range: Option<DateRange>,
}

impl GanttEngineConfig {
    /// Creates a config with default view behavior for the given viewport.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            granularity: default_granularity(),
            zoom_factor: default_zoom_factor(),
            zoom_limits: ZoomLimits::default(),
            scroll_offset_px: 0.0,
            show_non_working_periods: true,
            read_only: false,
            range_tuning: RangeTuning::default(),
            gesture_behavior: GestureBehavior::default(),
            frame_style: FrameStyle::default(),
            explicit_range: None,
        }
    }

    /// Sets the initial axis granularity.
    #[must_use]
    pub fn with_granularity(mut self, granularity: TimeUnit) -> Self {
        self.granularity = granularity;
        self
    }

    /// Sets the initial zoom factor; the engine clamps it into the limits.
    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    /// Sets the zoom clamp bounds.
    #[must_use]
    pub fn with_zoom_limits(mut self, limits: ZoomLimits) -> Self {
        self.zoom_limits = limits;
        self
    }

    /// Sets the initial horizontal scroll offset.
    #[must_use]
    pub fn with_scroll_offset_px(mut self, scroll_offset_px: f64) -> Self {
        self.scroll_offset_px = scroll_offset_px;
        self
    }

    /// Toggles weekend shading bands.
    #[must_use]
    pub fn with_show_non_working_periods(mut self, show: bool) -> Self {
        self.show_non_working_periods = show;
        self
    }

    /// Starts the engine in read-only mode, refusing drag gestures.
    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Sets the range fitting buffer.
    #[must_use]
    pub fn with_range_tuning(mut self, tuning: RangeTuning) -> Self {
        self.range_tuning = tuning;
        self
    }

    /// Sets gesture handle width and minimum drag duration.
    #[must_use]
    pub fn with_gesture_behavior(mut self, behavior: GestureBehavior) -> Self {
        self.gesture_behavior = behavior;
        self
    }

    /// Sets frame pixel metrics.
    #[must_use]
    pub fn with_frame_style(mut self, style: FrameStyle) -> Self {
        self.frame_style = style;
        self
    }

    /// Pins the visible range instead of fitting it to activity data.
    #[must_use]
    pub fn with_explicit_range(mut self, range: DateRange) -> Self {
        self.explicit_range = Some(range);
        self
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> GanttResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_granularity() -> TimeUnit {
    TimeUnit::Week
}

fn default_zoom_factor() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}
