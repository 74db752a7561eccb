use chrono::Utc;
use tracing::debug;

use crate::core::{LaneLayout, TimeScale, range};
use crate::error::{GanttError, GanttResult};
use crate::extensions::PluginEvent;
use crate::interaction::GestureMachine;
use crate::render::Renderer;

use super::validation::{
    validate_frame_style, validate_scroll_offset, validate_zoom_factor, validate_zoom_limits,
};
use super::{GanttEngine, GanttEngineConfig};

impl<R: Renderer> GanttEngine<R> {
    /// Creates a fully initialized engine with an empty data snapshot.
    ///
    /// Fails fast on structurally invalid configuration; an out-of-bounds
    /// zoom factor is clamped rather than rejected.
    pub fn new(renderer: R, config: GanttEngineConfig) -> GanttResult<Self> {
        if !config.viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }
        let zoom_limits = validate_zoom_limits(config.zoom_limits)?;
        let zoom_factor = zoom_limits.clamp(validate_zoom_factor(config.zoom_factor)?);
        let frame_style = validate_frame_style(config.frame_style)?;
        let scroll_offset_px = validate_scroll_offset(config.scroll_offset_px)?;
        let gesture = GestureMachine::new(config.gesture_behavior)?;

        let range = match config.explicit_range {
            Some(range) => range,
            None => range::fallback_month_range(Utc::now().date_naive())?,
        };
        let scale = TimeScale::new(
            range,
            config.granularity,
            config.granularity.base_px_per_unit() * zoom_factor,
        )?;

        let mut engine = Self {
            renderer,
            viewport: config.viewport,
            unit: config.granularity,
            zoom_factor,
            zoom_limits,
            scroll_offset_px,
            show_non_working_periods: config.show_non_working_periods,
            read_only: config.read_only,
            range_tuning: config.range_tuning,
            explicit_range: config.explicit_range,
            frame_style,
            activities: Vec::new(),
            resources: Vec::new(),
            markers: Vec::new(),
            layout: LaneLayout::default(),
            scale,
            gesture,
            sink: None,
            plugins: Vec::new(),
        };
        engine.clamp_scroll();

        debug!(
            width = engine.viewport.width,
            height = engine.viewport.height,
            unit = ?engine.unit,
            zoom = engine.zoom_factor,
            "engine initialized"
        );
        Ok(engine)
    }

    /// Re-derives the visible range and scale, then re-clamps the scroll.
    ///
    /// The clock is touched only through the empty-data month fallback; with
    /// any valid activity present the result is a pure function of state.
    pub(super) fn refresh_scale(&mut self) -> GanttResult<()> {
        let previous_range = self.scale.range();
        let range = match self.explicit_range {
            Some(range) => range,
            None => range::compute_range(
                &self.activities,
                self.range_tuning,
                Utc::now().date_naive(),
            )?,
        };
        self.scale = TimeScale::new(range, self.unit, self.effective_px_per_unit())?;
        self.clamp_scroll();

        if range != previous_range {
            self.emit_plugin_event(PluginEvent::VisibleRangeChanged {
                start: range.start(),
                end: range.end(),
            });
        }
        Ok(())
    }

    pub(super) fn refresh_layout(&mut self) {
        self.layout = LaneLayout::build(&self.activities, &self.resources);
    }

    #[must_use]
    pub(super) fn effective_px_per_unit(&self) -> f64 {
        self.unit.base_px_per_unit() * self.zoom_factor
    }

    pub(super) fn clamp_scroll(&mut self) {
        let max_scroll = (self.scale.content_width() - f64::from(self.viewport.width)).max(0.0);
        self.scroll_offset_px = self.scroll_offset_px.clamp(0.0, max_scroll);
    }
}
