use tracing::{debug, trace};

use crate::core::{DateRange, RangeTuning, TimeUnit, Viewport};
use crate::error::{GanttError, GanttResult};
use crate::extensions::PluginEvent;
use crate::render::Renderer;

use super::validation::{validate_scroll_offset, validate_zoom_factor, validate_zoom_limits};
use super::{GanttEngine, ZoomLimits};

impl<R: Renderer> GanttEngine<R> {
    /// Switches the axis granularity and rebuilds the scale.
    pub fn set_granularity(&mut self, unit: TimeUnit) -> GanttResult<()> {
        if unit == self.unit {
            return Ok(());
        }
        debug!(from = ?self.unit, to = ?unit, "set granularity");
        self.unit = unit;
        self.refresh_scale()?;
        self.emit_plugin_event(PluginEvent::GranularityChanged { unit });
        Ok(())
    }

    /// Sets the zoom factor, clamped into the configured limits.
    ///
    /// Out-of-bounds requests clamp silently; only a non-finite or
    /// non-positive factor is an error.
    pub fn set_zoom(&mut self, factor: f64) -> GanttResult<()> {
        let clamped = self.zoom_limits.clamp(validate_zoom_factor(factor)?);
        if clamped != factor {
            trace!(requested = factor, clamped, "zoom factor clamped");
        }
        if clamped == self.zoom_factor {
            return Ok(());
        }
        self.zoom_factor = clamped;
        self.refresh_scale()?;
        self.emit_plugin_event(PluginEvent::ZoomChanged {
            zoom_factor: clamped,
        });
        Ok(())
    }

    /// Multiplies the current zoom factor, clamped into the limits.
    pub fn zoom_by(&mut self, multiplier: f64) -> GanttResult<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(GanttError::InvalidData(format!(
                "zoom multiplier must be finite and > 0, got {multiplier}"
            )));
        }
        self.set_zoom(self.zoom_factor * multiplier)
    }

    /// Replaces the zoom bounds and re-clamps the current factor into them.
    pub fn set_zoom_limits(&mut self, limits: ZoomLimits) -> GanttResult<()> {
        self.zoom_limits = validate_zoom_limits(limits)?;
        self.set_zoom(self.zoom_factor)
    }

    /// Sets the horizontal scroll offset, clamped to the scrollable span.
    pub fn set_scroll_offset_px(&mut self, offset_px: f64) -> GanttResult<()> {
        let requested = validate_scroll_offset(offset_px)?;
        let previous = self.scroll_offset_px;
        self.scroll_offset_px = requested;
        self.clamp_scroll();
        if self.scroll_offset_px != previous {
            self.emit_plugin_event(PluginEvent::ScrollChanged {
                scroll_offset_px: self.scroll_offset_px,
            });
        }
        Ok(())
    }

    /// Scrolls by a relative pixel delta, clamped to the scrollable span.
    pub fn scroll_by_px(&mut self, delta_px: f64) -> GanttResult<()> {
        if !delta_px.is_finite() {
            return Err(GanttError::InvalidData(
                "scroll delta must be finite".to_owned(),
            ));
        }
        self.set_scroll_offset_px(self.scroll_offset_px + delta_px)
    }

    /// Resizes the viewport and re-clamps the scroll against it.
    pub fn set_viewport(&mut self, viewport: Viewport) -> GanttResult<()> {
        if !viewport.is_valid() {
            return Err(GanttError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        debug!(width = viewport.width, height = viewport.height, "set viewport");
        self.viewport = viewport;
        self.clamp_scroll();
        Ok(())
    }

    /// Toggles read-only mode. Enabling it cancels any gesture in flight.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only && self.gesture.cancel() {
            debug!("read-only enabled mid-gesture, drag cancelled");
            self.emit_plugin_event(PluginEvent::GestureCancelled);
        }
    }

    pub fn set_show_non_working_periods(&mut self, show: bool) {
        self.show_non_working_periods = show;
    }

    /// Pins the visible range, overriding data-driven fitting.
    pub fn set_explicit_range(&mut self, range: DateRange) -> GanttResult<()> {
        self.explicit_range = Some(range);
        self.refresh_scale()
    }

    /// Returns to fitting the visible range from activity data.
    pub fn clear_explicit_range(&mut self) -> GanttResult<()> {
        self.explicit_range = None;
        self.refresh_scale()
    }

    /// Replaces the range fitting buffer.
    pub fn set_range_tuning(&mut self, tuning: RangeTuning) -> GanttResult<()> {
        self.range_tuning = tuning.validate()?;
        self.refresh_scale()
    }
}
