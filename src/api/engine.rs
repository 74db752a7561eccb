use tracing::trace;

use crate::core::{DateRange, LaneLayout, LayoutWarning, RangeTuning, TimeScale, TimeUnit, Viewport};
use crate::error::{GanttError, GanttResult};
use crate::extensions::{GanttPlugin, PluginContext, PluginEvent, TimelineMarker};
use crate::interaction::{DragProposal, GestureMachine, GestureState};
use crate::model::{Activity, Resource};
use crate::render::Renderer;

use super::{FrameStyle, RescheduleSink, ZoomLimits};

/// Main orchestration facade consumed by host applications.
///
/// `GanttEngine` coordinates the time scale, lane layout, gesture machine,
/// reschedule sink, and renderer calls. Data enters as immutable snapshots;
/// derived state (range, scale, lanes) is rebuilt on every relevant change.
pub struct GanttEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport: Viewport,
    pub(super) unit: TimeUnit,
    pub(super) zoom_factor: f64,
    pub(super) zoom_limits: ZoomLimits,
    pub(super) scroll_offset_px: f64,
    pub(super) show_non_working_periods: bool,
    pub(super) read_only: bool,
    pub(super) range_tuning: RangeTuning,
    pub(super) explicit_range: Option<DateRange>,
    pub(super) frame_style: FrameStyle,
    pub(super) activities: Vec<Activity>,
    pub(super) resources: Vec<Resource>,
    pub(super) markers: Vec<TimelineMarker>,
    pub(super) layout: LaneLayout,
    pub(super) scale: TimeScale,
    pub(super) gesture: GestureMachine,
    pub(super) sink: Option<Box<dyn RescheduleSink>>,
    pub(super) plugins: Vec<Box<dyn GanttPlugin>>,
}

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn granularity(&self) -> TimeUnit {
        self.unit
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    #[must_use]
    pub fn zoom_limits(&self) -> ZoomLimits {
        self.zoom_limits
    }

    #[must_use]
    pub fn scroll_offset_px(&self) -> f64 {
        self.scroll_offset_px
    }

    #[must_use]
    pub fn show_non_working_periods(&self) -> bool {
        self.show_non_working_periods
    }

    #[must_use]
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn frame_style(&self) -> FrameStyle {
        self.frame_style
    }

    #[must_use]
    pub fn scale(&self) -> TimeScale {
        self.scale
    }

    #[must_use]
    pub fn visible_range(&self) -> DateRange {
        self.scale.range()
    }

    #[must_use]
    pub fn content_width(&self) -> f64 {
        self.scale.content_width()
    }

    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[must_use]
    pub fn markers(&self) -> &[TimelineMarker] {
        &self.markers
    }

    #[must_use]
    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    /// Activities excluded from the current layout, with the reason for each.
    #[must_use]
    pub fn layout_warnings(&self) -> &[LayoutWarning] {
        self.layout.warnings()
    }

    #[must_use]
    pub fn gesture_state(&self) -> &GestureState {
        self.gesture.state()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Interval currently proposed by an in-flight drag, if any.
    #[must_use]
    pub fn drag_proposal(&self) -> Option<DragProposal> {
        self.gesture.proposal()
    }

    /// Installs the receiver for completed reschedule gestures.
    pub fn set_reschedule_sink(&mut self, sink: Box<dyn RescheduleSink>) {
        self.sink = Some(sink);
    }

    /// Registers a plugin with a unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn GanttPlugin>) -> GanttResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(GanttError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.plugins.iter().any(|entry| entry.id() == plugin_id) {
            return Err(GanttError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        trace!(plugin = %plugin_id, "plugin registered");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        if let Some(position) = self.plugins.iter().position(|entry| entry.id() == plugin_id) {
            self.plugins.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }

    /// Builds the current frame and hands it to the renderer.
    pub fn render(&mut self) -> GanttResult<()> {
        let frame = self.build_frame()?;
        self.renderer.render(&frame)?;
        self.emit_plugin_event(PluginEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        // Moving the plugins out for the dispatch keeps the engine borrow
        // disjoint from the plugin borrows.
        let mut plugins = std::mem::take(&mut self.plugins);
        for plugin in &mut plugins {
            plugin.on_event(&event, context);
        }
        self.plugins = plugins;
    }

    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.viewport,
            range: self.scale.range(),
            unit: self.unit,
            zoom_factor: self.zoom_factor,
            scroll_offset_px: self.scroll_offset_px,
            activities_len: self.activities.len(),
            resources_len: self.resources.len(),
            dragging: self.gesture.is_dragging(),
            read_only: self.read_only,
        }
    }
}
