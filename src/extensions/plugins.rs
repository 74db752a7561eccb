use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{DateRange, TimeUnit, Viewport};
use crate::interaction::DragMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub range: DateRange,
    pub unit: TimeUnit,
    pub zoom_factor: f64,
    pub scroll_offset_px: f64,
    pub activities_len: usize,
    pub resources_len: usize,
    pub dragging: bool,
    pub read_only: bool,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    DataUpdated {
        activities_len: usize,
        resources_len: usize,
    },
    LayoutWarnings {
        count: usize,
    },
    VisibleRangeChanged {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    GranularityChanged {
        unit: TimeUnit,
    },
    ZoomChanged {
        zoom_factor: f64,
    },
    ScrollChanged {
        scroll_offset_px: f64,
    },
    GestureStarted {
        activity_id: String,
        mode: DragMode,
    },
    GestureCancelled,
    ActivityRescheduled {
        activity_id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Rendered,
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating core
/// internals directly.
pub trait GanttPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}
