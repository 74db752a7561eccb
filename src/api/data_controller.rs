use tracing::{debug, warn};

use crate::core::LayoutWarning;
use crate::error::GanttResult;
use crate::extensions::{PluginEvent, TimelineMarker};
use crate::model::{Activity, Resource};
use crate::render::Renderer;

use super::GanttEngine;

impl<R: Renderer> GanttEngine<R> {
    /// Replaces the activity snapshot and rebuilds range, scale, and lanes.
    ///
    /// An active gesture is cancelled first: its captured original times
    /// refer to the outgoing snapshot and must not commit against the new
    /// one.
    pub fn set_activities(&mut self, activities: Vec<Activity>) -> GanttResult<()> {
        if self.gesture.cancel() {
            warn!("activity snapshot replaced mid-gesture, drag cancelled");
            self.emit_plugin_event(PluginEvent::GestureCancelled);
        }

        debug!(count = activities.len(), "set activities");
        self.activities = activities;
        self.refresh_scale()?;
        self.refresh_layout();
        self.log_layout_warnings();

        self.emit_plugin_event(PluginEvent::DataUpdated {
            activities_len: self.activities.len(),
            resources_len: self.resources.len(),
        });
        let warning_count = self.layout.warnings().len();
        if warning_count > 0 {
            self.emit_plugin_event(PluginEvent::LayoutWarnings {
                count: warning_count,
            });
        }
        Ok(())
    }

    /// Replaces the resource snapshot and rebuilds the lanes.
    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        debug!(count = resources.len(), "set resources");
        self.resources = resources;
        self.refresh_layout();
        self.log_layout_warnings();

        self.emit_plugin_event(PluginEvent::DataUpdated {
            activities_len: self.activities.len(),
            resources_len: self.resources.len(),
        });
        let warning_count = self.layout.warnings().len();
        if warning_count > 0 {
            self.emit_plugin_event(PluginEvent::LayoutWarnings {
                count: warning_count,
            });
        }
    }

    /// Replaces the milestone markers shown on the axis.
    pub fn set_markers(&mut self, markers: Vec<TimelineMarker>) {
        debug!(count = markers.len(), "set markers");
        self.markers = markers;
    }

    fn log_layout_warnings(&self) {
        for warning in self.layout.warnings() {
            match warning {
                LayoutWarning::UnknownResource {
                    activity_id,
                    resource_id,
                } => warn!(
                    activity = %activity_id,
                    resource = %resource_id,
                    "activity references unknown resource, excluded from layout"
                ),
                LayoutWarning::InvalidInterval { activity_id } => warn!(
                    activity = %activity_id,
                    "activity interval is empty or inverted, excluded from layout"
                ),
            }
        }
    }
}
