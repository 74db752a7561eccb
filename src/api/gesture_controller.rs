use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::extensions::PluginEvent;
use crate::interaction::{DragMode, DragProposal, GestureCommit};
use crate::render::Renderer;

use super::GanttEngine;

/// What a pointer press would grab: an activity and the drag mode implied
/// by where on the bar it landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureTarget {
    pub activity_id: String,
    pub mode: DragMode,
}

impl<R: Renderer> GanttEngine<R> {
    /// Resolves the bar and drag mode under a viewport-space pointer.
    ///
    /// Where bars overlap on one lane the topmost (last drawn) bar wins.
    #[must_use]
    pub fn hit_test(&self, x: f64, y: f64) -> Option<GestureTarget> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let handle_px = self.gesture.behavior().edge_handle_px;
        let mut candidates: SmallVec<[(OrderedFloat<f64>, GestureTarget); 4]> = SmallVec::new();
        let mut draw_index = 0.0;
        for (lane_index, lane) in self.layout.lanes().enumerate() {
            let row_y = self.lane_row_y(lane_index);
            for activity in &lane.activities {
                draw_index += 1.0;
                let (bar_x, bar_y, bar_width, bar_height) =
                    self.bar_rect(row_y, activity.start, activity.end);
                if x < bar_x || x > bar_x + bar_width || y < bar_y || y > bar_y + bar_height {
                    continue;
                }
                candidates.push((
                    OrderedFloat(-draw_index),
                    GestureTarget {
                        activity_id: activity.id.clone(),
                        mode: resolve_drag_mode(x, bar_x, bar_width, handle_px),
                    },
                ));
            }
        }

        candidates
            .into_iter()
            .min_by_key(|item| item.0)
            .map(|(_, target)| target)
    }

    /// Routes a pointer press into the gesture machine via hit-testing.
    ///
    /// No-op while read-only, over empty canvas, or while another gesture is
    /// active. Returns the grabbed target when a drag actually starts.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<GestureTarget> {
        if self.read_only {
            trace!("pointer down ignored in read-only mode");
            return None;
        }
        let target = self.hit_test(x, y)?;
        let activity = self
            .activities
            .iter()
            .find(|activity| activity.id == target.activity_id)?
            .clone();
        if !self.gesture.pointer_down(&activity, target.mode, x) {
            return None;
        }
        self.emit_plugin_event(PluginEvent::GestureStarted {
            activity_id: target.activity_id.clone(),
            mode: target.mode,
        });
        Some(target)
    }

    /// Feeds pointer movement into an active drag, returning the updated
    /// proposal. Stray moves while idle are absorbed.
    pub fn pointer_move(&mut self, x: f64) -> Option<DragProposal> {
        self.gesture.pointer_move(x, self.scale)
    }

    /// Completes an active drag: dispatches exactly one reschedule to the
    /// sink and returns the commit. A release while idle is a silent no-op.
    pub fn pointer_up(&mut self) -> Option<GestureCommit> {
        let commit = self.gesture.pointer_up()?;
        debug!(
            activity = %commit.activity_id,
            start = %commit.start,
            end = %commit.end,
            "reschedule committed"
        );
        if let Some(sink) = self.sink.as_mut() {
            sink.on_reschedule(&commit.activity_id, commit.start, commit.end);
        }
        self.emit_plugin_event(PluginEvent::ActivityRescheduled {
            activity_id: commit.activity_id.clone(),
            start: commit.start,
            end: commit.end,
        });
        Some(commit)
    }

    /// Abandons an active drag without a commit.
    ///
    /// Covers Escape and pointer-capture loss; safe to call while idle.
    pub fn cancel_gesture(&mut self) -> bool {
        if self.gesture.cancel() {
            self.emit_plugin_event(PluginEvent::GestureCancelled);
            true
        } else {
            false
        }
    }
}

/// Bars too narrow for distinct edge handles drag as plain moves.
fn resolve_drag_mode(x: f64, bar_x: f64, bar_width: f64, handle_px: f64) -> DragMode {
    if bar_width < 3.0 * handle_px {
        return DragMode::Move;
    }
    if x <= bar_x + handle_px {
        DragMode::ResizeLeft
    } else if x >= bar_x + bar_width - handle_px {
        DragMode::ResizeRight
    } else {
        DragMode::Move
    }
}
