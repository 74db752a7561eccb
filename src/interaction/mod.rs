//! Drag gesture state machine for move and resize scheduling.
//!
//! The machine owns only gesture state. Each transition receives the scale
//! it needs as an argument, which keeps the whole lifecycle testable without
//! an engine or rendering surface behind it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::TimeScale;
use crate::error::{GanttError, GanttResult};
use crate::model::Activity;

/// Which part of a bar a drag grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    /// Whole-bar drag: both ends shift together, duration is invariant.
    Move,
    /// Left edge drag: only the start moves.
    ResizeLeft,
    /// Right edge drag: only the end moves.
    ResizeRight,
}

/// Tuning for pointer gesture interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureBehavior {
    /// Width of the resize grab zone at each end of a bar.
    pub edge_handle_px: f64,
    /// Shortest interval a resize may leave behind, in whole days.
    pub min_duration_days: i64,
}

impl Default for GestureBehavior {
    fn default() -> Self {
        Self {
            edge_handle_px: 5.0,
            min_duration_days: 1,
        }
    }
}

impl GestureBehavior {
    pub(crate) fn validate(self) -> GanttResult<Self> {
        if !self.edge_handle_px.is_finite() || self.edge_handle_px <= 0.0 {
            return Err(GanttError::InvalidConfig(format!(
                "edge handle width must be finite and > 0, got {}",
                self.edge_handle_px
            )));
        }
        if self.min_duration_days < 1 {
            return Err(GanttError::InvalidConfig(format!(
                "minimum drag duration must be >= 1 day, got {}",
                self.min_duration_days
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn min_duration(self) -> Duration {
        Duration::days(self.min_duration_days)
    }
}

/// Proposed interval while a drag is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragProposal {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Captured context of the activity under drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragContext {
    pub activity_id: String,
    pub mode: DragMode,
    pub pointer_start_px: f64,
    pub original_start: DateTime<Utc>,
    pub original_end: DateTime<Utc>,
    pub proposal: DragProposal,
}

/// Reschedule payload produced by a completed gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GestureCommit {
    pub activity_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    Dragging(DragContext),
}

/// Single-gesture drag machine: `Idle` to `Dragging` and back.
///
/// One gesture at a time; a second pointer down while dragging is rejected
/// and the active gesture keeps running. Stray moves and releases while idle
/// are absorbed silently, since duplicate event delivery is normal pointer
/// plumbing rather than a bug signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureMachine {
    behavior: GestureBehavior,
    state: GestureState,
}

impl GestureMachine {
    pub fn new(behavior: GestureBehavior) -> GanttResult<Self> {
        Ok(Self {
            behavior: behavior.validate()?,
            state: GestureState::Idle,
        })
    }

    #[must_use]
    pub fn behavior(&self) -> GestureBehavior {
        self.behavior
    }

    #[must_use]
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    #[must_use]
    pub fn drag_context(&self) -> Option<&DragContext> {
        match &self.state {
            GestureState::Dragging(context) => Some(context),
            GestureState::Idle => None,
        }
    }

    /// Current proposed interval, present only while dragging.
    #[must_use]
    pub fn proposal(&self) -> Option<DragProposal> {
        self.drag_context().map(|context| context.proposal)
    }

    /// Starts a drag on `activity`, capturing its original interval and the
    /// pointer origin. Returns whether the machine entered `Dragging`.
    pub fn pointer_down(&mut self, activity: &Activity, mode: DragMode, pointer_px: f64) -> bool {
        if let GestureState::Dragging(active) = &self.state {
            warn!(
                active_activity = %active.activity_id,
                requested_activity = %activity.id,
                "pointer down while a gesture is active, keeping the running gesture"
            );
            return false;
        }
        if !pointer_px.is_finite() {
            warn!(activity = %activity.id, "non-finite pointer position, gesture refused");
            return false;
        }

        let context = DragContext {
            activity_id: activity.id.clone(),
            mode,
            pointer_start_px: pointer_px,
            original_start: activity.start,
            original_end: activity.end,
            proposal: DragProposal {
                start: activity.start,
                end: activity.end,
            },
        };
        trace!(activity = %context.activity_id, ?mode, pointer_px, "gesture started");
        self.state = GestureState::Dragging(context);
        true
    }

    /// Recomputes the proposal from the original interval plus the total
    /// pixel delta since pointer down.
    ///
    /// Every move starts over from the captured originals, so rounding never
    /// accumulates across a long stream of small moves and events replay
    /// deterministically. The dragged edge snaps to whole days through the
    /// scale's inverse mapping; resizes then clamp against the minimum
    /// duration, in that order.
    pub fn pointer_move(&mut self, pointer_px: f64, scale: TimeScale) -> Option<DragProposal> {
        let min_duration = self.behavior.min_duration();
        let GestureState::Dragging(context) = &mut self.state else {
            trace!("pointer move while idle ignored");
            return None;
        };
        if !pointer_px.is_finite() {
            trace!("non-finite pointer position, keeping last proposal");
            return Some(context.proposal);
        }

        let delta_px = pointer_px - context.pointer_start_px;
        match proposal_for_delta(context, delta_px, min_duration, scale) {
            Ok(proposal) => {
                context.proposal = proposal;
                Some(proposal)
            }
            Err(error) => {
                // A delta outside the representable date range keeps the
                // last good proposal instead of aborting the gesture.
                trace!(%error, delta_px, "unusable drag delta, keeping last proposal");
                Some(context.proposal)
            }
        }
    }

    /// Completes the gesture, returning the commit for the last proposal.
    ///
    /// Exactly one commit per completed gesture; a release while idle yields
    /// `None`.
    pub fn pointer_up(&mut self) -> Option<GestureCommit> {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Dragging(context) => {
                let commit = GestureCommit {
                    activity_id: context.activity_id,
                    start: context.proposal.start,
                    end: context.proposal.end,
                };
                trace!(
                    activity = %commit.activity_id,
                    start = %commit.start,
                    end = %commit.end,
                    "gesture committed"
                );
                Some(commit)
            }
            GestureState::Idle => {
                trace!("pointer up while idle ignored");
                None
            }
        }
    }

    /// Abandons the active gesture without a commit.
    ///
    /// Reachable from any point of a drag; covers Escape and pointer-capture
    /// loss so a missed release can never wedge the machine in `Dragging`.
    pub fn cancel(&mut self) -> bool {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging(context) => {
                trace!(activity = %context.activity_id, "gesture cancelled");
                true
            }
            GestureState::Idle => false,
        }
    }
}

impl Default for GestureMachine {
    fn default() -> Self {
        Self {
            behavior: GestureBehavior::default(),
            state: GestureState::Idle,
        }
    }
}

fn proposal_for_delta(
    context: &DragContext,
    delta_px: f64,
    min_duration: Duration,
    scale: TimeScale,
) -> GanttResult<DragProposal> {
    match context.mode {
        DragMode::Move => {
            let delta = snapped_delta(scale, context.original_start, delta_px)?;
            Ok(DragProposal {
                start: context.original_start + delta,
                end: context.original_end + delta,
            })
        }
        DragMode::ResizeLeft => {
            let delta = snapped_delta(scale, context.original_start, delta_px)?;
            let limit = context.original_end - min_duration;
            Ok(DragProposal {
                start: (context.original_start + delta).min(limit),
                end: context.original_end,
            })
        }
        DragMode::ResizeRight => {
            let delta = snapped_delta(scale, context.original_end, delta_px)?;
            let limit = context.original_start + min_duration;
            Ok(DragProposal {
                start: context.original_start,
                end: (context.original_end + delta).max(limit),
            })
        }
    }
}

/// Converts a pixel delta into a time delta anchored at the dragged edge:
/// the anchor is projected to pixels, shifted, and mapped back through the
/// day-rounding inverse, so the moved edge lands on a whole day.
fn snapped_delta(scale: TimeScale, anchor: DateTime<Utc>, delta_px: f64) -> GanttResult<Duration> {
    let anchor_px = scale.date_to_position(anchor);
    let snapped = scale.position_to_date(anchor_px + delta_px)?;
    Ok(snapped - anchor)
}
