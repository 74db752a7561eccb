//! Engine facade: configuration, controllers, and the frame builder.
//!
//! `GanttEngine` is one type whose surface is split across focused modules,
//! one per concern. Everything a host application touches is re-exported
//! from here.

use chrono::{DateTime, Utc};

mod behavior;
mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod frame_builder;
mod gesture_controller;
mod validation;
mod view_controller;

pub use behavior::{FrameStyle, ZoomLimits};
pub use engine::GanttEngine;
pub use engine_config::GanttEngineConfig;
pub use gesture_controller::GestureTarget;

/// Host-side receiver for committed reschedules.
///
/// Called exactly once per completed drag gesture, after day snapping and
/// minimum-duration clamping. The engine keeps showing the committed
/// interval from its current snapshot until the host supplies a new one
/// through `GanttEngine::set_activities`.
pub trait RescheduleSink {
    fn on_reschedule(
        &mut self,
        activity_id: &str,
        new_start: DateTime<Utc>,
        new_end: DateTime<Utc>,
    );
}
