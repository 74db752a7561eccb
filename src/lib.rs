//! gantt-rs: interactive timeline scheduling engine.
//!
//! The engine turns activity and resource snapshots into a renderable
//! Gantt timeline and interprets pointer gestures as reschedule intents:
//! date/pixel mapping at day, week, month, and quarter granularity,
//! per-resource lane layout, and a drag state machine that snaps moves and
//! resizes to whole days. Rendering and persistence stay on the host side,
//! behind the `Renderer` and `RescheduleSink` seams.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod model;
pub mod render;
pub mod telemetry;

pub use api::{GanttEngine, GanttEngineConfig, RescheduleSink};
pub use error::{GanttError, GanttResult};
