//! Optional feature modules live here.
//!
//! Keep extensions decoupled: they observe the engine or compute derived
//! geometry, they never reach into core internals.

pub mod markers;
pub mod plugins;

pub use markers::{MarkerPlacementConfig, PlacedMarker, TimelineMarker, place_markers};
pub use plugins::{GanttPlugin, PluginContext, PluginEvent};
