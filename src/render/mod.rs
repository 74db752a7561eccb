mod frame;
mod null_renderer;

pub use frame::{BarGeometry, LaneRow, MarkerDot, TickMark, TimeBand, TimelineFrame};
pub use null_renderer::NullRenderer;

use crate::error::GanttResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `TimelineFrame` so
/// drawing code stays isolated from scheduling and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &TimelineFrame) -> GanttResult<()>;
}
