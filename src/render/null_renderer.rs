use crate::error::GanttResult;
use crate::render::{Renderer, TimelineFrame};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry
/// before a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_bar_count: usize,
    pub last_tick_count: usize,
    pub last_band_count: usize,
    pub render_calls: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &TimelineFrame) -> GanttResult<()> {
        frame.validate()?;
        self.last_bar_count = frame.bars.len();
        self.last_tick_count = frame.ticks.len();
        self.last_band_count = frame.bands.len();
        self.render_calls += 1;
        Ok(())
    }
}
