use crate::error::SpiralResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so invalid geometry surfaces without a
/// raster backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_arc_count: usize,
    pub last_circle_count: usize,
    pub last_line_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SpiralResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_arc_count = frame.arcs.len();
        self.last_circle_count = frame.circles.len();
        self.last_line_count = frame.lines.len();
        Ok(())
    }
}
