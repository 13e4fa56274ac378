use crate::error::DashboardResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless composition.
///
/// It still validates frame content so tests can catch invalid geometry
/// without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()> {
        frame.validate()?;
        self.last_line_count = frame.lines.len();
        self.last_rect_count = frame.rects.len();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
