use crate::core::Color;
use crate::error::{DashboardError, DashboardResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Backend-agnostic scene for one rendered chart unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::rgb(1.0, 1.0, 1.0),
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.lines.push(line);
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.texts.push(text);
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if !self.viewport.is_valid() {
            return Err(DashboardError::InvalidData(format!(
                "invalid viewport size: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }
        self.background.validate()?;

        for line in &self.lines {
            line.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }

    /// Returns a copy with all geometry and font sizes multiplied by
    /// `factor`. Raster export uses this to honor the requested DPI.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        let scale_u32 = |v: u32| ((f64::from(v) * factor).round().max(1.0)) as u32;
        let mut scaled = Self::new(Viewport::new(
            scale_u32(self.viewport.width),
            scale_u32(self.viewport.height),
        ));
        scaled.background = self.background;

        for line in &self.lines {
            let mut line = *line;
            line.x1 *= factor;
            line.y1 *= factor;
            line.x2 *= factor;
            line.y2 *= factor;
            line.stroke_width *= factor;
            scaled.lines.push(line);
        }
        for rect in &self.rects {
            let mut rect = *rect;
            rect.x *= factor;
            rect.y *= factor;
            rect.width *= factor;
            rect.height *= factor;
            rect.edge_width *= factor;
            scaled.rects.push(rect);
        }
        for text in &self.texts {
            let mut text = text.clone();
            text.x *= factor;
            text.y *= factor;
            text.font_size_px *= factor;
            scaled.texts.push(text);
        }

        scaled
    }
}
