use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use std::path::Path;

use crate::core::Color;
use crate::error::{DashboardError, DashboardResult};
use crate::render::{RenderFrame, Renderer, TextHAlign, TextPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Cairo + Pango raster backend for PNG export.
///
/// Renders offscreen into an image surface sized to the frame viewport;
/// `write_png` persists the last rendered surface.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> DashboardResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(DashboardError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Allocates a renderer matching the frame's viewport.
    pub fn for_frame(frame: &RenderFrame) -> DashboardResult<Self> {
        Self::new(frame.viewport.width as i32, frame.viewport.height as i32)
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango"
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&self, path: &Path) -> DashboardResult<()> {
        let mut file = std::fs::File::create(path).map_err(|err| DashboardError::Export {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| DashboardError::Export {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
    }

    fn draw_text(&self, context: &Context, text: &TextPrimitive) -> DashboardResult<()> {
        let layout = pangocairo::functions::create_layout(context);
        let mut font = String::from("Sans");
        if text.bold {
            font.push_str(" Bold");
        }
        if text.italic {
            font.push_str(" Italic");
        }
        let font_description =
            FontDescription::from_string(&format!("{font} {}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, text_height) = layout.pixel_size();
        let offset_x = match text.h_align {
            TextHAlign::Left => 0.0,
            TextHAlign::Center => -f64::from(text_width) / 2.0,
            TextHAlign::Right => -f64::from(text_width),
        };
        // Pango anchors at the top of the layout; frame coordinates anchor
        // at the text baseline.
        let offset_y = -f64::from(text_height);

        context.save().map_err(|err| map_backend_error("failed to save context", err))?;
        context.translate(text.x, text.y);
        if text.angle_degrees != 0.0 {
            context.rotate(text.angle_degrees.to_radians());
        }
        apply_color(context, text.color);
        context.move_to(offset_x, offset_y);
        pangocairo::functions::show_layout(context, &layout);
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()> {
        frame.validate()?;

        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;

        apply_color(&context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            apply_color(&context, rect.fill);
            match rect.edge_color {
                Some(edge) if rect.edge_width > 0.0 => {
                    context
                        .fill_preserve()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                    apply_color(&context, edge);
                    context.set_line_width(rect.edge_width);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke rectangle edge", err))?;
                }
                _ => {
                    context
                        .fill()
                        .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
                }
            }
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(&context, line.color);
            context.set_line_width(line.stroke_width);
            if line.dashed {
                context.set_dash(&[4.0, 3.0], 0.0);
            } else {
                context.set_dash(&[], 0.0);
            }
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        context.set_dash(&[], 0.0);

        for text in &frame.texts {
            self.draw_text(&context, text)?;
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> DashboardError {
    DashboardError::InvalidData(format!("{prefix}: {err}"))
}
