use std::fmt::Write as _;

use crate::error::{DashboardError, DashboardResult};
use crate::render::{RenderFrame, Renderer, TextHAlign};

/// Vector (SVG) renderer backend.
///
/// Output is deterministic for a given frame: primitives are emitted in
/// insertion order with fixed-precision coordinates, so identical
/// compositions produce byte-identical documents.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    last_document: Option<String>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The document produced by the most recent `render` call.
    #[must_use]
    pub fn last_document(&self) -> Option<&str> {
        self.last_document.as_deref()
    }

    /// Serializes one frame to a standalone SVG document.
    pub fn document(frame: &RenderFrame) -> DashboardResult<String> {
        frame.validate()?;

        let mut out = String::new();
        let write = |result: std::fmt::Result| {
            result.map_err(|e| DashboardError::InvalidData(format!("svg serialization: {e}")))
        };

        write(writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = frame.viewport.width,
            h = frame.viewport.height,
        ))?;
        write(writeln!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            frame.viewport.width,
            frame.viewport.height,
            frame.background.to_hex(),
        ))?;

        for rect in &frame.rects {
            let stroke = match rect.edge_color {
                Some(edge) if rect.edge_width > 0.0 => format!(
                    r#" stroke="{}" stroke-width="{:.2}""#,
                    edge.to_hex(),
                    rect.edge_width
                ),
                _ => String::new(),
            };
            write(writeln!(
                out,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.3}"{stroke}/>"#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                rect.fill.to_hex_opaque(),
                rect.fill.alpha,
            ))?;
        }

        for line in &frame.lines {
            let dash = if line.dashed {
                r#" stroke-dasharray="4 3""#
            } else {
                ""
            };
            write(writeln!(
                out,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.3}" stroke-width="{:.2}"{dash}/>"#,
                line.x1,
                line.y1,
                line.x2,
                line.y2,
                line.color.to_hex_opaque(),
                line.color.alpha,
                line.stroke_width,
            ))?;
        }

        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            let weight = if text.bold { " font-weight=\"bold\"" } else { "" };
            let style = if text.italic {
                " font-style=\"italic\""
            } else {
                ""
            };
            let transform = if text.angle_degrees != 0.0 {
                format!(
                    r#" transform="rotate({:.1} {:.2} {:.2})""#,
                    text.angle_degrees, text.x, text.y
                )
            } else {
                String::new()
            };
            write(writeln!(
                out,
                r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.2}" fill="{}" text-anchor="{anchor}"{weight}{style}{transform}>{}</text>"#,
                text.x,
                text.y,
                text.font_size_px,
                text.color.to_hex_opaque(),
                escape_xml(&text.text),
            ))?;
        }

        write(writeln!(out, "</svg>"))?;
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()> {
        self.last_document = Some(Self::document(frame)?);
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
