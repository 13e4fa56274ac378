mod frame;
mod group;
mod null_renderer;
mod primitives;
mod svg_backend;

pub use frame::{RenderFrame, Viewport};
pub use group::{ChartGroupRenderer, ChartUnit, GroupRenderInput};
pub use null_renderer::NullRenderer;
pub use primitives::{LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use svg_backend::SvgRenderer;

use crate::error::DashboardResult;

/// Pixels per abstract figure unit at export scale 1.0. Raster export
/// multiplies geometry by `dpi / BASE_DPI`.
pub const BASE_DPI: f64 = 100.0;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from composition and formatting logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> DashboardResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer};
