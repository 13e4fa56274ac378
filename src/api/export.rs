use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::api::composer::DashboardArtifact;
use crate::error::{DashboardError, DashboardResult};
use crate::render::SvgRenderer;

/// Output serialization for one chart unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    /// Vector output, always available.
    Svg,
    /// Raster output, requires the `cairo-backend` feature.
    Png,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Prefix for generated files: each unit lands at
    /// `{base_path}{group_index}.{extension}`.
    pub base_path: PathBuf,
    pub format: ExportFormat,
    /// Raster resolution; ignored for vector output.
    pub dpi: u32,
}

impl ExportOptions {
    #[must_use]
    pub fn new(base_path: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            base_path: base_path.into(),
            format,
            dpi: 300,
        }
    }

    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }
}

/// Outcome of writing one chart unit.
#[derive(Debug)]
pub struct ExportReport {
    pub group_index: usize,
    pub path: PathBuf,
    pub outcome: DashboardResult<()>,
}

impl ExportReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Writes every chart unit of an artifact to disk, one file per unit.
///
/// A failing unit never discards or aborts files already written; each
/// unit gets its own report and the caller decides whether to retry.
pub fn export_dashboard(artifact: &DashboardArtifact, options: &ExportOptions) -> Vec<ExportReport> {
    let mut reports = Vec::with_capacity(artifact.units.len());

    for unit in &artifact.units {
        let mut path = options.base_path.as_os_str().to_owned();
        path.push(format!(
            "{}.{}",
            unit.group_index,
            options.format.extension()
        ));
        let path = PathBuf::from(path);

        let outcome = write_unit(unit, &path, options);
        match &outcome {
            Ok(()) => info!(path = %path.display(), "exported chart unit"),
            Err(err) => error!(path = %path.display(), %err, "chart unit export failed"),
        }

        reports.push(ExportReport {
            group_index: unit.group_index,
            path,
            outcome,
        });
    }

    reports
}

fn write_unit(
    unit: &crate::render::ChartUnit,
    path: &std::path::Path,
    options: &ExportOptions,
) -> DashboardResult<()> {
    match options.format {
        ExportFormat::Svg => {
            let document = SvgRenderer::document(&unit.frame)?;
            std::fs::write(path, document).map_err(|err| DashboardError::Export {
                path: path.to_path_buf(),
                message: err.to_string(),
            })
        }
        ExportFormat::Png => write_png(unit, path, options.dpi),
    }
}

#[cfg(feature = "cairo-backend")]
fn write_png(unit: &crate::render::ChartUnit, path: &std::path::Path, dpi: u32) -> DashboardResult<()> {
    use crate::render::{BASE_DPI, CairoRenderer, Renderer};

    let scale = f64::from(dpi.max(1)) / BASE_DPI;
    let frame = unit.frame.scaled(scale);
    let mut renderer = CairoRenderer::for_frame(&frame)?;
    renderer.render(&frame)?;
    renderer.write_png(path)
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_unit: &crate::render::ChartUnit, path: &std::path::Path, _dpi: u32) -> DashboardResult<()> {
    Err(DashboardError::Export {
        path: path.to_path_buf(),
        message: "png export requires the `cairo-backend` feature".to_owned(),
    })
}
