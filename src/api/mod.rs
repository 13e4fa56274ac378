mod composer;
mod config;
mod export;

pub use composer::{DashboardArtifact, DashboardComposer, RenderWarning};
pub use config::{DashboardConfig, LayoutHint, YLabelSpec};
pub use export::{ExportFormat, ExportOptions, ExportReport, export_dashboard};
