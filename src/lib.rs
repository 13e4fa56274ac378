//! dashboard-rs: composition engine for grouped bar-chart dashboards.
//!
//! This crate turns tabular business metrics into styled multi-chart
//! artifacts. The interesting logic lives in three places: value-format
//! inference (percentage vs. count, decimal precision), subplot grid
//! planning, and override merging across titles, palettes, and formats.
//! File readers, CLI parsing, and image export are thin adapters at the
//! crate boundary.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{DashboardArtifact, DashboardComposer, DashboardConfig};
pub use error::{DashboardError, DashboardResult};
