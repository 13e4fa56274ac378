use std::path::PathBuf;

use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Invalid or inconsistent caller configuration. Always fatal to the
    /// enclosing compose call; the message names the offending key.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Non-numeric data where numeric data was declared or inferred.
    /// Recovered at column granularity during composition.
    #[error("column `{column}` is not numeric: {detail}")]
    DataType { column: String, detail: String },

    /// Explicit layout hints that cannot hold the requested chart count.
    #[error("layout {rows}x{cols} cannot hold {slots} charts")]
    Layout {
        rows: usize,
        cols: usize,
        slots: usize,
    },

    /// Invalid render geometry or primitive content.
    #[error("invalid render data: {0}")]
    InvalidData(String),

    /// Failure while serializing one chart unit to disk.
    #[error("export failed for `{}`: {message}", path.display())]
    Export { path: PathBuf, message: String },
}
