use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// One table cell: numeric when the source parsed a number, otherwise the
/// literal text. Text cells in a numeric column surface as per-column
/// data-type warnings during composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    #[must_use]
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Text(text) => Some(text.as_str()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Immutable tabular input: ordered named columns over one shared row index.
///
/// Invariant: every column holds exactly `index.len()` cells, enforced at
/// construction. The engine never mutates a table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    index_name: Option<String>,
    index: Vec<String>,
    columns: IndexMap<String, Vec<CellValue>>,
}

impl DataTable {
    #[must_use]
    pub fn new(index: Vec<String>) -> Self {
        Self {
            index_name: None,
            index,
            columns: IndexMap::new(),
        }
    }

    /// Names the row index (shown as the x-axis label fallback).
    #[must_use]
    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = Some(name.into());
        self
    }

    /// Appends a named column, validating the shared-row-count invariant.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<CellValue>,
    ) -> DashboardResult<Self> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(DashboardError::Configuration(format!(
                "column `{name}` has {} rows but the table index has {}",
                values.len(),
                self.index.len()
            )));
        }
        if self.columns.insert(name.clone(), values).is_some() {
            return Err(DashboardError::Configuration(format!(
                "duplicate column name `{name}`"
            )));
        }
        Ok(self)
    }

    #[must_use]
    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    #[must_use]
    pub fn index(&self) -> &[String] {
        &self.index
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Ordered non-empty set of column names rendered together as one chart unit.
///
/// Groups are views over a `DataTable`, never copies of its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnGroup {
    columns: Vec<String>,
}

impl ColumnGroup {
    pub fn new(columns: Vec<String>) -> DashboardResult<Self> {
        if columns.is_empty() {
            return Err(DashboardError::Configuration(
                "column group must not be empty".to_owned(),
            ));
        }
        Ok(Self { columns })
    }

    /// Every member column must exist in the source table.
    pub fn validate_against(&self, table: &DataTable) -> DashboardResult<()> {
        if self.columns.is_empty() {
            return Err(DashboardError::Configuration(
                "column group must not be empty".to_owned(),
            ));
        }
        for name in &self.columns {
            if table.column(name).is_none() {
                return Err(DashboardError::Configuration(format!(
                    "column group references unknown column `{name}`"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
