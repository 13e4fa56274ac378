use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ColumnGroup, ColumnStyleOverride, ValueFormatSpec};
use crate::error::{DashboardError, DashboardResult};

/// Y-axis label selection: one label for every subplot, or a per-column
/// mapping. Columns absent from the mapping fall back to the inferred
/// label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YLabelSpec {
    Global(String),
    PerColumn(IndexMap<String, String>),
}

impl YLabelSpec {
    #[must_use]
    pub fn resolve(&self, column: &str) -> Option<&str> {
        match self {
            Self::Global(label) => Some(label.as_str()),
            Self::PerColumn(labels) => labels.get(column).map(String::as_str),
        }
    }
}

/// Optional grid hints for one group. Missing dimensions are derived by the
/// layout planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutHint {
    #[serde(default)]
    pub rows: Option<usize>,
    #[serde(default)]
    pub cols: Option<usize>,
    #[serde(default)]
    pub share_y: Option<bool>,
}

/// Declarative dashboard description: which columns chart together, plus
/// per-group overrides for titles, formats, palettes, and layout.
///
/// Override maps are keyed by group index. Serializable so host
/// applications can persist/load dashboard setup without inventing their
/// own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub sheet_name: String,
    pub column_groups: Vec<ColumnGroup>,
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
    #[serde(default)]
    pub custom_titles: IndexMap<usize, String>,
    #[serde(default)]
    pub custom_subtitles: IndexMap<usize, String>,
    #[serde(default)]
    pub custom_column_titles: IndexMap<usize, IndexMap<String, String>>,
    #[serde(default)]
    pub value_formats: IndexMap<usize, IndexMap<String, ValueFormatSpec>>,
    #[serde(default)]
    pub style_overrides: IndexMap<usize, IndexMap<String, ColumnStyleOverride>>,
    #[serde(default = "default_color_schemes")]
    pub color_schemes: Vec<String>,
    #[serde(default = "default_bg_style")]
    pub bg_style: String,
    #[serde(default)]
    pub layout_hints: IndexMap<usize, LayoutHint>,
    #[serde(default)]
    pub xlabel: Option<String>,
    #[serde(default)]
    pub ylabel: Option<YLabelSpec>,
}

impl DashboardConfig {
    #[must_use]
    pub fn new(sheet_name: impl Into<String>, column_groups: Vec<ColumnGroup>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            column_groups,
            title_prefix: default_title_prefix(),
            custom_titles: IndexMap::new(),
            custom_subtitles: IndexMap::new(),
            custom_column_titles: IndexMap::new(),
            value_formats: IndexMap::new(),
            style_overrides: IndexMap::new(),
            color_schemes: default_color_schemes(),
            bg_style: default_bg_style(),
            layout_hints: IndexMap::new(),
            xlabel: None,
            ylabel: None,
        }
    }

    #[must_use]
    pub fn with_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.title_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_bg_style(mut self, bg_style: impl Into<String>) -> Self {
        self.bg_style = bg_style.into();
        self
    }

    #[must_use]
    pub fn with_color_schemes(mut self, schemes: Vec<String>) -> Self {
        self.color_schemes = schemes;
        self
    }

    #[must_use]
    pub fn with_custom_title(mut self, group_index: usize, title: impl Into<String>) -> Self {
        self.custom_titles.insert(group_index, title.into());
        self
    }

    #[must_use]
    pub fn with_custom_subtitle(mut self, group_index: usize, subtitle: impl Into<String>) -> Self {
        self.custom_subtitles.insert(group_index, subtitle.into());
        self
    }

    #[must_use]
    pub fn with_layout_hint(mut self, group_index: usize, hint: LayoutHint) -> Self {
        self.layout_hints.insert(group_index, hint);
        self
    }

    #[must_use]
    pub fn with_value_format(
        mut self,
        group_index: usize,
        column: impl Into<String>,
        spec: ValueFormatSpec,
    ) -> Self {
        self.value_formats
            .entry(group_index)
            .or_default()
            .insert(column.into(), spec);
        self
    }

    #[must_use]
    pub fn with_xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self
    }

    #[must_use]
    pub fn with_ylabel(mut self, ylabel: YLabelSpec) -> Self {
        self.ylabel = Some(ylabel);
        self
    }

    /// Eager structural validation, run at compose-call entry so a bad
    /// override key fails before any rendering starts.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.color_schemes.is_empty() {
            return Err(DashboardError::Configuration(
                "at least one color scheme is required".to_owned(),
            ));
        }

        let group_count = self.column_groups.len();
        let check_keys = |map_name: &str, keys: Vec<usize>| -> DashboardResult<()> {
            for key in keys {
                if key >= group_count {
                    return Err(DashboardError::Configuration(format!(
                        "{map_name} references group index {key}, but only {group_count} groups are configured"
                    )));
                }
            }
            Ok(())
        };

        check_keys("custom_titles", self.custom_titles.keys().copied().collect())?;
        check_keys(
            "custom_subtitles",
            self.custom_subtitles.keys().copied().collect(),
        )?;
        check_keys(
            "custom_column_titles",
            self.custom_column_titles.keys().copied().collect(),
        )?;
        check_keys("value_formats", self.value_formats.keys().copied().collect())?;
        check_keys(
            "style_overrides",
            self.style_overrides.keys().copied().collect(),
        )?;
        check_keys("layout_hints", self.layout_hints.keys().copied().collect())?;

        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::Configuration(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DashboardError::Configuration(format!("failed to parse config: {e}")))
    }
}

fn default_title_prefix() -> String {
    "Dashboard".to_owned()
}

fn default_bg_style() -> String {
    "presentation".to_owned()
}

fn default_color_schemes() -> Vec<String> {
    [
        "corporate",
        "brand",
        "vibrant",
        "pastel",
        "gradient_blue",
        "gradient_red",
    ]
    .iter()
    .map(|&s| s.to_owned())
    .collect()
}
