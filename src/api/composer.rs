use tracing::{debug, info, warn};

use crate::api::config::DashboardConfig;
use crate::core::format::{all_integers, first_non_numeric};
use crate::core::layout::resolve_share_y;
use crate::core::{
    CellValue, ColumnFormat, DataTable, LayoutPlanner, StyleCatalog, StyleResolver,
    ValueFormatSpec,
};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{ChartGroupRenderer, ChartUnit, GroupRenderInput};

/// A recovered per-column failure attached to an otherwise successful
/// artifact, so callers can detect degraded output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderWarning {
    pub group_index: usize,
    pub column: String,
    pub message: String,
}

/// Ordered collection of chart units produced by one composition call,
/// owned by the caller. The engine retains nothing after `compose`.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardArtifact {
    pub sheet_name: String,
    pub units: Vec<ChartUnit>,
    pub warnings: Vec<RenderWarning>,
}

impl DashboardArtifact {
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Orchestrates group rendering across a table: resolves per-group
/// overrides, infers formats, plans layouts, and collects chart units.
///
/// Compose calls share no mutable state; the composer is freely shared
/// across threads.
#[derive(Debug, Clone, Default)]
pub struct DashboardComposer {
    catalog: StyleCatalog,
    planner: LayoutPlanner,
    renderer: ChartGroupRenderer,
}

impl DashboardComposer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the builtin palette/background tables.
    #[must_use]
    pub fn with_catalog(mut self, catalog: StyleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    /// Composes one dashboard.
    ///
    /// Configuration problems (bad override keys, unknown scheme or
    /// background names, unknown columns, impossible layout hints) fail the
    /// whole call: a dashboard with a silently missing chart is worse than
    /// a visible failure. Non-numeric columns are the one recovered case;
    /// they render as literal text and surface in `warnings`.
    pub fn compose(
        &self,
        table: &DataTable,
        config: &DashboardConfig,
    ) -> DashboardResult<DashboardArtifact> {
        info!(
            sheet = %config.sheet_name,
            groups = config.column_groups.len(),
            "composing dashboard"
        );

        config.validate()?;
        self.catalog.background(&config.bg_style)?;
        for scheme in &config.color_schemes {
            self.catalog.scheme(scheme)?;
        }
        for group in &config.column_groups {
            group.validate_against(table)?;
        }

        let resolver = StyleResolver::new(&self.catalog);
        let empty_overrides = indexmap::IndexMap::new();

        let mut units = Vec::with_capacity(config.column_groups.len());
        let mut warnings = Vec::new();

        for (group_index, group) in config.column_groups.iter().enumerate() {
            let scheme = &config.color_schemes[group_index % config.color_schemes.len()];

            let fallback_title;
            let title = match config.custom_titles.get(&group_index) {
                Some(custom) => custom.as_str(),
                None => {
                    fallback_title = format!(
                        "{} {} Analysis - Group {}",
                        config.title_prefix,
                        config.sheet_name,
                        group_index + 1
                    );
                    fallback_title.as_str()
                }
            };
            let subtitle = config
                .custom_subtitles
                .get(&group_index)
                .map(String::as_str);

            let format_specs = config.value_formats.get(&group_index);
            let mut formats = Vec::with_capacity(group.len());
            let mut column_titles = Vec::with_capacity(group.len());
            let mut ylabels = Vec::with_capacity(group.len());

            for name in group.columns() {
                let values = table.column(name).ok_or_else(|| {
                    DashboardError::Configuration(format!(
                        "column group references unknown column `{name}`"
                    ))
                })?;

                if let Some(sample) = first_non_numeric(values) {
                    let recovered = DashboardError::DataType {
                        column: name.clone(),
                        detail: format!("value `{sample}` renders as literal text"),
                    };
                    warn!(group = group_index, %recovered, "recovered column error");
                    warnings.push(RenderWarning {
                        group_index,
                        column: name.clone(),
                        message: recovered.to_string(),
                    });
                }

                let spec: Option<&ValueFormatSpec> = format_specs.and_then(|m| m.get(name));
                let format = ColumnFormat::infer(values, name, spec);
                formats.push(format);

                let custom_title = config
                    .custom_column_titles
                    .get(&group_index)
                    .and_then(|m| m.get(name));
                column_titles.push(custom_title.cloned().unwrap_or_else(|| name.clone()));

                let ylabel = config
                    .ylabel
                    .as_ref()
                    .and_then(|spec| spec.resolve(name))
                    .map(str::to_owned)
                    .unwrap_or_else(|| inferred_ylabel(format, values));
                ylabels.push(ylabel);
            }

            let hint = config.layout_hints.get(&group_index).copied().unwrap_or_default();
            let classes: Vec<_> = formats.iter().map(|f| f.class).collect();
            let layout = self
                .planner
                .plan(group.len(), hint.rows, hint.cols)?
                .with_share_y(resolve_share_y(hint.share_y, &classes));

            let style = resolver.resolve(
                scheme,
                &config.bg_style,
                group.columns(),
                config
                    .style_overrides
                    .get(&group_index)
                    .unwrap_or(&empty_overrides),
            )?;

            debug!(
                group = group_index,
                %scheme,
                rows = layout.rows,
                cols = layout.cols,
                share_y = layout.share_y,
                "rendering chart group"
            );

            let unit = self.renderer.render(&GroupRenderInput {
                group_index,
                table,
                group,
                title,
                subtitle,
                column_titles,
                ylabels,
                xlabel: config.xlabel.as_deref().or(table.index_name()),
                formats,
                style: &style,
                layout,
            })?;
            units.push(unit);
        }

        Ok(DashboardArtifact {
            sheet_name: config.sheet_name.clone(),
            units,
            warnings,
        })
    }
}

fn inferred_ylabel(format: ColumnFormat, values: &[CellValue]) -> String {
    if format.class.is_percentage() {
        "Percentage".to_owned()
    } else if all_integers(values) {
        "Count".to_owned()
    } else {
        "Value".to_owned()
    }
}
