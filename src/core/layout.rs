use serde::{Deserialize, Serialize};

use crate::core::format::FormatClass;
use crate::error::{DashboardError, DashboardResult};

/// Sizing knobs for the subplot grid. Units are abstract figure units
/// (one unit maps to `render::BASE_DPI` pixels at export time).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTuning {
    pub unit_width: f64,
    pub unit_height: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub max_width: f64,
    pub max_height: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            unit_width: 4.0,
            unit_height: 3.0,
            min_width: 6.0,
            min_height: 4.0,
            max_width: 16.0,
            max_height: 10.0,
        }
    }
}

/// Computed grid for one chart group. Consumed by the group renderer,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub rows: usize,
    pub cols: usize,
    pub figure_width: f64,
    pub figure_height: f64,
    pub share_y: bool,
}

impl LayoutPlan {
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub fn with_share_y(mut self, share_y: bool) -> Self {
        self.share_y = share_y;
        self
    }
}

/// Plans near-square, wide-biased subplot grids from a chart count and
/// optional row/column hints.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutPlanner {
    tuning: LayoutTuning,
}

impl LayoutPlanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tuning(tuning: LayoutTuning) -> Self {
        Self { tuning }
    }

    /// Computes the grid shape and figure size for `slot_count` charts.
    ///
    /// Both hints are used verbatim when given (validated for capacity); a
    /// single hint derives the other dimension by ceiling division; with no
    /// hints the grid is `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`,
    /// which always yields `cols >= rows`. Wide grids read better on
    /// presentation slides.
    pub fn plan(
        &self,
        slot_count: usize,
        row_hint: Option<usize>,
        col_hint: Option<usize>,
    ) -> DashboardResult<LayoutPlan> {
        if slot_count == 0 {
            return Err(DashboardError::Configuration(
                "layout requires at least one chart slot".to_owned(),
            ));
        }

        let (rows, cols) = match (row_hint, col_hint) {
            (Some(rows), Some(cols)) => {
                if rows == 0 || cols == 0 || rows * cols < slot_count {
                    return Err(DashboardError::Layout {
                        rows,
                        cols,
                        slots: slot_count,
                    });
                }
                (rows, cols)
            }
            (Some(rows), None) => {
                if rows == 0 {
                    return Err(DashboardError::Layout {
                        rows,
                        cols: 0,
                        slots: slot_count,
                    });
                }
                (rows, slot_count.div_ceil(rows))
            }
            (None, Some(cols)) => {
                if cols == 0 {
                    return Err(DashboardError::Layout {
                        rows: 0,
                        cols,
                        slots: slot_count,
                    });
                }
                (slot_count.div_ceil(cols), cols)
            }
            (None, None) => {
                let cols = near_square_cols(slot_count);
                (slot_count.div_ceil(cols), cols)
            }
        };

        let (figure_width, figure_height) = self.figure_size(rows, cols);

        Ok(LayoutPlan {
            rows,
            cols,
            figure_width,
            figure_height,
            share_y: true,
        })
    }

    fn figure_size(&self, rows: usize, cols: usize) -> (f64, f64) {
        let t = self.tuning;
        let raw_width = cols as f64 * t.unit_width;
        let raw_height = rows as f64 * t.unit_height;

        let mut width = raw_width.max(t.min_width);
        let mut height = raw_height.max(t.min_height);

        // Ceiling clamp preserves the aspect ratio implied by the grid:
        // clamp whichever dimension overshoots by the larger ratio, then
        // recompute the other from the rows/cols aspect.
        let over_w = width / t.max_width;
        let over_h = height / t.max_height;
        if over_w > 1.0 || over_h > 1.0 {
            let aspect = raw_width / raw_height;
            if over_w >= over_h {
                width = t.max_width;
                height = (width / aspect).min(t.max_height);
            } else {
                height = t.max_height;
                width = (height * aspect).min(t.max_width);
            }
        }

        (width, height)
    }
}

/// Resolves the shared-y-axis flag for one group.
///
/// Mixing percentage and count bars on a shared axis is disallowed: a mixed
/// group forces `false` even when the caller requested sharing. Uniform
/// groups default to `true` and honor the caller's request.
#[must_use]
pub fn resolve_share_y(requested: Option<bool>, classes: &[FormatClass]) -> bool {
    let mut kinds = classes.iter().map(|class| class.is_percentage());
    let uniform = match kinds.next() {
        Some(first) => kinds.all(|k| k == first),
        None => true,
    };
    if !uniform {
        return false;
    }
    requested.unwrap_or(true)
}

fn near_square_cols(slot_count: usize) -> usize {
    let mut cols = (slot_count as f64).sqrt().ceil() as usize;
    while cols * cols < slot_count {
        // Guard against floating-point sqrt rounding just below the root.
        cols += 1;
    }
    cols.max(1)
}
