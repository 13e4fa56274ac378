use crate::core::{
    CellValue, Color, ColumnFormat, ColumnGroup, DataTable, FontWeight, LayoutPlan, StyleSpec,
};
use crate::error::{DashboardError, DashboardResult};
use crate::render::{
    BASE_DPI, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive, Viewport,
};

const TITLE_FONT_PX: f64 = 20.0;
const SUBTITLE_FONT_PX: f64 = 16.0;
const COLUMN_TITLE_FONT_PX: f64 = 14.0;
const LABEL_FONT_PX: f64 = 12.0;
const VALUE_FONT_PX: f64 = 10.0;
const TICK_FONT_PX: f64 = 9.0;

/// Fraction of one category slot occupied by the bar.
const BAR_WIDTH_RATIO: f64 = 0.7;
/// Fixed vertical offset between a bar top and its value label.
const VALUE_LABEL_OFFSET_PX: f64 = 5.0;
/// Average glyph width as a fraction of the font size, for wrap estimates.
const GLYPH_ASPECT: f64 = 0.6;

const CELL_PAD_LEFT: f64 = 58.0;
const CELL_PAD_RIGHT: f64 = 14.0;
const CELL_PAD_TOP: f64 = 46.0;
const CELL_PAD_BOTTOM: f64 = 54.0;

const GRID_DIVISIONS: usize = 4;

const AXIS_COLOR: Color = Color::rgb(0.25, 0.25, 0.25);
const GRID_COLOR: Color = Color::rgb(0.5, 0.5, 0.5);
const TEXT_COLOR: Color = Color::rgb(0.19, 0.19, 0.19);

/// One rendered chart group: provenance plus the backend-agnostic scene.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartUnit {
    pub group_index: usize,
    pub title: String,
    pub subtitle: Option<String>,
    pub frame: RenderFrame,
}

/// Everything one group render needs, resolved by the composer beforehand.
///
/// `column_titles`, `ylabels`, and `formats` are positional and must have
/// one entry per group column.
#[derive(Debug)]
pub struct GroupRenderInput<'a> {
    pub group_index: usize,
    pub table: &'a DataTable,
    pub group: &'a ColumnGroup,
    pub title: &'a str,
    pub subtitle: Option<&'a str>,
    pub column_titles: Vec<String>,
    pub ylabels: Vec<String>,
    pub xlabel: Option<&'a str>,
    pub formats: Vec<ColumnFormat>,
    pub style: &'a StyleSpec,
    pub layout: LayoutPlan,
}

/// Renders one column group into a grid of bar subplots.
///
/// Produces an in-memory `RenderFrame` only; persistence belongs to the
/// export boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartGroupRenderer;

impl ChartGroupRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, input: &GroupRenderInput<'_>) -> DashboardResult<ChartUnit> {
        let slot_count = input.group.len();
        input.group.validate_against(input.table)?;
        if input.formats.len() != slot_count
            || input.column_titles.len() != slot_count
            || input.ylabels.len() != slot_count
        {
            return Err(DashboardError::Configuration(format!(
                "group {} render input arity mismatch: {} columns",
                input.group_index, slot_count
            )));
        }
        if input.layout.capacity() < slot_count {
            return Err(DashboardError::Layout {
                rows: input.layout.rows,
                cols: input.layout.cols,
                slots: slot_count,
            });
        }

        let width_px = (input.layout.figure_width * BASE_DPI).round();
        let height_px = (input.layout.figure_height * BASE_DPI).round();
        let mut frame = RenderFrame::new(Viewport::new(width_px as u32, height_px as u32));

        let header_bottom = self.draw_header(&mut frame, input, width_px);

        let cell_width = width_px / input.layout.cols as f64;
        let cell_height = (height_px - header_bottom) / input.layout.rows as f64;

        let shared_max = if input.layout.share_y {
            Some(self.group_max(input))
        } else {
            None
        };

        for (i, column_name) in input.group.columns().iter().enumerate() {
            let row = i / input.layout.cols;
            let col = i % input.layout.cols;
            let cell_x = col as f64 * cell_width;
            let cell_y = header_bottom + row as f64 * cell_height;

            // Unused trailing grid cells stay blank.
            self.draw_subplot(
                &mut frame,
                input,
                i,
                column_name,
                cell_x,
                cell_y,
                cell_width,
                cell_height,
                shared_max,
            );
        }

        frame.validate()?;

        Ok(ChartUnit {
            group_index: input.group_index,
            title: input.title.to_owned(),
            subtitle: input.subtitle.map(str::to_owned),
            frame,
        })
    }

    /// Draws the group title (wrapped to at most two lines) and subtitle.
    /// Returns the y coordinate where the subplot grid starts.
    fn draw_header(&self, frame: &mut RenderFrame, input: &GroupRenderInput<'_>, width_px: f64) -> f64 {
        let mut cursor = 10.0;

        let max_chars = max_chars_for(width_px * 0.9, TITLE_FONT_PX);
        for line in wrap_two_lines(input.title, max_chars) {
            cursor += TITLE_FONT_PX + 6.0;
            let mut text = TextPrimitive::new(
                line,
                width_px / 2.0,
                cursor,
                TITLE_FONT_PX,
                TEXT_COLOR,
                TextHAlign::Center,
            );
            if matches!(input.style.font_weight_title, FontWeight::Bold) {
                text = text.bold();
            }
            frame.push_text(text);
        }

        if let Some(subtitle) = input.subtitle {
            if !subtitle.is_empty() {
                cursor += SUBTITLE_FONT_PX + 8.0;
                frame.push_text(
                    TextPrimitive::new(
                        subtitle,
                        width_px / 2.0,
                        cursor,
                        SUBTITLE_FONT_PX,
                        TEXT_COLOR,
                        TextHAlign::Center,
                    )
                    .italic(),
                );
            }
        }

        cursor + 14.0
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_subplot(
        &self,
        frame: &mut RenderFrame,
        input: &GroupRenderInput<'_>,
        index: usize,
        column_name: &str,
        cell_x: f64,
        cell_y: f64,
        cell_width: f64,
        cell_height: f64,
        shared_max: Option<f64>,
    ) {
        let Some(values) = input.table.column(column_name) else {
            return;
        };
        let format = input.formats[index];
        let style = input.style.column(index);

        let plot_left = cell_x + CELL_PAD_LEFT;
        let plot_right = cell_x + cell_width - CELL_PAD_RIGHT;
        let plot_top = cell_y + CELL_PAD_TOP;
        let plot_bottom = cell_y + cell_height - CELL_PAD_BOTTOM;
        let plot_width = plot_right - plot_left;
        let plot_height = plot_bottom - plot_top;

        // Column title, wrapped to the cell width.
        let title_chars = max_chars_for(cell_width * 0.9, COLUMN_TITLE_FONT_PX);
        let mut title_y = cell_y + 4.0;
        for line in wrap_two_lines(&input.column_titles[index], title_chars) {
            title_y += COLUMN_TITLE_FONT_PX + 3.0;
            frame.push_text(
                TextPrimitive::new(
                    line,
                    cell_x + cell_width / 2.0,
                    title_y,
                    COLUMN_TITLE_FONT_PX,
                    TEXT_COLOR,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }

        let y_max = shared_max.unwrap_or_else(|| column_max(values)).max(f64::MIN_POSITIVE);

        // Grid lines and tick labels from the top of the range down.
        if input.style.grid_visible && input.style.grid_alpha > 0.0 {
            for division in 1..=GRID_DIVISIONS {
                let fraction = division as f64 / GRID_DIVISIONS as f64;
                let y = plot_bottom - fraction * plot_height;
                frame.push_line(
                    LinePrimitive::new(
                        plot_left,
                        y,
                        plot_right,
                        y,
                        1.0,
                        GRID_COLOR.with_alpha(input.style.grid_alpha),
                    )
                    .dashed(),
                );
                let tick = format.format(&CellValue::Number(y_max * fraction));
                if !tick.is_empty() {
                    frame.push_text(TextPrimitive::new(
                        tick,
                        plot_left - 6.0,
                        y + TICK_FONT_PX / 2.0,
                        TICK_FONT_PX,
                        TEXT_COLOR,
                        TextHAlign::Right,
                    ));
                }
            }
        }

        // Axes.
        frame.push_line(LinePrimitive::new(
            plot_left,
            plot_top,
            plot_left,
            plot_bottom,
            1.0,
            AXIS_COLOR,
        ));
        frame.push_line(LinePrimitive::new(
            plot_left,
            plot_bottom,
            plot_right,
            plot_bottom,
            1.0,
            AXIS_COLOR,
        ));

        // Y-axis label, rotated along the axis.
        let ylabel = &input.ylabels[index];
        if !ylabel.is_empty() {
            frame.push_text(
                TextPrimitive::new(
                    ylabel.clone(),
                    cell_x + 14.0,
                    (plot_top + plot_bottom) / 2.0,
                    LABEL_FONT_PX,
                    TEXT_COLOR,
                    TextHAlign::Center,
                )
                .rotated(-90.0),
            );
        }

        // Bars, value labels, and category ticks.
        let categories = input.table.index();
        let slot = plot_width / categories.len().max(1) as f64;
        let bar_width = slot * BAR_WIDTH_RATIO;
        let tick_chars = max_chars_for(slot, TICK_FONT_PX);

        for (j, cell) in values.iter().enumerate() {
            let bar_x = plot_left + slot * j as f64 + (slot - bar_width) / 2.0;
            let bar_center = bar_x + bar_width / 2.0;

            let numeric = cell.as_number().filter(|v| v.is_finite());
            let bar_height = numeric.map_or(0.0, |v| (v.max(0.0) / y_max) * plot_height);
            let bar_top = plot_bottom - bar_height;

            if bar_height > 0.0 {
                let mut rect = RectPrimitive::new(
                    bar_x,
                    bar_top,
                    bar_width,
                    bar_height,
                    style.fill.with_alpha(style.alpha),
                );
                if let Some(edge) = style.edge_color {
                    if style.edge_width > 0.0 {
                        rect = rect.with_edge(edge, style.edge_width);
                    }
                }
                frame.push_rect(rect);
            }

            // Value label above the bar, moved inside when it would
            // overflow the plot top.
            let label = format.format(cell);
            if !label.is_empty() {
                let above = bar_top - VALUE_LABEL_OFFSET_PX;
                let label_y = if above - VALUE_FONT_PX < plot_top {
                    bar_top + VALUE_FONT_PX + VALUE_LABEL_OFFSET_PX
                } else {
                    above
                };
                frame.push_text(
                    TextPrimitive::new(
                        label,
                        bar_center,
                        label_y,
                        VALUE_FONT_PX,
                        TEXT_COLOR,
                        TextHAlign::Center,
                    )
                    .bold(),
                );
            }

            if let Some(category) = categories.get(j) {
                let tick = truncate_label(category, tick_chars);
                if !tick.is_empty() {
                    frame.push_text(TextPrimitive::new(
                        tick,
                        bar_center,
                        plot_bottom + TICK_FONT_PX + 6.0,
                        TICK_FONT_PX,
                        TEXT_COLOR,
                        TextHAlign::Center,
                    ));
                }
            }
        }

        if let Some(xlabel) = input.xlabel {
            if !xlabel.is_empty() {
                frame.push_text(TextPrimitive::new(
                    xlabel,
                    (plot_left + plot_right) / 2.0,
                    plot_bottom + CELL_PAD_BOTTOM - 10.0,
                    LABEL_FONT_PX,
                    TEXT_COLOR,
                    TextHAlign::Center,
                ));
            }
        }
    }

    fn group_max(&self, input: &GroupRenderInput<'_>) -> f64 {
        input
            .group
            .columns()
            .iter()
            .filter_map(|name| input.table.column(name))
            .map(column_max)
            .fold(0.0, f64::max)
    }
}

fn column_max(values: &[CellValue]) -> f64 {
    values
        .iter()
        .filter_map(CellValue::as_number)
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

fn max_chars_for(width_px: f64, font_px: f64) -> usize {
    ((width_px / (font_px * GLYPH_ASPECT)) as usize).max(1)
}

/// Wraps at word boundaries to at most two lines; content beyond the second
/// line is truncated with an ellipsis marker.
fn wrap_two_lines(text: &str, max_chars: usize) -> Vec<String> {
    let wrapped = textwrap::wrap(text, max_chars);
    let mut lines: Vec<String> = wrapped
        .iter()
        .take(2)
        .map(|line| line.to_string())
        .collect();
    if wrapped.len() > 2 {
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines.retain(|line| !line.is_empty());
    lines
}

fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
