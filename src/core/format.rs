use serde::{Deserialize, Serialize};

use crate::core::table::CellValue;

/// Column-name substrings that mark percentage data when the value range
/// alone is inconclusive.
const PERCENT_MARKERS: [&str; 4] = ["%", "percent", "pct", "rate"];

/// Caller-supplied formatting fragment. Unset fields are inferred from the
/// column's data shape at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueFormatSpec {
    #[serde(default)]
    pub is_percentage: Option<bool>,
    #[serde(default)]
    pub precision: Option<u8>,
}

/// How a column's values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    /// Percentage display. `fractional` means the stored values live in
    /// [0, 1] and are multiplied by 100 for display only; the bar height
    /// keeps the raw value.
    Percentage { fractional: bool },
    Count,
}

impl FormatClass {
    #[must_use]
    pub fn is_percentage(self) -> bool {
        matches!(self, Self::Percentage { .. })
    }
}

/// Resolved per-column format: class plus decimal precision.
///
/// Precision is derived once from the column's maximum absolute display
/// value, not per cell, so all bars in one column align on the decimal
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    pub class: FormatClass,
    pub precision: u8,
}

impl ColumnFormat {
    /// Infers the display format for one column, honoring any explicit
    /// fields in `spec`.
    ///
    /// Detection precedence is range first, marker token second: values all
    /// in [0, 1] are fractional percentages; values all in [0, 100] are
    /// percentages only when the column name carries a marker token.
    /// Anything else is a count. The bias toward counts is deliberate so
    /// legitimate small counts are never silently rescaled.
    #[must_use]
    pub fn infer(values: &[CellValue], column_name: &str, spec: Option<&ValueFormatSpec>) -> Self {
        let numeric = finite_numbers(values);

        let class = match spec.and_then(|s| s.is_percentage) {
            Some(true) => FormatClass::Percentage {
                fractional: all_in_range(&numeric, 0.0, 1.0),
            },
            Some(false) => FormatClass::Count,
            None => infer_class(&numeric, column_name),
        };

        let precision = match spec.and_then(|s| s.precision) {
            Some(precision) => precision,
            None => infer_precision(&numeric, class),
        };

        Self { class, precision }
    }

    /// Formats one cell for display. The numeric value itself is never
    /// mutated; scaling applies to the rendered text only.
    #[must_use]
    pub fn format(&self, cell: &CellValue) -> String {
        match cell {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) if value.is_nan() => "N/A".to_owned(),
            CellValue::Number(value) => match self.class {
                FormatClass::Percentage { fractional } => {
                    let display = if fractional { value * 100.0 } else { *value };
                    format!("{display:.prec$}%", prec = usize::from(self.precision))
                }
                FormatClass::Count => {
                    let text = format!("{value:.prec$}", prec = usize::from(self.precision));
                    if self.precision == 0 {
                        group_thousands(&text)
                    } else {
                        text
                    }
                }
            },
        }
    }
}

/// True when every numeric value is a whole number within rounding noise.
/// Drives the "Count" vs "Value" y-label fallback.
#[must_use]
pub fn all_integers(values: &[CellValue]) -> bool {
    let numeric = finite_numbers(values);
    !numeric.is_empty() && numeric.iter().all(|v| (v - v.round()).abs() < 0.01)
}

/// Finds any cell that is not numeric, for per-column data-type recovery.
#[must_use]
pub fn first_non_numeric(values: &[CellValue]) -> Option<&str> {
    values.iter().find_map(CellValue::display_text)
}

fn infer_class(numeric: &[f64], column_name: &str) -> FormatClass {
    if numeric.is_empty() {
        return FormatClass::Count;
    }
    if all_in_range(numeric, 0.0, 1.0) {
        return FormatClass::Percentage { fractional: true };
    }
    if all_in_range(numeric, 0.0, 100.0) && has_percent_marker(column_name) {
        return FormatClass::Percentage { fractional: false };
    }
    FormatClass::Count
}

fn infer_precision(numeric: &[f64], class: FormatClass) -> u8 {
    let scale = match class {
        FormatClass::Percentage { fractional: true } => 100.0,
        _ => 1.0,
    };
    let max_abs = numeric
        .iter()
        .map(|v| (v * scale).abs())
        .fold(0.0_f64, f64::max);

    if max_abs >= 1000.0 {
        0
    } else if max_abs >= 1.0 {
        if class.is_percentage() { 1 } else { 0 }
    } else {
        2
    }
}

fn has_percent_marker(column_name: &str) -> bool {
    let lowered = column_name.to_lowercase();
    PERCENT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

fn all_in_range(numeric: &[f64], low: f64, high: f64) -> bool {
    !numeric.is_empty() && numeric.iter().all(|v| (low..=high).contains(v))
}

fn finite_numbers(values: &[CellValue]) -> Vec<f64> {
    values
        .iter()
        .filter_map(CellValue::as_number)
        .filter(|v| v.is_finite())
        .collect()
}

fn group_thousands(text: &str) -> String {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}
