use dashboard_rs::core::format::{all_integers, first_non_numeric};
use dashboard_rs::core::{CellValue, ColumnFormat, FormatClass, ValueFormatSpec};

fn numbers(values: &[f64]) -> Vec<CellValue> {
    values.iter().copied().map(CellValue::Number).collect()
}

#[test]
fn fractional_range_infers_percentage() {
    let values = numbers(&[0.25, 0.5]);
    let format = ColumnFormat::infer(&values, "Conversion", None);

    assert_eq!(format.class, FormatClass::Percentage { fractional: true });
    assert_eq!(format.precision, 1);
    assert_eq!(format.format(&values[0]), "25.0%");
    assert_eq!(format.format(&values[1]), "50.0%");
}

#[test]
fn fractional_range_wins_without_marker_token() {
    // Range takes precedence: [0, 1] data is percentage even when the
    // column name carries no marker.
    let values = numbers(&[0.0, 1.0]);
    let format = ColumnFormat::infer(&values, "Share of wallet", None);

    assert_eq!(format.class, FormatClass::Percentage { fractional: true });
    assert_eq!(format.format(&values[1]), "100.0%");
}

#[test]
fn marker_token_breaks_the_zero_to_hundred_tie() {
    let values = numbers(&[45.0, 80.0]);

    let with_marker = ColumnFormat::infer(&values, "Growth Rate", None);
    assert_eq!(
        with_marker.class,
        FormatClass::Percentage { fractional: false }
    );
    assert_eq!(with_marker.format(&values[0]), "45.0%");

    let without_marker = ColumnFormat::infer(&values, "Growth", None);
    assert_eq!(without_marker.class, FormatClass::Count);
    assert_eq!(without_marker.format(&values[0]), "45");
}

#[test]
fn marker_tokens_match_case_insensitively() {
    let values = numbers(&[12.0, 99.0]);
    for name in ["NPA %", "Attrition PERCENT", "churn_pct", "Run RATE"] {
        let format = ColumnFormat::infer(&values, name, None);
        assert!(
            format.class.is_percentage(),
            "`{name}` should detect a percentage marker"
        );
    }
}

#[test]
fn ambiguous_range_defaults_to_count() {
    // Values above 100 can never be unscaled percentages without an
    // explicit override; small counts must not be silently rescaled.
    let values = numbers(&[3.0, 250.0]);
    let format = ColumnFormat::infer(&values, "Branch Rate", None);
    assert_eq!(format.class, FormatClass::Count);
}

#[test]
fn large_magnitudes_get_zero_precision_for_any_class() {
    let counts = numbers(&[2345.6, 999.0]);
    let count_format = ColumnFormat::infer(&counts, "Accounts", None);
    assert_eq!(count_format.precision, 0);
    assert_eq!(count_format.format(&counts[0]), "2,346");

    let spec = ValueFormatSpec {
        is_percentage: Some(true),
        precision: None,
    };
    let pct_format = ColumnFormat::infer(&numbers(&[1500.0]), "Index", Some(&spec));
    assert!(pct_format.class.is_percentage());
    assert_eq!(pct_format.precision, 0);
}

#[test]
fn sub_unit_counts_get_two_decimals() {
    let values = numbers(&[-0.5, 0.25]);
    let format = ColumnFormat::infer(&values, "Delta", None);

    assert_eq!(format.class, FormatClass::Count);
    assert_eq!(format.precision, 2);
    assert_eq!(format.format(&values[0]), "-0.50");
}

#[test]
fn precision_is_per_column_not_per_value() {
    // The small value alone would get 2 decimals, but the column max
    // drives a single shared precision for aligned labels.
    let values = numbers(&[0.4, 1500.0]);
    let format = ColumnFormat::infer(&values, "Volume", None);

    assert_eq!(format.precision, 0);
    assert_eq!(format.format(&values[0]), "0");
    assert_eq!(format.format(&values[1]), "1,500");
}

#[test]
fn thousands_are_grouped_for_integer_counts() {
    let values = numbers(&[1234567.0]);
    let format = ColumnFormat::infer(&values, "Customers", None);
    assert_eq!(format.format(&values[0]), "1,234,567");
}

#[test]
fn explicit_spec_overrides_inference() {
    let values = numbers(&[0.25, 0.5]);
    let spec = ValueFormatSpec {
        is_percentage: Some(false),
        precision: None,
    };
    let format = ColumnFormat::infer(&values, "Conversion", Some(&spec));

    assert_eq!(format.class, FormatClass::Count);
    assert_eq!(format.format(&values[0]), "0.25");

    let spec = ValueFormatSpec {
        is_percentage: None,
        precision: Some(3),
    };
    let format = ColumnFormat::infer(&values, "Conversion", Some(&spec));
    assert_eq!(format.format(&values[1]), "50.000%");
}

#[test]
fn nan_renders_as_not_available() {
    let values = vec![CellValue::Number(f64::NAN), CellValue::Number(10.0)];
    let format = ColumnFormat::infer(&values, "Units", None);
    assert_eq!(format.format(&values[0]), "N/A");
    assert_eq!(format.format(&values[1]), "10");
}

#[test]
fn text_cells_render_literally() {
    let values = vec![CellValue::from("pending"), CellValue::Number(4.0)];
    let format = ColumnFormat::infer(&values, "Status", None);

    assert_eq!(format.format(&values[0]), "pending");
    assert_eq!(first_non_numeric(&values), Some("pending"));
}

#[test]
fn integer_detection_tolerates_rounding_noise() {
    assert!(all_integers(&numbers(&[1.0, 2.001, 300.0])));
    assert!(!all_integers(&numbers(&[1.5, 2.0])));
    assert!(!all_integers(&[CellValue::from("x")]));
}
