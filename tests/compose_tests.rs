use dashboard_rs::api::{DashboardComposer, DashboardConfig, LayoutHint};
use dashboard_rs::core::{CellValue, Color, ColumnGroup, DataTable};
use dashboard_rs::error::DashboardError;
use dashboard_rs::render::SvgRenderer;

fn metrics_table() -> DataTable {
    DataTable::new(vec!["Q1".into(), "Q2".into(), "Q3".into()])
        .with_index_name("Quarter")
        .with_column(
            "Revenue",
            vec![
                CellValue::Number(1200.0),
                CellValue::Number(1500.0),
                CellValue::Number(900.0),
            ],
        )
        .expect("revenue column")
        .with_column(
            "Margin",
            vec![
                CellValue::Number(0.21),
                CellValue::Number(0.25),
                CellValue::Number(0.3),
            ],
        )
        .expect("margin column")
        .with_column(
            "Status",
            vec![
                CellValue::from("on track"),
                CellValue::Number(2.0),
                CellValue::from("delayed"),
            ],
        )
        .expect("status column")
}

fn group(names: &[&str]) -> ColumnGroup {
    ColumnGroup::new(names.iter().map(|&n| n.to_owned()).collect()).expect("non-empty group")
}

#[test]
fn compose_produces_one_unit_per_group_in_order() {
    let table = metrics_table();
    let config = DashboardConfig::new("Q4 Review", vec![group(&["Revenue"]), group(&["Margin"])]);

    let artifact = DashboardComposer::new()
        .compose(&table, &config)
        .expect("compose");

    assert_eq!(artifact.sheet_name, "Q4 Review");
    assert_eq!(artifact.units.len(), 2);
    assert_eq!(artifact.units[0].group_index, 0);
    assert_eq!(artifact.units[1].group_index, 1);
    assert!(!artifact.has_warnings());
}

#[test]
fn default_titles_follow_the_sheet_and_group_index() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Revenue"]), group(&["Margin"])]);

    let artifact = DashboardComposer::new()
        .compose(&table, &config)
        .expect("compose");

    assert_eq!(artifact.units[0].title, "Dashboard Lending Analysis - Group 1");
    assert_eq!(artifact.units[1].title, "Dashboard Lending Analysis - Group 2");
    assert_eq!(artifact.units[0].subtitle, None);
}

#[test]
fn custom_titles_and_subtitles_override_the_defaults() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Revenue"])])
        .with_custom_title(0, "Quarterly Revenue")
        .with_custom_subtitle(0, "INR crore, unaudited");

    let artifact = DashboardComposer::new()
        .compose(&table, &config)
        .expect("compose");

    assert_eq!(artifact.units[0].title, "Quarterly Revenue");
    assert_eq!(
        artifact.units[0].subtitle.as_deref(),
        Some("INR crore, unaudited")
    );
}

#[test]
fn compose_is_deterministic_and_idempotent() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Revenue", "Margin"])]);
    let composer = DashboardComposer::new();

    let first = composer.compose(&table, &config).expect("first compose");
    let second = composer.compose(&table, &config).expect("second compose");
    assert_eq!(first, second);

    let first_svg = SvgRenderer::document(&first.units[0].frame).expect("first svg");
    let second_svg = SvgRenderer::document(&second.units[0].frame).expect("second svg");
    assert_eq!(first_svg, second_svg);
}

#[test]
fn schemes_cycle_across_groups() {
    let table = metrics_table();
    let config = DashboardConfig::new(
        "Lending",
        vec![group(&["Revenue"]), group(&["Margin"]), group(&["Revenue"])],
    )
    .with_color_schemes(vec!["corporate".into(), "vibrant".into()]);

    let artifact = DashboardComposer::new()
        .compose(&table, &config)
        .expect("compose");

    // First bar fill of each unit reveals the scheme: corporate, vibrant,
    // then corporate again, each at the default bar alpha.
    let corporate0 = Color::from_rgb8(0x00, 0x3f, 0x5c).with_alpha(0.9);
    let vibrant0 = Color::from_rgb8(0x1f, 0x77, 0xb4).with_alpha(0.9);
    assert_eq!(artifact.units[0].frame.rects[0].fill, corporate0);
    assert_eq!(artifact.units[1].frame.rects[0].fill, vibrant0);
    assert_eq!(artifact.units[2].frame.rects[0].fill, corporate0);
}

#[test]
fn bad_column_recovers_with_exactly_one_warning() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Status", "Revenue"])]);

    let artifact = DashboardComposer::new()
        .compose(&table, &config)
        .expect("compose succeeds despite the bad column");

    assert_eq!(artifact.warnings.len(), 1);
    let warning = &artifact.warnings[0];
    assert_eq!(warning.group_index, 0);
    assert_eq!(warning.column, "Status");
    assert!(warning.message.contains("on track"));

    // The numeric sibling still renders: three revenue bars plus the one
    // numeric cell of the bad column.
    assert_eq!(artifact.units[0].frame.rects.len(), 4);
}

#[test]
fn override_keys_outside_the_group_range_fail_fast() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Revenue"])])
        .with_custom_title(3, "dangling");

    let result = DashboardComposer::new().compose(&table, &config);
    match result {
        Err(DashboardError::Configuration(message)) => {
            assert!(message.contains("custom_titles"));
            assert!(message.contains('3'));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn unknown_group_columns_fail_the_whole_compose() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Revenue", "Ghost"])]);

    let result = DashboardComposer::new().compose(&table, &config);
    assert!(matches!(result, Err(DashboardError::Configuration(_))));
}

#[test]
fn unknown_scheme_fails_before_any_rendering() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Revenue"])])
        .with_color_schemes(vec!["neon".into()]);

    let result = DashboardComposer::new().compose(&table, &config);
    assert!(matches!(result, Err(DashboardError::Configuration(_))));
}

#[test]
fn impossible_layout_hint_fails_the_group_and_the_call() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", vec![group(&["Revenue", "Margin"])])
        .with_layout_hint(
            0,
            LayoutHint {
                rows: Some(1),
                cols: Some(1),
                share_y: None,
            },
        );

    let result = DashboardComposer::new().compose(&table, &config);
    assert!(matches!(result, Err(DashboardError::Layout { .. })));
}

#[test]
fn empty_group_list_yields_an_empty_artifact() {
    let table = metrics_table();
    let config = DashboardConfig::new("Lending", Vec::new());

    let artifact = DashboardComposer::new()
        .compose(&table, &config)
        .expect("compose");
    assert!(artifact.units.is_empty());
    assert!(artifact.warnings.is_empty());
}
