use approx::assert_relative_eq;

use dashboard_rs::core::layout::resolve_share_y;
use dashboard_rs::core::{FormatClass, LayoutPlanner, LayoutTuning};
use dashboard_rs::error::DashboardError;

const PCT: FormatClass = FormatClass::Percentage { fractional: true };
const PCT_UNSCALED: FormatClass = FormatClass::Percentage { fractional: false };
const COUNT: FormatClass = FormatClass::Count;

#[test]
fn explicit_hints_are_used_verbatim() {
    let plan = LayoutPlanner::new()
        .plan(5, Some(2), Some(3))
        .expect("valid hints");
    assert_eq!((plan.rows, plan.cols), (2, 3));
}

#[test]
fn insufficient_hints_fail_with_layout_error() {
    let result = LayoutPlanner::new().plan(7, Some(2), Some(3));
    assert!(matches!(
        result,
        Err(DashboardError::Layout {
            rows: 2,
            cols: 3,
            slots: 7
        })
    ));
}

#[test]
fn zero_hints_fail_with_layout_error() {
    assert!(LayoutPlanner::new().plan(3, Some(0), None).is_err());
    assert!(LayoutPlanner::new().plan(3, None, Some(0)).is_err());
}

#[test]
fn single_hint_derives_the_other_dimension() {
    let planner = LayoutPlanner::new();

    let plan = planner.plan(7, Some(2), None).expect("row hint");
    assert_eq!((plan.rows, plan.cols), (2, 4));

    let plan = planner.plan(7, None, Some(2)).expect("col hint");
    assert_eq!((plan.rows, plan.cols), (4, 2));
}

#[test]
fn near_square_grid_for_seven_slots() {
    // Two defensible policies exist for slot_count = 7:
    //   (a) minimize waste first: (4, 2) wastes 1 cell but is taller than
    //       wide;
    //   (b) cols = ceil(sqrt(n)), rows = ceil(n / cols): (3, 3) wastes 2
    //       cells but keeps the wide bias.
    // The planner implements (b); this test pins the choice and the
    // invariants both policies share.
    let plan = LayoutPlanner::new().plan(7, None, None).expect("auto plan");

    assert!(plan.capacity() >= 7);
    assert!(plan.cols >= plan.rows);
    assert_eq!((plan.rows, plan.cols), (3, 3));
}

#[test]
fn auto_grids_stay_wide_biased() {
    let planner = LayoutPlanner::new();
    let expected = [
        (1, (1, 1)),
        (2, (1, 2)),
        (3, (2, 2)),
        (4, (2, 2)),
        (5, (2, 3)),
        (6, (2, 3)),
        (9, (3, 3)),
        (10, (3, 4)),
    ];
    for (slots, (rows, cols)) in expected {
        let plan = planner.plan(slots, None, None).expect("auto plan");
        assert_eq!(
            (plan.rows, plan.cols),
            (rows, cols),
            "unexpected grid for {slots} slots"
        );
    }
}

#[test]
fn repeated_plans_are_identical() {
    let planner = LayoutPlanner::new();
    let first = planner.plan(7, None, None).expect("first");
    let second = planner.plan(7, None, None).expect("second");
    assert_eq!(first, second);
}

#[test]
fn single_chart_groups_get_the_minimum_figure() {
    let plan = LayoutPlanner::new().plan(1, None, None).expect("plan");
    let tuning = LayoutTuning::default();
    assert_relative_eq!(plan.figure_width, tuning.min_width);
    assert_relative_eq!(plan.figure_height, tuning.min_height);
}

#[test]
fn mid_size_grids_scale_linearly() {
    let plan = LayoutPlanner::new().plan(9, None, None).expect("plan");
    let tuning = LayoutTuning::default();
    assert_relative_eq!(plan.figure_width, 3.0 * tuning.unit_width);
    assert_relative_eq!(plan.figure_height, 3.0 * tuning.unit_height);
}

#[test]
fn oversized_grids_clamp_the_worse_dimension_and_keep_aspect() {
    // 4x4 raw size is 16x12: height overshoots its ceiling by the larger
    // ratio, so height clamps to 10 and width follows the 16/12 aspect.
    let plan = LayoutPlanner::new()
        .plan(16, Some(4), Some(4))
        .expect("plan");
    assert_relative_eq!(plan.figure_height, 10.0);
    assert_relative_eq!(plan.figure_width, 10.0 * (16.0 / 12.0), epsilon = 1e-9);

    // One long row overshoots width first.
    let plan = LayoutPlanner::new()
        .plan(6, Some(1), Some(6))
        .expect("plan");
    assert_relative_eq!(plan.figure_width, 16.0);
    assert_relative_eq!(plan.figure_height, 16.0 * (3.0 / 24.0), epsilon = 1e-9);
}

#[test]
fn zero_slots_are_rejected() {
    assert!(matches!(
        LayoutPlanner::new().plan(0, None, None),
        Err(DashboardError::Configuration(_))
    ));
}

#[test]
fn share_y_defaults_true_for_uniform_groups() {
    assert!(resolve_share_y(None, &[COUNT, COUNT]));
    assert!(resolve_share_y(None, &[PCT, PCT_UNSCALED]));
    assert!(resolve_share_y(None, &[]));
}

#[test]
fn share_y_request_is_honored_for_uniform_groups() {
    assert!(!resolve_share_y(Some(false), &[COUNT, COUNT]));
    assert!(resolve_share_y(Some(true), &[PCT, PCT]));
}

#[test]
fn mixed_groups_force_share_y_off_even_when_requested() {
    // The override is honored over the request: mixing percentage and
    // count bars on a shared y-axis is disallowed.
    assert!(!resolve_share_y(Some(true), &[PCT, COUNT]));
    assert!(!resolve_share_y(None, &[PCT, COUNT]));
}
