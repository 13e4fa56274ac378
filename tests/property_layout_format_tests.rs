use dashboard_rs::core::{CellValue, ColumnFormat, FormatClass, LayoutPlanner, LayoutTuning};
use proptest::prelude::*;

proptest! {
    #[test]
    fn auto_plans_hold_every_slot_with_a_wide_bias(slots in 1usize..=100) {
        let plan = LayoutPlanner::new()
            .plan(slots, None, None)
            .expect("auto plan");

        prop_assert!(plan.capacity() >= slots);
        prop_assert!(plan.cols >= plan.rows);
        // The last row is never entirely empty.
        prop_assert!(plan.capacity() - slots < plan.cols);
    }

    #[test]
    fn figure_sizes_stay_within_the_tuning_bounds(slots in 1usize..=100) {
        let tuning = LayoutTuning::default();
        let plan = LayoutPlanner::new()
            .plan(slots, None, None)
            .expect("auto plan");

        prop_assert!(plan.figure_width >= tuning.min_width);
        prop_assert!(plan.figure_height >= tuning.min_height);
        prop_assert!(plan.figure_width <= tuning.max_width + 1e-9);
        prop_assert!(plan.figure_height <= tuning.max_height + 1e-9);
    }

    #[test]
    fn planning_is_deterministic(slots in 1usize..=100) {
        let planner = LayoutPlanner::new();
        let first = planner.plan(slots, None, None).expect("first");
        let second = planner.plan(slots, None, None).expect("second");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fractional_columns_always_format_as_percentages(
        values in proptest::collection::vec(0.0f64..=1.0, 1..20)
    ) {
        let cells: Vec<CellValue> = values.iter().copied().map(CellValue::Number).collect();
        let format = ColumnFormat::infer(&cells, "Utilization", None);

        prop_assert_eq!(format.class, FormatClass::Percentage { fractional: true });
        for cell in &cells {
            let rendered = format.format(cell);
            prop_assert!(rendered.ends_with('%'), "{}", rendered);
            let numeric: f64 = rendered
                .trim_end_matches('%')
                .replace(',', "")
                .parse()
                .expect("numeric prefix");
            prop_assert!((0.0..=100.0).contains(&numeric));
        }
    }

    #[test]
    fn count_labels_are_parseable_after_ungrouping(
        values in proptest::collection::vec(101.0f64..1e9, 1..20)
    ) {
        let cells: Vec<CellValue> = values.iter().copied().map(CellValue::Number).collect();
        let format = ColumnFormat::infer(&cells, "Accounts", None);

        prop_assert_eq!(format.class, FormatClass::Count);
        for cell in &cells {
            let rendered = format.format(cell);
            let numeric: f64 = rendered.replace(',', "").parse().expect("numeric label");
            prop_assert!(numeric.is_finite());
        }
    }
}
