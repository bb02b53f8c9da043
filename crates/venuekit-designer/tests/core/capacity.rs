use proptest::prelude::*;
use venuekit_core::TableType;
use venuekit_designer::capacity::{compute_capacity, infer_table_type, Footprint};

#[test]
fn test_standard_templates() {
    assert_eq!(compute_capacity(TableType::Round, &Footprint::circle(180.0)), 9);
    assert_eq!(compute_capacity(TableType::Square, &Footprint::rectangle(120.0, 120.0)), 8);
    assert_eq!(compute_capacity(TableType::Imperial, &Footprint::rectangle(240.0, 100.0)), 10);
    assert_eq!(compute_capacity(TableType::Cocktail, &Footprint::circle(70.0)), 4);
    assert_eq!(compute_capacity(TableType::Auxiliary, &Footprint::rectangle(180.0, 75.0)), 0);
}

#[test]
fn test_minimums() {
    assert_eq!(compute_capacity(TableType::Square, &Footprint::rectangle(40.0, 40.0)), 4);
    assert_eq!(compute_capacity(TableType::Imperial, &Footprint::rectangle(100.0, 50.0)), 6);
}

#[test]
fn test_inference_is_orientation_independent() {
    let wide = Footprint::rectangle(240.0, 100.0);
    let tall = Footprint::rectangle(100.0, 240.0);
    assert_eq!(infer_table_type(None, &wide), TableType::Imperial);
    assert_eq!(infer_table_type(None, &tall), TableType::Imperial);
    assert_eq!(infer_table_type(None, &Footprint::circle(50.0)), TableType::Round);
}

proptest! {
    #[test]
    fn round_capacity_never_shrinks(d in 30.0f64..3000.0, grow in 0.0f64..500.0) {
        let small = compute_capacity(TableType::Round, &Footprint::circle(d));
        let large = compute_capacity(TableType::Round, &Footprint::circle(d + grow));
        prop_assert!(large >= small);
    }

    #[test]
    fn imperial_capacity_never_shrinks(
        long in 200.0f64..3000.0,
        short in 30.0f64..150.0,
        grow in 0.0f64..50.0,
    ) {
        let base = compute_capacity(TableType::Imperial, &Footprint::rectangle(long, short));
        let longer = compute_capacity(TableType::Imperial, &Footprint::rectangle(long + grow, short));
        let wider = compute_capacity(TableType::Imperial, &Footprint::rectangle(long, short + grow));
        prop_assert!(longer >= base);
        prop_assert!(wider >= base);
    }
}
