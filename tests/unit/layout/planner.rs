use super::*;

fn canvas(width: u32, height: u32) -> Size {
    Size::new(width, height).unwrap()
}

#[test]
fn grid_position_matches_row_major_formula() {
    let (s, c) = (100i64, 5u32);
    for i in [0u64, 4, 5, 11] {
        let expected = (
            50 + (i % u64::from(c)) as i64 * s,
            50 + (i / u64::from(c)) as i64 * s,
        );
        assert_eq!(grid_position(i, s, c).unwrap(), expected);
    }
    assert_eq!(grid_position(0, 100, 5).unwrap(), (50, 50));
    assert_eq!(grid_position(4, 100, 5).unwrap(), (450, 50));
    assert_eq!(grid_position(5, 100, 5).unwrap(), (50, 150));
    assert_eq!(grid_position(11, 100, 5).unwrap(), (150, 250));
}

#[test]
fn grid_position_is_pure_and_unbounded() {
    assert_eq!(
        grid_position(799, 100, 5).unwrap(),
        grid_position(799, 100, 5).unwrap()
    );
    // Row 159 sits far below a 400 px canvas; the planner does not clip.
    assert_eq!(grid_position(799, 100, 5).unwrap(), (450, 50 + 159 * 100));
}

#[test]
fn grid_position_rejects_zero_columns() {
    assert!(grid_position(3, 100, 0).is_err());
}

#[test]
fn random_position_stays_inside_margins() {
    let mut rng = Rng64::new(11);
    for _ in 0..500 {
        let ((x, y), deg) = random_position(canvas(200, 200), 20, 50, &mut rng).unwrap();
        assert!((50..=130).contains(&x));
        assert!((50..=130).contains(&y));
        assert!(deg <= 360);
    }
}

#[test]
fn random_position_fails_when_canvas_too_small() {
    let mut rng = Rng64::new(1);
    let err = random_position(canvas(100, 100), 40, 40, &mut rng).unwrap_err();
    assert!(matches!(err, ShowcaseError::Range(_)), "{err}");
}

#[test]
fn random_position_allows_single_point_range() {
    let mut rng = Rng64::new(1);
    let ((x, y), _) = random_position(canvas(100, 100), 20, 40, &mut rng).unwrap();
    assert_eq!((x, y), (40, 40));
}

#[test]
fn grid_plan_uses_grid_cells_and_bounded_rotation() {
    let mut rng = Rng64::new(3);
    let plan = LayoutStrategy::grid()
        .plan(800, canvas(1000, 400), 40, &mut rng)
        .unwrap();
    assert_eq!(plan.len(), 800);
    for (i, p) in plan.iter().enumerate() {
        assert_eq!(p.position(), grid_position(i as u64, 100, 5).unwrap());
        assert!(p.rotation_deg <= 270);
    }
}

#[test]
fn plan_is_reproducible_for_a_seed() {
    let strategy = LayoutStrategy::random();
    let a = strategy
        .plan(32, canvas(1000, 400), 40, &mut Rng64::new(99))
        .unwrap();
    let b = strategy
        .plan(32, canvas(1000, 400), 40, &mut Rng64::new(99))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn random_plan_propagates_range_error() {
    let mut rng = Rng64::new(5);
    let strategy = LayoutStrategy::Random {
        margin: 40,
        max_rotation_deg: 360,
    };
    assert!(strategy.plan(1, canvas(100, 100), 40, &mut rng).is_err());
    assert!(strategy.plan(0, canvas(100, 100), 40, &mut rng).unwrap().is_empty());
}

#[test]
fn strategy_serde_is_tagged_by_kind() {
    let json = serde_json::to_string(&LayoutStrategy::grid()).unwrap();
    assert!(json.contains("\"kind\":\"grid\""));
    let parsed: LayoutStrategy =
        serde_json::from_str(r#"{"kind":"random","margin":10,"max_rotation_deg":90}"#).unwrap();
    assert_eq!(
        parsed,
        LayoutStrategy::Random {
            margin: 10,
            max_rotation_deg: 90
        }
    );
    assert_eq!(parsed.name(), "random");
}

#[test]
fn validate_rejects_degenerate_strategies() {
    let bad = LayoutStrategy::Grid {
        spacing: 100,
        columns: 0,
        max_rotation_deg: 0,
    };
    assert!(bad.validate().is_err());
    let bad = LayoutStrategy::Random {
        margin: -1,
        max_rotation_deg: 0,
    };
    assert!(bad.validate().is_err());
    assert!(LayoutStrategy::default().validate().is_ok());
}
