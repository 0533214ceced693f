use keycurve_core::{Curve, CurveError, Extrema, HermiteCurve, Key, TangentMode};

fn times(curve: &HermiteCurve) -> Vec<f64> {
    curve.iter().map(|k| k.time).collect()
}

fn three_keys() -> HermiteCurve {
    Curve::from_keys([Key::new(0.0, 0.0), Key::new(1.0, 1.0), Key::new(2.0, 4.0)])
}

#[test]
fn add_key_inserts_in_time_order() {
    let mut curve = HermiteCurve::new();
    assert_eq!(curve.add_key(Key::new(2.0, 20.0)), Ok(0));
    assert_eq!(curve.add_key(Key::new(0.0, 0.0)), Ok(0));
    assert_eq!(curve.add_key(Key::new(1.0, 10.0)), Ok(1));
    assert_eq!(times(&curve), vec![0.0, 1.0, 2.0]);
    assert_eq!(curve.first_time(), 0.0);
    assert_eq!(curve.last_value(), 20.0);
}

#[test]
fn add_key_rejects_duplicate_time() {
    let mut curve = three_keys();
    let version = curve.version();
    let err = curve.add_key(Key::new(1.0, 99.0)).unwrap_err();
    assert_eq!(err, CurveError::DuplicateTime { time: 1.0 });
    assert!(err.is_recoverable());
    assert_eq!(curve.len(), 3);
    assert_eq!(curve[1].value, 1.0);
    assert_eq!(curve.version(), version);
}

#[test]
fn add_or_replace_overwrites_in_place() {
    let mut curve = three_keys();
    assert_eq!(curve.add_or_replace_key(Key::new(1.0, 99.0)), Ok(1));
    assert_eq!(curve.len(), 3);
    assert_eq!(curve[1].value, 99.0);
    assert_eq!(curve.evaluate(1.0), 99.0);

    assert_eq!(curve.add_or_replace_key(Key::new(1.5, 7.0)), Ok(2));
    assert_eq!(curve.len(), 4);
}

#[test]
fn replace_key_with_same_time_stays_put() {
    let mut curve = three_keys();
    assert_eq!(curve.replace_key(1, Key::new(1.0, -1.0)), Ok(1));
    assert_eq!(curve[1].value, -1.0);
    assert_eq!(times(&curve), vec![0.0, 1.0, 2.0]);
}

#[test]
fn replace_key_resorts_when_time_moves() {
    let mut curve = three_keys();
    assert_eq!(curve.replace_key(0, Key::new(3.0, 9.0)), Ok(2));
    assert_eq!(times(&curve), vec![1.0, 2.0, 3.0]);
    assert_eq!(curve.evaluate(3.0), 9.0);
    assert_eq!(curve.evaluate(0.0), 1.0);
}

#[test]
fn replace_key_collision_leaves_curve_untouched() {
    let mut curve = three_keys();
    let before = curve.keys().to_vec();
    let version = curve.version();
    let err = curve.replace_key(0, Key::new(2.0, 5.0)).unwrap_err();
    assert_eq!(err, CurveError::DuplicateTime { time: 2.0 });
    assert_eq!(curve.keys(), before.as_slice());
    assert_eq!(curve.version(), version);
}

#[test]
fn out_of_range_index_is_an_error() {
    let mut curve = three_keys();
    let expected = CurveError::IndexOutOfRange { index: 5, len: 3 };
    assert_eq!(curve.remove_key(5).unwrap_err(), expected);
    assert_eq!(curve.replace_key(5, Key::new(9.0, 0.0)).unwrap_err(), expected);
    assert_eq!(
        curve.set_key_tangent_mode(5, TangentMode::Flat).unwrap_err(),
        expected
    );
    assert!(!expected.is_recoverable());
    assert_eq!(curve.len(), 3);
}

#[test]
#[should_panic]
fn indexing_past_the_end_panics() {
    let curve = three_keys();
    let _key = curve[3];
}

#[test]
fn remove_key_shifts_following_keys() {
    let mut curve = three_keys();
    let removed = curve.remove_key(1).unwrap();
    assert_eq!(removed.time, 1.0);
    assert_eq!(times(&curve), vec![0.0, 2.0]);
    assert_eq!(curve[1].value, 4.0);
}

#[test]
fn non_finite_times_are_rejected() {
    let mut curve = three_keys();
    assert_eq!(
        curve.add_key(Key::new(f64::NAN, 0.0)).unwrap_err().category(),
        "validation"
    );
    assert!(curve.add_or_replace_key(Key::new(f64::INFINITY, 0.0)).is_err());
    assert_eq!(curve.len(), 3);
}

#[test]
fn bulk_construction_sorts_and_keeps_first_duplicate() {
    let curve = HermiteCurve::from_keys([
        Key::new(3.0, 30.0),
        Key::new(1.0, 10.0),
        Key::new(3.0, 31.0),
        Key::new(2.0, 20.0),
        Key::new(1.0, 11.0),
    ]);
    let pairs: Vec<(f64, f64)> = curve.iter().map(|k| (k.time, k.value)).collect();
    assert_eq!(pairs, vec![(1.0, 10.0), (2.0, 20.0), (3.0, 30.0)]);
}

#[test]
fn every_mutation_advances_the_version() {
    let mut curve = HermiteCurve::new();
    let mut last = curve.version();
    let mut check = |curve: &HermiteCurve| {
        assert!(curve.version() > last);
        last = curve.version();
    };

    curve.add_key(Key::new(0.0, 0.0)).unwrap();
    check(&curve);
    curve.add_or_replace_key(Key::new(1.0, 1.0)).unwrap();
    check(&curve);
    curve.replace_key(1, Key::new(2.0, 1.0)).unwrap();
    check(&curve);
    curve.set_keys_tangent_mode(TangentMode::Smooth);
    check(&curve);
    curve.set_auto_tangents(true);
    check(&curve);
    curve.adjust_tangents();
    check(&curve);
    curve.remove_key(0).unwrap();
    check(&curve);
    curve.clear();
    check(&curve);
}

#[test]
fn tangent_mode_bits_accept_single_flags_only() {
    let mut curve = three_keys();
    let version = curve.version();
    let group = TangentMode::ManualDissociated.bits() | TangentMode::ManualEqual.bits();
    assert!(!curve.set_keys_tangent_mode_bits(group));
    assert_eq!(curve.version(), version);
    assert!(curve
        .iter()
        .all(|k| k.tangent_mode == TangentMode::ManualDissociated));

    assert!(curve.set_keys_tangent_mode_bits(TangentMode::Flat.bits()));
    assert!(curve.iter().all(|k| k.tangent_mode == TangentMode::Flat));
}

#[test]
fn cursor_detects_mutation_between_steps() {
    let mut curve = three_keys();
    let mut cursor = curve.cursor();
    assert_eq!(cursor.advance(&curve).unwrap().unwrap().time, 0.0);
    assert_eq!(cursor.position(), 1);

    curve.add_key(Key::new(0.5, 0.5)).unwrap();
    match cursor.advance(&curve) {
        Some(Err(CurveError::ConcurrentModification { expected, found })) => {
            assert!(found > expected);
        }
        other => panic!("expected concurrent modification, got {other:?}"),
    }
}

#[test]
fn cursor_walks_all_keys_then_stops() {
    let curve = three_keys();
    let mut cursor = curve.cursor();
    let mut seen = Vec::new();
    while let Some(step) = cursor.advance(&curve) {
        seen.push(step.unwrap().value);
    }
    assert_eq!(seen, vec![0.0, 1.0, 4.0]);
    assert!(cursor.advance(&curve).is_none());
}

#[test]
fn clones_are_independent() {
    let original = three_keys();
    let mut copy = original.clone();
    copy.add_or_replace_key(Key::new(1.0, 50.0)).unwrap();
    assert_eq!(original.evaluate(1.0), 1.0);
    assert_eq!(copy.evaluate(1.0), 50.0);
}

#[test]
fn emptied_curve_returns_zero_defaults() {
    let mut curve = three_keys();
    while !curve.is_empty() {
        curve.remove_key(0).unwrap();
    }
    assert_eq!(curve.evaluate(1.0), 0.0);
    assert_eq!(curve.evaluate_unclamped(1.0), 0.0);
    assert_eq!(curve.find_tangent(1.0), 0.0);
    assert_eq!(curve.find_min_max(), Extrema::default());
    assert!(curve.create_tangent_key(0.5).is_none());
    assert_eq!(
        (curve.first_time(), curve.first_value(), curve.last_time(), curve.last_value()),
        (0.0, 0.0, 0.0, 0.0)
    );
}

#[test]
fn single_key_curve_is_constant() {
    let curve = HermiteCurve::from_keys([Key::with_tangents(2.0, 7.0, 1.0, -1.0)]);
    assert_eq!(curve.evaluate(-10.0), 7.0);
    assert_eq!(curve.evaluate(10.0), 7.0);
    assert_eq!(curve.evaluate_unclamped(10.0), 7.0);
    assert_eq!(curve.find_tangent(0.0), -1.0);
    assert_eq!(curve.find_tangent(5.0), 1.0);
    let extrema = curve.find_min_max();
    assert_eq!(
        (extrema.min_time, extrema.min_value, extrema.max_time, extrema.max_value),
        (2.0, 7.0, 2.0, 7.0)
    );
    assert!(curve.create_tangent_key(2.0).is_none());
}
