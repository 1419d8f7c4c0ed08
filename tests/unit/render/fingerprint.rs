use super::*;

#[test]
fn insertion_order_does_not_matter() {
    let a = Snapshot::new().with("a", 1).with("b", "x");
    let b = Snapshot::new().with("b", "x").with("a", 1);
    assert_eq!(fingerprint_snapshot(&a), fingerprint_snapshot(&b));
}

#[test]
fn variant_and_nesting_change_the_fingerprint() {
    let int = Snapshot::new().with("v", 1);
    let float = Snapshot::new().with("v", 1.0);
    assert_ne!(fingerprint_snapshot(&int), fingerprint_snapshot(&float));

    let flat = Snapshot::new().with("v", Value::Tuple(vec![1.into(), 2.into()]));
    let nested = Snapshot::new().with(
        "v",
        Value::Tuple(vec![Value::Tuple(vec![1.into()]), 2.into()]),
    );
    assert_ne!(fingerprint_snapshot(&flat), fingerprint_snapshot(&nested));
}

#[test]
fn negative_zero_matches_zero() {
    let a = Snapshot::new().with("v", 0.0);
    let b = Snapshot::new().with("v", -0.0);
    assert_eq!(fingerprint_snapshot(&a), fingerprint_snapshot(&b));
}

#[test]
fn key_boundaries_are_unambiguous() {
    let a = Snapshot::new().with("ab", "c");
    let b = Snapshot::new().with("a", "bc");
    assert_ne!(fingerprint_snapshot(&a), fingerprint_snapshot(&b));
}
