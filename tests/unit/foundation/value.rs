use super::*;
use std::collections::hash_map::DefaultHasher;

fn hash_of<T: Hash>(v: &T) -> u64 {
    let mut h = DefaultHasher::new();
    v.hash(&mut h);
    h.finish()
}

#[test]
fn signed_zero_and_nan_are_canonical() {
    assert_eq!(Value::Float(0.0), Value::Float(-0.0));
    assert_eq!(hash_of(&Value::Float(0.0)), hash_of(&Value::Float(-0.0)));
    assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
}

#[test]
fn int_and_float_are_distinct_variants() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
}

#[test]
fn nested_snapshots_compare_structurally() {
    let a = Snapshot::new()
        .with("child", Snapshot::new().with("offset", 3).with("color", [1u8, 2, 3]))
        .with("x", 4);
    let b = Snapshot::new()
        .with("x", 4)
        .with("child", Snapshot::new().with("color", [1u8, 2, 3]).with("offset", 3));
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let c = b.clone().with("x", 5);
    assert_ne!(a, c);
}

#[test]
fn bag_defaults_for_missing_properties() {
    let bag = PropertyBag::new();
    assert_eq!(bag.get_f64("anything"), 0.0);
    assert_eq!(bag.opacity(), 1.0);
    assert_eq!(bag.z_index(), 0);
    assert_eq!((bag.x(), bag.y()), (0, 0));
}

#[test]
fn bag_reads_numeric_variants() {
    let bag = PropertyBag::at(3, -2)
        .with("opacity", 0.25)
        .with("z_index", 2.9)
        .with("visible", true);
    assert_eq!((bag.x(), bag.y()), (3, -2));
    assert_eq!(bag.opacity(), 0.25);
    assert_eq!(bag.z_index(), 2);
    assert_eq!(bag.get_f64("visible"), 1.0);
}

#[test]
fn bag_position_truncates_float_coordinates() {
    let bag = PropertyBag::new().with("x", 7.8).with("y", -1.5);
    assert_eq!((bag.x(), bag.y()), (7, -1));
}
