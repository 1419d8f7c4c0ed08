use super::*;

const MONOTONIC: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::OutBounce,
];

#[test]
fn endpoints_are_stable() {
    for ease in MONOTONIC {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?}");
    }
    assert_eq!(Ease::OutElastic.apply(0.0), 0.0);
    assert_eq!(Ease::OutElastic.apply(1.0), 1.0);
}

#[test]
fn monotonic_spot_check() {
    for ease in MONOTONIC {
        let a = ease.apply(0.2);
        let b = ease.apply(0.5);
        let c = ease.apply(0.95);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn gravity_peaks_at_midpoint() {
    assert_eq!(Ease::Gravity.apply(0.0), 0.0);
    assert_eq!(Ease::Gravity.apply(0.5), 1.0);
    assert_eq!(Ease::Gravity.apply(1.0), 0.0);
}

#[test]
fn bounce_touches_ground_at_break_points() {
    for b in [1.0 / 2.75, 2.0 / 2.75, 2.5 / 2.75] {
        assert!((Ease::OutBounce.apply(b) - 1.0).abs() < 1e-9, "{b}");
    }
    // Apex of the second arc.
    assert!((Ease::OutBounce.apply(1.5 / 2.75) - 0.75).abs() < 1e-9);
}

#[test]
fn elastic_overshoots() {
    let max = (1..100)
        .map(|i| Ease::OutElastic.apply(f64::from(i) / 100.0))
        .fold(f64::MIN, f64::max);
    assert!(max > 1.0);
}

#[test]
fn names_round_trip_and_aliases_resolve() {
    for ease in Ease::ALL {
        assert_eq!(Ease::from_name(ease.name()).unwrap(), ease);
    }
    assert_eq!("ease_out".parse::<Ease>().unwrap(), Ease::OutQuad);
    assert_eq!("ease_in".parse::<Ease>().unwrap(), Ease::InQuad);
    assert_eq!("ease_in_out".parse::<Ease>().unwrap(), Ease::InOutQuad);
}

#[test]
fn unknown_name_is_a_configuration_error() {
    let err = Ease::from_name("wobble").unwrap_err();
    assert!(err.to_string().contains("wobble"));
}
