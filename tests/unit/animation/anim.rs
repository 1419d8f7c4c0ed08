use super::*;

#[test]
fn negative_and_nan_elapsed_apply_frame_zero() {
    let mut a: Animation = Tween::new("a", 1.0)
        .unwrap()
        .from_abs("v", 3.0)
        .to_abs("v", 9.0)
        .into();
    let mut bag = PropertyBag::new();
    assert!(!a.update(&mut bag, -4.0));
    assert_eq!(bag.get_f64("v"), 3.0);
    assert!(!a.update(&mut bag, f64::NAN));
    assert_eq!(bag.get_f64("v"), 3.0);
}

#[test]
fn progress_is_clamped_and_endless_loops_report_zero() {
    let tween: Animation = Tween::fade_in("a", 2.0).unwrap().into();
    assert_eq!(tween.progress(1.0), 0.5);
    assert_eq!(tween.progress(9.0), 1.0);
    assert_eq!(tween.kind(), "tween");

    let endless: Animation = Loop::forever(tween.clone()).unwrap().into();
    assert_eq!(endless.progress(100.0), 0.0);
    assert_eq!(endless.kind(), "loop");
    assert_eq!(endless.target(), "a");
}

#[test]
fn reset_clears_completion_for_every_kind() {
    let mut anims: Vec<Animation> = vec![
        Tween::fade_in("a", 1.0).unwrap().into(),
        Sequence::new(vec![Tween::fade_in("a", 1.0).unwrap().into()])
            .unwrap()
            .into(),
        Parallel::new(vec![Tween::fade_out("a", 1.0).unwrap().into()])
            .unwrap()
            .into(),
        Loop::new(Tween::fade_in("a", 1.0).unwrap(), Some(1)).unwrap().into(),
        GravityJump::new("a", 5.0, 1.0).unwrap().into(),
        GravityFallIn::new("a").unwrap().into(),
    ];
    let mut bag = PropertyBag::new();
    for a in &mut anims {
        assert!(a.update(&mut bag, 10.0), "{}", a.kind());
        assert!(a.is_completed());
        a.reset();
        assert!(!a.is_completed(), "{}", a.kind());
    }
}
