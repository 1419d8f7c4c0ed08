use super::*;
use crate::animation::tween::Tween;
use crate::foundation::value::PropertyBag;

fn fade(start: f64, duration: f64) -> ActiveAnimation {
    ActiveAnimation {
        start,
        anim: Tween::fade_in("a", duration).unwrap().into(),
    }
}

#[test]
fn names_round_trip() {
    for p in [Phase::Entrance, Phase::Idle, Phase::Exit, Phase::Custom("wave".into())] {
        assert_eq!(Phase::from_name(p.name()), p);
    }
    assert_eq!(Phase::from("celebrate").to_string(), "celebrate");
}

#[test]
fn empty_phase_is_complete() {
    assert!(phase_complete(&[], 0.0));
}

#[test]
fn late_starters_hold_completion_back() {
    let mut active = vec![fade(0.0, 1.0), fade(5.0, 1.0)];
    let mut bag = PropertyBag::new();
    active[0].anim.update(&mut bag, 2.0);
    assert!(active[0].anim.is_completed());

    // The second animation has not started yet, so the phase is not done.
    assert!(!phase_complete(&active, 2.0));

    active[1].anim.update(&mut bag, 0.5);
    assert!(!phase_complete(&active, 5.5));
    active[1].anim.update(&mut bag, 1.0);
    assert!(phase_complete(&active, 6.0));
}

#[test]
fn table_resets_every_phase() {
    let mut table = PhaseTable::default();
    table.set(Phase::Idle, vec![(0.0, Tween::fade_in("a", 1.0).unwrap().into())]);
    table.set(Phase::Custom("wave".into()), vec![(0.0, Tween::fade_out("a", 1.0).unwrap().into())]);
    assert!(table.has_animations(&Phase::Idle));
    assert!(!table.has_animations(&Phase::Entrance));
    assert!(table.get(&Phase::Custom("nope".into())).is_none());
    assert_eq!(table.custom_names().collect::<Vec<_>>(), vec!["wave"]);
    table.reset_all();
    assert!(!table.get(&Phase::Idle).unwrap()[0].1.is_completed());
}
