use super::*;

fn ring(keys: &[&'static str]) -> FocusRing<&'static str> {
    let mut r = FocusRing::new();
    for k in keys {
        r.insert(*k);
    }
    r
}

#[test]
fn first_insert_takes_focus() {
    let mut r = FocusRing::new();
    assert_eq!(
        r.insert("a"),
        Some(FocusChange {
            lost: None,
            gained: Some("a")
        })
    );
    assert_eq!(r.insert("b"), None);
    assert_eq!(r.current(), Some(&"a"));
}

#[test]
fn next_and_previous_wrap() {
    let mut r = ring(&["a", "b", "c"]);
    r.focus_next();
    r.focus_next();
    assert_eq!(r.current(), Some(&"c"));
    r.focus_next();
    assert_eq!(r.current(), Some(&"a"));
    r.focus_previous();
    assert_eq!(r.current(), Some(&"c"));
}

#[test]
fn single_key_cycle_is_not_a_transition() {
    let mut r = ring(&["only"]);
    assert_eq!(r.focus_next(), None);
    assert_eq!(r.set_focus(&"only"), None);
}

#[test]
fn set_focus_ignores_unknown_keys() {
    let mut r = ring(&["a"]);
    assert_eq!(r.set_focus(&"zzz"), None);
    assert_eq!(r.current(), Some(&"a"));
}

#[test]
fn removing_the_holder_refocuses_the_first_key() {
    let mut r = ring(&["a", "b", "c"]);
    r.set_focus(&"b");
    assert_eq!(
        r.remove(&"b"),
        Some(FocusChange {
            lost: Some("b"),
            gained: Some("a")
        })
    );
    assert_eq!(r.remove(&"c"), None);
    assert_eq!(
        r.remove(&"a"),
        Some(FocusChange {
            lost: Some("a"),
            gained: None
        })
    );
    assert!(r.is_empty());
    assert_eq!(r.focus_next(), None);
}

#[test]
fn stepping_from_no_focus_picks_an_end_of_the_ring() {
    let mut r = ring(&["a", "b", "c"]);
    r.clear_focus();
    assert_eq!(
        r.focus_previous(),
        Some(FocusChange {
            lost: None,
            gained: Some("c")
        })
    );
    r.clear_focus();
    r.focus_next();
    assert_eq!(r.current(), Some(&"a"));
}
