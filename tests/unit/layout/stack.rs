use super::*;
use crate::widgets::fill::Fill;
use crate::widgets::scroll_view::ScrollView;

fn fill(w: u32, h: u32) -> Fill {
    Fill::new(w, h, [200u8, 10, 10]).unwrap()
}

fn wide_view() -> ScrollView {
    ScrollView::new(4, 2, PixelBuffer::filled(12, 2, [1u8, 2, 3]).unwrap()).unwrap()
}

#[test]
fn vertical_stack_left_aligned_with_padding() {
    let mut l = Layout::new(20, 20, Arrangement::vertical(2, HAlign::Left))
        .unwrap()
        .padding(1);
    l.add("a", fill(10, 4));
    l.add("b", fill(6, 3));
    assert_eq!(l.position("a"), Some((1, 1)));
    assert_eq!(l.position("b"), Some((1, 7)));
}

#[test]
fn vertical_stack_centres_each_child() {
    let mut l = Layout::new(20, 20, Arrangement::vertical(0, HAlign::Center)).unwrap();
    l.add("a", fill(10, 4));
    l.add("b", fill(7, 3));
    assert_eq!(l.position("a"), Some((5, 0)));
    assert_eq!(l.position("b"), Some((6, 4)));
}

#[test]
fn horizontal_stack_bottom_aligned() {
    let mut l = Layout::new(20, 10, Arrangement::horizontal(2, VAlign::Bottom))
        .unwrap()
        .padding(1);
    l.add("a", fill(4, 4));
    l.add("b", fill(3, 2));
    assert_eq!(l.position("a"), Some((1, 5)));
    assert_eq!(l.position("b"), Some((7, 7)));
}

#[test]
fn grid_centres_children_in_cells() {
    let mut l = Layout::new(20, 20, Arrangement::grid(2, 2)).unwrap();
    for id in ["a", "b", "c"] {
        l.add(id, fill(4, 4));
    }
    assert_eq!(l.position("a"), Some((2, 2)));
    assert_eq!(l.position("b"), Some((13, 2)));
    assert_eq!(l.position("c"), Some((2, 13)));
}

#[test]
fn grid_without_columns_is_rejected() {
    let err = Layout::new(20, 20, Arrangement::grid(0, 2)).unwrap_err();
    assert!(err.to_string().contains("column"));
    assert!(Layout::new(0, 20, Arrangement::overlay(Anchor::Center)).is_err());
}

#[test]
fn overlay_pins_to_the_anchor() {
    let mut l = Layout::new(20, 10, Arrangement::overlay(Anchor::BottomRight))
        .unwrap()
        .padding(1);
    l.add("a", fill(4, 4));
    assert_eq!(l.position("a"), Some((15, 5)));

    let mut c = Layout::new(20, 10, Arrangement::overlay(Anchor::Center)).unwrap();
    c.add("a", fill(4, 4));
    assert_eq!(c.position("a"), Some((8, 3)));
}

#[test]
fn later_overlay_children_draw_on_top_and_gaps_stay_transparent() {
    let mut l = Layout::new(6, 6, Arrangement::overlay(Anchor::TopLeft)).unwrap();
    l.add("under", Fill::new(4, 4, [255u8, 0, 0]).unwrap());
    l.add("over", Fill::new(2, 2, [0u8, 0, 255]).unwrap());
    let px = l.render(0.0, &RenderCtx::default());
    assert_eq!(px.get_pixel(0, 0), [0, 0, 255, 255]);
    assert_eq!(px.get_pixel(3, 3), [255, 0, 0, 255]);
    assert_eq!(px.get_pixel(5, 5), [0, 0, 0, 0]);
}

#[test]
fn child_changes_invalidate_the_layout_cache() {
    let mut l = Layout::new(6, 6, Arrangement::vertical(0, HAlign::Left)).unwrap();
    l.add("a", fill(2, 2));
    let ctx = RenderCtx::default();
    let first = l.render(0.0, &ctx);
    let same = l.render(1.0, &ctx);
    assert!(Arc::ptr_eq(&first, &same));

    l.child_mut::<Fill>("a").unwrap().set_color([0u8, 255, 0]);
    let changed = l.render(2.0, &ctx);
    assert!(!Arc::ptr_eq(&first, &changed));
    assert_eq!(changed.get_pixel(0, 0), [0, 255, 0, 255]);
    assert_eq!(l.node().rendered_at(), Some(2.0));
}

#[test]
fn focus_cycles_focusable_children_and_forwards_scrolling() {
    let mut l = Layout::new(20, 20, Arrangement::vertical(1, HAlign::Left)).unwrap();
    assert!(!l.is_focusable());
    l.add("plain", fill(2, 2));
    l.add("first", wide_view());
    l.add("second", wide_view());
    assert!(l.is_focusable());
    assert_eq!(l.focused(), Some("first"));
    assert!(l.child("first").unwrap().node().is_focused());

    assert!(!l.set_focus("plain"));
    assert!(l.focus_next());
    assert_eq!(l.focused(), Some("second"));
    assert!(!l.child("first").unwrap().node().is_focused());

    l.as_scrollable_mut().unwrap().scroll_by(5, 0);
    assert_eq!(l.child_mut::<ScrollView>("second").unwrap().offset(), (5, 0));
    assert_eq!(l.child_mut::<ScrollView>("first").unwrap().offset(), (0, 0));

    assert!(l.focus_previous());
    assert_eq!(l.focused(), Some("first"));
}
