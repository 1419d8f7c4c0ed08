use super::*;

const TRACK: [u8; 4] = [32, 32, 32, 255];
const THUMB: [u8; 4] = [128, 128, 128, 255];

#[test]
fn scroll_position_is_clamped_to_content() {
    let mut bar = Scrollbar::new(3, 20, 100, 300).unwrap();
    bar.set_scroll_position(1000);
    assert_eq!(bar.scroll_position(), 200);
    bar.set_scroll_position(-50);
    assert_eq!(bar.scroll_position(), 0);
}

#[test]
fn shrinking_content_reclamps() {
    let mut bar = Scrollbar::new(3, 20, 100, 300).unwrap();
    bar.set_scroll_position(150);
    bar.set_content_size(180);
    assert_eq!(bar.scroll_position(), 80);
    bar.set_content_size(50);
    assert_eq!(bar.scroll_position(), 0);
}

#[test]
fn thumb_is_proportional_and_respects_the_minimum() {
    // 20px track minus 2px arrow space each end leaves 16; a third of that truncates to 5.
    assert_eq!(thumb_geometry(20, true, 3, 100, 300, 0), (2, 5));
    assert_eq!(thumb_geometry(20, true, 3, 100, 300, 200), (13, 5));
    assert_eq!(thumb_geometry(20, false, 3, 10, 1000, 0), (0, 3));
    assert_eq!(thumb_geometry(20, true, 3, 100, 50, 0), (0, 20));
}

#[test]
fn render_draws_thumb_over_track() {
    let mut bar = Scrollbar::new(3, 20, 100, 300).unwrap();
    let ctx = RenderCtx::default();
    let top = bar.render(0.0, &ctx);
    assert_eq!(top.get_pixel(0, 5), THUMB);
    assert_eq!(top.get_pixel(0, 10), TRACK);
    assert_eq!(top.get_pixel(1, 0), [64, 64, 64, 255]);

    bar.set_scroll_position(200);
    let bottom = bar.render(1.0, &ctx);
    assert_eq!(bottom.get_pixel(0, 5), TRACK);
    assert_eq!(bottom.get_pixel(0, 14), THUMB);
    assert_eq!(bar.node().rendered_at(), Some(1.0));
}

#[test]
fn following_bar_tracks_the_autoscroll_cycle_until_pinned() {
    use crate::widgets::scroll_view::{AutoScroll, ScrollView};

    let auto = AutoScroll {
        speed: 20.0,
        pause: 1.0,
    };
    let view = ScrollView::new(20, 3, PixelBuffer::new(60, 3).unwrap())
        .unwrap()
        .with_autoscroll(auto)
        .unwrap();
    let mut bar = Scrollbar::new(20, 3, 20, 60)
        .unwrap()
        .orientation(Orientation::Horizontal)
        .follow_autoscroll(auto)
        .unwrap();
    assert!(bar.is_following());

    for t in [0.0, 0.5, 2.0, 3.5, 4.5, 5.5] {
        bar.compute_state(t);
        assert_eq!(bar.scroll_position(), view.offset_at(t).0 as u32, "t={t}");
    }
    assert_eq!(bar.scroll_position(), 10);

    bar.set_scroll_position(5);
    assert!(!bar.is_following());
    bar.compute_state(2.0);
    assert_eq!(bar.scroll_position(), 5);

    assert!(
        Scrollbar::new(20, 3, 20, 60)
            .unwrap()
            .follow_autoscroll(AutoScroll {
                speed: 0.0,
                pause: 1.0
            })
            .is_err()
    );
}
