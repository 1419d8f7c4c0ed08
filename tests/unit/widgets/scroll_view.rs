use super::*;

/// 40x4 content whose red channel encodes the column.
fn striped() -> PixelBuffer {
    let mut data = Vec::new();
    for _y in 0..4 {
        for x in 0..40u8 {
            data.extend_from_slice(&[x, 0, 0, 255]);
        }
    }
    PixelBuffer::from_rgba(40, 4, data).unwrap()
}

fn auto_view() -> ScrollView {
    ScrollView::new(10, 4, striped())
        .unwrap()
        .with_autoscroll(AutoScroll {
            speed: 20.0,
            pause: 1.0,
        })
        .unwrap()
}

#[test]
fn autoscroll_ping_pongs_with_pauses() {
    let view = auto_view();
    // distance 30 at 20 px/s takes 1.5 s; full cycle is 5 s
    assert_eq!(view.offset_at(0.5).0, 0);
    assert_eq!(view.offset_at(1.75).0, 15);
    assert_eq!(view.offset_at(2.6).0, 30);
    assert_eq!(view.offset_at(4.0).0, 20);
    assert_eq!(view.offset_at(5.25).0, 0);
    assert_eq!(view.offset_at(-3.0).0, 0);
}

#[test]
fn invalid_autoscroll_is_rejected() {
    let err = ScrollView::new(10, 4, striped())
        .unwrap()
        .with_autoscroll(AutoScroll {
            speed: 0.0,
            pause: 1.0,
        })
        .unwrap_err();
    assert!(err.to_string().contains("speed"));
}

#[test]
fn render_shows_the_window_at_the_offset() {
    let mut view = auto_view();
    let px = view.render(1.75, &RenderCtx::default());
    assert_eq!(px.get_pixel(0, 0), [15, 0, 0, 255]);
    assert_eq!(px.get_pixel(9, 3), [24, 0, 0, 255]);
}

#[test]
fn pauses_hit_the_cache() {
    let mut view = auto_view();
    let ctx = RenderCtx::default();
    let a = view.render(0.1, &ctx);
    let b = view.render(0.9, &ctx);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(view.node().rendered_at(), Some(0.1));
    view.render(1.2, &ctx);
    assert_eq!(view.node().rendered_at(), Some(1.2));
}

#[test]
fn manual_scroll_clamps_and_stops_autoscroll() {
    let mut view = auto_view();
    assert!(view.is_focusable());
    view.scroll_by(100, 5);
    assert_eq!(view.offset(), (30, 0));
    assert!(!view.autoscroll_enabled());
    assert_eq!(view.offset_at(1.75), (30, 0));
    view.scroll_to(-5, 0);
    assert_eq!(view.offset(), (0, 0));
}

#[test]
fn content_that_fits_is_not_focusable() {
    let view = ScrollView::new(40, 4, striped()).unwrap();
    assert!(!view.can_scroll());
    assert!(!view.is_focusable());
}
