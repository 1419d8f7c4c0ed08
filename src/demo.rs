//! Built-in demo scenes played by the `matrix-composer` binary.
//!
//! Entrances pin every child back to its home position, so a scene renders the same way each
//! time it is re-entered, whatever its exit animations left in the property bags.

use crate::animation::ease::Ease;
use crate::animation::ops::{BulkKind, BulkOpts, Scheduled};
use crate::animation::physics::GravityJump;
use crate::animation::tween::{Direction, Tween};
use crate::driver::config::LoopConfig;
use crate::driver::orchestrator::Orchestrator;
use crate::foundation::error::ComposerResult;
use crate::foundation::value::PropertyBag;
use crate::layout::stack::{Arrangement, HAlign, Layout};
use crate::render::buffer::PixelBuffer;
use crate::scene::scene::Scene;
use crate::widgets::Orientation;
use crate::widgets::fill::Fill;
use crate::widgets::progress::ProgressBar;
use crate::widgets::scroll_view::{AutoScroll, ScrollView};
use crate::widgets::scrollbar::Scrollbar;

const TICKER_SCROLL: AutoScroll = AutoScroll {
    speed: 20.0,
    pause: 1.0,
};

/// Orchestrator with every demo scene registered at the configured canvas size.
pub fn orchestrator(cfg: LoopConfig) -> ComposerResult<Orchestrator> {
    let mut orch = Orchestrator::new(cfg)?;
    orch.add_scene("bars", bars_scene(cfg.width, cfg.height)?)?;
    orch.add_scene("ticker", ticker_scene(cfg.width, cfg.height)?)?;
    Ok(orch)
}

/// Fade `id` in while holding it at `home`.
fn fade_home(id: &str, home: (i32, i32), duration: f64) -> ComposerResult<Tween> {
    let (x, y) = (i64::from(home.0), i64::from(home.1));
    Ok(Tween::fade_in(id, duration)?
        .from_int("x", x)
        .to_int("x", x)
        .from_int("y", y)
        .to_int("y", y))
}

/// Three progress bars sliding in over a dark backdrop, with a bouncing ball while idle.
pub fn bars_scene(w: u32, h: u32) -> ComposerResult<Scene> {
    let mut scene = Scene::new(w, h)?;
    scene.add_child(
        "bg",
        Fill::new(w, h, [8u8, 8, 24])?,
        PropertyBag::at(0, 0).with("z_index", -1),
    );

    let bar_w = w.saturating_sub(8).max(4);
    let bar_h = (h / 8).max(2);
    let mut bars = Layout::new(w, h, Arrangement::vertical(2, HAlign::Center))?.padding(2);
    for (i, (progress, color)) in [(0.25, [255u8, 80, 80]), (0.6, [80, 255, 80]), (0.9, [80, 160, 255])]
        .into_iter()
        .enumerate()
    {
        let bar = ProgressBar::new(bar_w, bar_h)?
            .fill_color(color)
            .with_progress(progress);
        bars.add(format!("bar{i}"), bar);
    }
    scene.add_child("bars", bars, PropertyBag::at(0, 0));

    let ball = 3.min(w).min(h);
    let ball_home = (w.saturating_sub(ball + 1) as i32, h.saturating_sub(ball) as i32);
    scene.add_child(
        "ball",
        Fill::new(ball, ball, [255u8, 220, 0])?,
        PropertyBag::at(ball_home.0, ball_home.1).with("z_index", 2),
    );

    let span = i64::from(w);
    let bars_in = Tween::new("bars", 0.8)?
        .ease(Ease::OutQuad)
        .from_int("x", -span)
        .to_int("x", 0)
        .from_int("y", 0)
        .to_int("y", 0);
    Ok(scene
        .with_entrance(vec![
            (0.0, Tween::fade_in("bg", 0.4)?.into()),
            (0.2, bars_in.into()),
            (0.2, fade_home("ball", ball_home, 0.8)?.into()),
        ])
        .with_idle(vec![(0.0, GravityJump::new("ball", f64::from(h / 2), 1.0)?.into())])
        .with_exit(vec![
            (0.0, Tween::slide_out("bars", Direction::Right, w as i32, 0.6)?.into()),
            (0.0, Tween::fade_out("ball", 0.6)?.into()),
        ]))
}

/// Autoscrolling rainbow strip with a scrollbar underneath that follows it.
pub fn ticker_scene(w: u32, h: u32) -> ComposerResult<Scene> {
    let mut scene = Scene::new(w, h)?;
    let strip_h = h.saturating_sub(4).max(1);
    let content_w = w * 3;

    let mut data = Vec::with_capacity((content_w * strip_h * 4) as usize);
    for y in 0..strip_h {
        for x in 0..content_w {
            let hue = x * 255 / content_w.max(1);
            let shade = (y * 255 / strip_h.max(1)) as u8;
            data.extend_from_slice(&[hue as u8, 255 - hue as u8, shade, 255]);
        }
    }
    let content = PixelBuffer::from_rgba(content_w, strip_h, data)?;
    let ticker = ScrollView::new(w, strip_h, content)?.with_autoscroll(TICKER_SCROLL)?;
    scene.add_child("ticker", ticker, PropertyBag::at(0, 0));

    let bar_h = 3.min(h);
    let bar_home = (0, (h - bar_h) as i32);
    let bar = Scrollbar::new(w, bar_h, w, content_w)?
        .orientation(Orientation::Horizontal)
        .follow_autoscroll(TICKER_SCROLL)?;
    scene.add_child("scrollbar", bar, PropertyBag::at(bar_home.0, bar_home.1));

    let entrance: Vec<Scheduled> = vec![
        (0.0, fade_home("ticker", (0, 0), 0.5)?.into()),
        (0.0, fade_home("scrollbar", bar_home, 0.5)?.into()),
    ];
    let exit = scene.apply_all(
        BulkKind::SlideOut,
        BulkOpts {
            duration: 0.5,
            ..BulkOpts::default()
        },
    )?;
    Ok(scene.with_entrance(entrance).with_exit(exit))
}
