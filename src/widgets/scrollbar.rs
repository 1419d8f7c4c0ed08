use std::sync::Arc;

use crate::foundation::error::ComposerResult;
use crate::foundation::value::Snapshot;
use crate::node::component::{Component, NodeCore, RenderCtx};
use crate::render::buffer::{Color, PixelBuffer};
use crate::render::cache::RenderCache;
use crate::widgets::scroll_view::AutoScroll;
use crate::widgets::{Orientation, check_size};

/// Pixels reserved at each end of the track when arrows are drawn.
const ARROW_SPACE: i64 = 2;

/// Scroll position indicator for content larger than its viewport.
#[derive(Debug)]
pub struct Scrollbar {
    width: u32,
    height: u32,
    orientation: Orientation,
    viewport_size: u32,
    content_size: u32,
    position: u32,
    follow: Option<AutoScroll>,
    track_color: Color,
    thumb_color: Color,
    arrow_color: Option<Color>,
    min_thumb: u32,
    cache: RenderCache,
    core: NodeCore,
}

/// Thumb start and length along a track of `track` pixels.
///
/// Content that fits the viewport yields a thumb spanning the whole track.
pub fn thumb_geometry(
    track: u32,
    arrows: bool,
    min_thumb: u32,
    viewport: u32,
    content: u32,
    position: u32,
) -> (i64, i64) {
    if content <= viewport {
        return (0, i64::from(track));
    }
    let arrow_space = if arrows { ARROW_SPACE } else { 0 };
    let available = (i64::from(track) - 2 * arrow_space).max(0);
    let proportional = (available as f64 * (f64::from(viewport) / f64::from(content))) as i64;
    let thumb = proportional.max(i64::from(min_thumb));
    let travel = available - thumb;
    let max_scroll = f64::from(content - viewport);
    let start = arrow_space + (travel as f64 * (f64::from(position) / max_scroll)) as i64;
    (start, thumb)
}

impl Scrollbar {
    /// Vertical scrollbar over `content_size` units seen through `viewport_size`.
    pub fn new(width: u32, height: u32, viewport_size: u32, content_size: u32) -> ComposerResult<Self> {
        check_size("scrollbar", width, height)?;
        Ok(Self {
            width,
            height,
            orientation: Orientation::Vertical,
            viewport_size,
            content_size,
            position: 0,
            follow: None,
            track_color: Color::Rgb([32, 32, 32]),
            thumb_color: Color::Rgb([128, 128, 128]),
            arrow_color: Some(Color::Rgb([64, 64, 64])),
            min_thumb: 3,
            cache: RenderCache::leaf(),
            core: NodeCore::new(),
        })
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn track_color(mut self, color: impl Into<Color>) -> Self {
        self.track_color = color.into();
        self
    }

    pub fn thumb_color(mut self, color: impl Into<Color>) -> Self {
        self.thumb_color = color.into();
        self
    }

    /// Arrow colour; `None` drops the arrows and their reserved track space.
    pub fn arrows(mut self, color: Option<Color>) -> Self {
        self.arrow_color = color;
        self
    }

    pub fn min_thumb_size(mut self, size: u32) -> Self {
        self.min_thumb = size;
        self
    }

    /// Track the position of an autoscrolling view with the same cycle and extents.
    ///
    /// The position is then derived from time on every state pass, until
    /// [`set_scroll_position`](Self::set_scroll_position) pins it again.
    pub fn follow_autoscroll(mut self, autoscroll: AutoScroll) -> ComposerResult<Self> {
        autoscroll.validate()?;
        self.follow = Some(autoscroll);
        Ok(self)
    }

    pub fn is_following(&self) -> bool {
        self.follow.is_some()
    }

    pub fn max_scroll(&self) -> u32 {
        self.content_size.saturating_sub(self.viewport_size)
    }

    pub fn scroll_position(&self) -> u32 {
        self.position
    }

    /// Set the scroll position, clamped to `[0, content - viewport]`.
    pub fn set_scroll_position(&mut self, position: i64) {
        self.follow = None;
        self.position = position.clamp(0, i64::from(self.max_scroll())) as u32;
    }

    /// Change the content size and re-clamp the position.
    pub fn set_content_size(&mut self, size: u32) {
        self.content_size = size;
        self.reclamp();
    }

    pub fn set_viewport_size(&mut self, size: u32) {
        self.viewport_size = size;
        self.reclamp();
    }

    fn reclamp(&mut self) {
        self.position = self.position.min(self.max_scroll());
    }
}

fn draw_arrows(buf: &mut PixelBuffer, orientation: Orientation, color: Color) {
    let (w, h) = (buf.width() as i32, buf.height() as i32);
    match orientation {
        Orientation::Vertical => {
            let mid = w / 2;
            buf.set_pixel(mid, 0, color);
            buf.set_pixel(mid, h - 1, color);
            if w >= 3 {
                for dx in [-1, 1] {
                    buf.set_pixel(mid + dx, 1, color);
                    buf.set_pixel(mid + dx, h - 2, color);
                }
            }
        }
        Orientation::Horizontal => {
            let mid = h / 2;
            buf.set_pixel(0, mid, color);
            buf.set_pixel(w - 1, mid, color);
            if h >= 3 {
                for dy in [-1, 1] {
                    buf.set_pixel(1, mid + dy, color);
                    buf.set_pixel(w - 2, mid + dy, color);
                }
            }
        }
    }
}

impl Component for Scrollbar {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn compute_state(&mut self, time: f64) -> Snapshot {
        if let Some(auto) = self.follow {
            self.position = auto.offset_at(self.max_scroll(), time).max(0) as u32;
        }
        Snapshot::new()
            .with("viewport_size", self.viewport_size)
            .with("content_size", self.content_size)
            .with("scroll_position", self.position)
    }

    fn render_pixels(&mut self, state: &Snapshot, _time: f64, _ctx: &RenderCtx) -> Arc<PixelBuffer> {
        let read = |key: &str| {
            state
                .get(key)
                .and_then(|v| v.as_i64())
                .map_or(0, |v| v.clamp(0, i64::from(u32::MAX)) as u32)
        };
        let (viewport, content, position) = (
            read("viewport_size"),
            read("content_size"),
            read("scroll_position"),
        );
        let (w, h, orientation, min_thumb) = (self.width, self.height, self.orientation, self.min_thumb);
        let (track_color, thumb_color, arrow_color) = (self.track_color, self.thumb_color, self.arrow_color);
        self.cache.get_or_compute(state, || {
            let track = match orientation {
                Orientation::Vertical => h,
                Orientation::Horizontal => w,
            };
            let (start, len) = thumb_geometry(
                track,
                arrow_color.is_some(),
                min_thumb,
                viewport,
                content,
                position,
            );
            let len = ((start + len).min(i64::from(track)) - start).max(0) as u32;

            let mut buf = PixelBuffer::blank(w, h);
            buf.clear(track_color);
            match orientation {
                Orientation::Vertical => buf.fill_rect(0, start as i32, w, len, thumb_color),
                Orientation::Horizontal => buf.fill_rect(start as i32, 0, len, h, thumb_color),
            }
            if let Some(color) = arrow_color {
                draw_arrows(&mut buf, orientation, color);
            }
            buf
        })
    }

    fn node(&self) -> &NodeCore {
        &self.core
    }

    fn node_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/scrollbar.rs"]
mod tests;
