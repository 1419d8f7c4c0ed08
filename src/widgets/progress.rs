use std::sync::Arc;

use crate::foundation::error::ComposerResult;
use crate::foundation::value::Snapshot;
use crate::node::component::{Component, NodeCore, RenderCtx};
use crate::render::buffer::{Color, PixelBuffer};
use crate::render::cache::RenderCache;
use crate::widgets::{Orientation, check_size};

/// Progress indicator. Horizontal bars fill left to right, vertical bars bottom to top.
#[derive(Debug)]
pub struct ProgressBar {
    width: u32,
    height: u32,
    progress: f64,
    orientation: Orientation,
    fill_color: Color,
    empty_color: Color,
    border_color: Option<Color>,
    cache: RenderCache,
    core: NodeCore,
}

fn clamp_progress(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

impl ProgressBar {
    pub fn new(width: u32, height: u32) -> ComposerResult<Self> {
        check_size("progress bar", width, height)?;
        Ok(Self {
            width,
            height,
            progress: 0.0,
            orientation: Orientation::Horizontal,
            fill_color: Color::Rgb([0, 255, 0]),
            empty_color: Color::Rgb([32, 32, 32]),
            border_color: Some(Color::Rgb([64, 64, 64])),
            cache: RenderCache::leaf(),
            core: NodeCore::new(),
        })
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn fill_color(mut self, color: impl Into<Color>) -> Self {
        self.fill_color = color.into();
        self
    }

    pub fn empty_color(mut self, color: impl Into<Color>) -> Self {
        self.empty_color = color.into();
        self
    }

    /// One-pixel border colour; `None` lets the bar use the whole area.
    pub fn border(mut self, color: Option<Color>) -> Self {
        self.border_color = color;
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.set_progress(progress);
        self
    }

    /// Set progress, clamped to `[0, 1]` (NaN becomes 0).
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = clamp_progress(progress);
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }
}

impl Component for ProgressBar {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn compute_state(&mut self, _time: f64) -> Snapshot {
        Snapshot::new().with("progress", (self.progress * 1000.0).round() / 1000.0)
    }

    fn render_pixels(&mut self, state: &Snapshot, _time: f64, _ctx: &RenderCtx) -> Arc<PixelBuffer> {
        let progress = state
            .get("progress")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let (w, h) = (self.width, self.height);
        let (orientation, fill, empty, border) = (
            self.orientation,
            self.fill_color,
            self.empty_color,
            self.border_color,
        );
        self.cache.get_or_compute(state, || {
            let mut buf = PixelBuffer::blank(w, h);
            buf.clear(Color::BLACK);
            let inset = u32::from(border.is_some());
            let bar_w = w.saturating_sub(2 * inset);
            let bar_h = h.saturating_sub(2 * inset);
            let (bx, by) = (inset as i32, inset as i32);

            buf.fill_rect(bx, by, bar_w, bar_h, empty);
            match orientation {
                Orientation::Horizontal => {
                    let filled = (f64::from(bar_w) * progress) as u32;
                    buf.fill_rect(bx, by, filled, bar_h, fill);
                }
                Orientation::Vertical => {
                    let filled = (f64::from(bar_h) * progress) as u32;
                    buf.fill_rect(bx, by + (bar_h - filled) as i32, bar_w, filled, fill);
                }
            }
            if let Some(border) = border {
                buf.draw_outline(border);
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
#[path = "../../tests/unit/widgets/progress.rs"]
mod tests;
