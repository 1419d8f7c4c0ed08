use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ComposerError, ComposerResult};
use crate::foundation::value::{Snapshot, Value};
use crate::node::component::{Component, NodeCore, RenderCtx, Scrollable};
use crate::render::buffer::PixelBuffer;
use crate::render::cache::RenderCache;
use crate::widgets::check_size;

/// Horizontal ping-pong scrolling: pause, scroll right, pause, scroll back.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoScroll {
    /// Pixels per second.
    pub speed: f64,
    /// Seconds to hold at each end.
    pub pause: f64,
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self {
            speed: 20.0,
            pause: 1.0,
        }
    }
}

impl AutoScroll {
    pub(crate) fn validate(&self) -> ComposerResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ComposerError::validation(format!(
                "autoscroll speed must be finite and > 0, got {}",
                self.speed
            )));
        }
        if !self.pause.is_finite() || self.pause < 0.0 {
            return Err(ComposerError::validation(format!(
                "autoscroll pause must be finite and >= 0, got {}",
                self.pause
            )));
        }
        Ok(())
    }

    /// Offset along a scroll distance of `distance` pixels at `time`, truncated to whole pixels.
    pub fn offset_at(&self, distance: u32, time: f64) -> i32 {
        if distance == 0 {
            return 0;
        }
        let distance = f64::from(distance);
        let travel = distance / self.speed;
        let cycle = 2.0 * self.pause + 2.0 * travel;
        let t = if time.is_finite() { time.max(0.0) % cycle } else { 0.0 };

        let offset = if t < self.pause {
            0.0
        } else if t < self.pause + travel {
            (t - self.pause) * self.speed
        } else if t < 2.0 * self.pause + travel {
            distance
        } else {
            distance - (t - 2.0 * self.pause - travel) * self.speed
        };
        offset.clamp(0.0, distance) as i32
    }
}

/// Fixed-size window onto larger pixel content.
///
/// Focusable only when the content overflows the viewport. Manual scrolling switches the
/// autoscroll off.
#[derive(Debug)]
pub struct ScrollView {
    width: u32,
    height: u32,
    content: Arc<PixelBuffer>,
    revision: u32,
    offset: (i32, i32),
    autoscroll: Option<AutoScroll>,
    autoscroll_enabled: bool,
    cache: RenderCache,
    core: NodeCore,
}

impl ScrollView {
    pub fn new(width: u32, height: u32, content: PixelBuffer) -> ComposerResult<Self> {
        check_size("scroll view", width, height)?;
        Ok(Self {
            width,
            height,
            content: Arc::new(content),
            revision: 0,
            offset: (0, 0),
            autoscroll: None,
            autoscroll_enabled: false,
            cache: RenderCache::leaf(),
            core: NodeCore::new(),
        })
    }

    pub fn with_autoscroll(mut self, autoscroll: AutoScroll) -> ComposerResult<Self> {
        autoscroll.validate()?;
        self.autoscroll = Some(autoscroll);
        self.autoscroll_enabled = true;
        Ok(self)
    }

    /// Swap the content and re-clamp the offset.
    pub fn set_content(&mut self, content: PixelBuffer) {
        self.content = Arc::new(content);
        self.revision = self.revision.wrapping_add(1);
        let (x, y) = self.offset;
        self.offset = self.clamp(x, y);
    }

    pub fn content(&self) -> &PixelBuffer {
        &self.content
    }

    /// Largest reachable offset on each axis.
    pub fn max_offset(&self) -> (i32, i32) {
        (
            self.content.width().saturating_sub(self.width) as i32,
            self.content.height().saturating_sub(self.height) as i32,
        )
    }

    pub fn can_scroll(&self) -> bool {
        self.max_offset() != (0, 0)
    }

    /// Manual offset (ignores autoscroll).
    pub fn offset(&self) -> (i32, i32) {
        self.offset
    }

    pub fn autoscroll_enabled(&self) -> bool {
        self.autoscroll.is_some() && self.autoscroll_enabled
    }

    pub fn set_autoscroll_enabled(&mut self, enabled: bool) {
        self.autoscroll_enabled = enabled;
    }

    /// Offset shown at `time`.
    pub fn offset_at(&self, time: f64) -> (i32, i32) {
        match self.autoscroll {
            Some(auto) if self.autoscroll_enabled => {
                let (max_x, _) = self.max_offset();
                (auto.offset_at(max_x as u32, time), self.offset.1)
            }
            _ => self.offset,
        }
    }

    fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        let (max_x, max_y) = self.max_offset();
        (x.clamp(0, max_x), y.clamp(0, max_y))
    }
}

impl Scrollable for ScrollView {
    fn scroll_by(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.offset;
        self.scroll_to(x.saturating_add(dx), y.saturating_add(dy));
    }

    fn scroll_to(&mut self, x: i32, y: i32) {
        self.offset = self.clamp(x, y);
        self.autoscroll_enabled = false;
    }
}

impl Component for ScrollView {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn compute_state(&mut self, time: f64) -> Snapshot {
        let (x, y) = self.offset_at(time);
        Snapshot::new()
            .with("revision", self.revision)
            .with("offset", (x, y))
    }

    fn render_pixels(&mut self, state: &Snapshot, _time: f64, _ctx: &RenderCtx) -> Arc<PixelBuffer> {
        let (x, y) = match state.get("offset") {
            Some(Value::Tuple(v)) if v.len() == 2 => (
                v[0].as_i64().unwrap_or(0) as i32,
                v[1].as_i64().unwrap_or(0) as i32,
            ),
            _ => (0, 0),
        };
        let (w, h) = (self.width, self.height);
        let content = &self.content;
        self.cache.get_or_compute(state, || content.crop(x, y, w, h))
    }

    fn node(&self) -> &NodeCore {
        &self.core
    }

    fn node_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn is_focusable(&self) -> bool {
        self.can_scroll()
    }

    fn as_scrollable_mut(&mut self) -> Option<&mut dyn Scrollable> {
        Some(self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/scroll_view.rs"]
mod tests;
