use std::sync::Arc;

use crate::foundation::error::ComposerResult;
use crate::foundation::value::Snapshot;
use crate::node::component::{Component, NodeCore, RenderCtx};
use crate::render::buffer::{Color, PixelBuffer};
use crate::render::cache::RenderCache;
use crate::widgets::check_size;

/// Rectangle of a single colour.
#[derive(Debug)]
pub struct Fill {
    width: u32,
    height: u32,
    color: Color,
    cache: RenderCache,
    core: NodeCore,
}

impl Fill {
    pub fn new(width: u32, height: u32, color: impl Into<Color>) -> ComposerResult<Self> {
        check_size("fill", width, height)?;
        Ok(Self {
            width,
            height,
            color: color.into(),
            cache: RenderCache::leaf(),
            core: NodeCore::new(),
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = color.into();
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }
}

impl Component for Fill {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn compute_state(&mut self, _time: f64) -> Snapshot {
        Snapshot::new().with("color", self.color.to_rgba())
    }

    fn render_pixels(&mut self, state: &Snapshot, _time: f64, _ctx: &RenderCtx) -> Arc<PixelBuffer> {
        let (w, h, color) = (self.width, self.height, self.color);
        self.cache.get_or_compute(state, || {
            let mut buf = PixelBuffer::blank(w, h);
            buf.clear(color);
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
#[path = "../../tests/unit/widgets/fill.rs"]
mod tests;
