use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::ComposerResult;
use crate::foundation::value::Snapshot;
use crate::node::component::{Component, NodeCore, RenderCtx};
use crate::render::buffer::PixelBuffer;
use crate::render::cache::RenderCache;

/// Static bitmap. Its size is the image size.
#[derive(Debug)]
pub struct ImageView {
    source: String,
    pixels: PixelBuffer,
    cache: RenderCache,
    core: NodeCore,
}

/// Decode an encoded image (PNG, ...) into straight-alpha RGBA; images without alpha become
/// opaque.
pub fn decode_image(bytes: &[u8]) -> ComposerResult<PixelBuffer> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    PixelBuffer::from_rgba(w, h, rgba.into_raw())
}

impl ImageView {
    /// Load an image file.
    pub fn open(path: impl AsRef<Path>) -> ComposerResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))?;
        let pixels = decode_image(&bytes)?;
        Ok(Self::from_buffer(path.display().to_string(), pixels))
    }

    /// Wrap an existing buffer; `source` labels it in snapshots and reports.
    pub fn from_buffer(source: impl Into<String>, pixels: PixelBuffer) -> Self {
        Self {
            source: source.into(),
            pixels,
            cache: RenderCache::leaf(),
            core: NodeCore::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Component for ImageView {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn compute_state(&mut self, _time: f64) -> Snapshot {
        Snapshot::new().with("source", self.source.as_str())
    }

    fn render_pixels(&mut self, state: &Snapshot, _time: f64, _ctx: &RenderCtx) -> Arc<PixelBuffer> {
        let pixels = &self.pixels;
        self.cache.get_or_compute(state, || pixels.copy())
    }

    fn node(&self) -> &NodeCore {
        &self.core
    }

    fn node_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/image.rs"]
mod tests;
