use crate::foundation::error::{ComposerError, ComposerResult};
use crate::render::composite::{Rgba8, over_row};

/// A colour accepted by pixel writes.
///
/// Three-channel colours leave the destination alpha untouched on [`PixelBuffer::set_pixel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red, green, blue.
    Rgb([u8; 3]),
    /// Red, green, blue, alpha (straight alpha).
    Rgba([u8; 4]),
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::Rgba([0, 0, 0, 0]);
    /// Opaque black.
    pub const BLACK: Self = Self::Rgba([0, 0, 0, 255]);
    /// Opaque white.
    pub const WHITE: Self = Self::Rgba([255, 255, 255, 255]);

    /// Expand to four channels; RGB colours become opaque.
    pub fn to_rgba(self) -> Rgba8 {
        match self {
            Self::Rgb([r, g, b]) => [r, g, b, 255],
            Self::Rgba(c) => c,
        }
    }
}

impl From<[u8; 3]> for Color {
    fn from(c: [u8; 3]) -> Self {
        Self::Rgb(c)
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::Rgba(c)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::Rgb([r, g, b])
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::Rgba([r, g, b, a])
    }
}

/// Fixed-size RGBA8 raster, row-major, straight alpha.
///
/// Dimensions never change after construction. Reads outside the buffer return transparent
/// black and writes outside it are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Opaque black buffer of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> ComposerResult<Self> {
        Self::filled(width, height, Color::BLACK)
    }

    /// Buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: impl Into<Color>) -> ComposerResult<Self> {
        if width == 0 || height == 0 {
            return Err(ComposerError::validation(format!(
                "pixel buffer dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let px = color.into().to_rgba();
        let len = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&px);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Transparent buffer for nodes whose size was validated at construction.
    ///
    /// Dimensions below one are raised to one.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Wrap raw RGBA8 bytes (`width * height * 4` of them).
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> ComposerResult<Self> {
        if width == 0 || height == 0 {
            return Err(ComposerError::validation(format!(
                "pixel buffer dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(ComposerError::validation(format!(
                "rgba data length {} does not match {width}x{height} (expected {expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its raw bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    /// Pixel at `(x, y)`, or `[0, 0, 0, 0]` outside the buffer.
    pub fn get_pixel(&self, x: i32, y: i32) -> Rgba8 {
        match self.index(x, y) {
            Some(i) => [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ],
            None => [0, 0, 0, 0],
        }
    }

    /// Overwrite the pixel at `(x, y)`; RGB colours keep the existing alpha.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: impl Into<Color>) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match color.into() {
            Color::Rgb(c) => self.data[i..i + 3].copy_from_slice(&c),
            Color::Rgba(c) => self.data[i..i + 4].copy_from_slice(&c),
        }
    }

    /// Set every pixel to `color` (RGB colours become opaque).
    pub fn clear(&mut self, color: impl Into<Color>) {
        let px = color.into().to_rgba();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Overwrite a clipped rectangle with `color` (no blending).
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: impl Into<Color>) {
        let color = color.into();
        let Some((x0, y0, x1, y1)) = self.clip_rect(i64::from(x), i64::from(y), w, h) else {
            return;
        };
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.set_pixel(xx as i32, yy as i32, color);
            }
        }
    }

    /// One-pixel outline around the buffer's edge.
    pub fn draw_outline(&mut self, color: impl Into<Color>) {
        let color = color.into();
        let (w, h) = (self.width as i32, self.height as i32);
        for x in 0..w {
            self.set_pixel(x, 0, color);
            self.set_pixel(x, h - 1, color);
        }
        for y in 0..h {
            self.set_pixel(0, y, color);
            self.set_pixel(w - 1, y, color);
        }
    }

    fn clip_rect(&self, x: i64, y: i64, w: u32, h: u32) -> Option<(i64, i64, i64, i64)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(w)).min(i64::from(self.width));
        let y1 = (y + i64::from(h)).min(i64::from(self.height));
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Composite `src` onto this buffer with its top-left corner at `(x, y)`.
    ///
    /// Uses the straight-alpha "over" operator scaled by `opacity`; any part of `src` that falls
    /// outside this buffer is clipped.
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32, opacity: f64) {
        let (x, y) = (i64::from(x), i64::from(y));
        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, src.width, src.height) else {
            return;
        };
        let row_bytes = ((x1 - x0) as usize) * 4;
        let dst_stride = (self.width as usize) * 4;
        let src_stride = (src.width as usize) * 4;
        for yy in y0..y1 {
            let d = (yy as usize) * dst_stride + (x0 as usize) * 4;
            let s = ((yy - y) as usize) * src_stride + ((x0 - x) as usize) * 4;
            over_row(
                &mut self.data[d..d + row_bytes],
                &src.data[s..s + row_bytes],
                opacity,
            );
        }
    }

    /// Copy the `w x h` window whose top-left corner is `(x, y)` without blending.
    ///
    /// Parts of the window outside this buffer come out transparent.
    pub fn crop(&self, x: i32, y: i32, w: u32, h: u32) -> PixelBuffer {
        let mut out = PixelBuffer::blank(w, h);
        let (x, y) = (i64::from(x), i64::from(y));
        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, out.width, out.height) else {
            return out;
        };
        let row_bytes = ((x1 - x0) as usize) * 4;
        let src_stride = (self.width as usize) * 4;
        let dst_stride = (out.width as usize) * 4;
        for yy in y0..y1 {
            let s = (yy as usize) * src_stride + (x0 as usize) * 4;
            let d = ((yy - y) as usize) * dst_stride + ((x0 - x) as usize) * 4;
            out.data[d..d + row_bytes].copy_from_slice(&self.data[s..s + row_bytes]);
        }
        out
    }

    /// Independent deep copy.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
