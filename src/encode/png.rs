use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{DisplaySink, SinkConfig};
use crate::foundation::error::{ComposerError, ComposerResult};
use crate::render::buffer::PixelBuffer;

/// Create the parent directory of `path` when it has one.
pub fn ensure_parent_dir(path: &Path) -> ComposerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write one frame as an RGBA PNG.
pub fn save_png(frame: &PixelBuffer, path: &Path) -> ComposerResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Writes every presented frame to `<dir>/<prefix><index>.png`, index zero-padded to 5 digits.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    overwrite: bool,
    written: u64,
    config: Option<SinkConfig>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame_".to_owned(),
            overwrite: true,
            written: 0,
            config: None,
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Refuse to start when the first frame file already exists.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("{}{index:05}.png", self.prefix))
    }

    pub fn frames_written(&self) -> u64 {
        self.written
    }
}

impl DisplaySink for PngSequenceSink {
    fn begin(&mut self, config: SinkConfig) -> ComposerResult<()> {
        config.validate()?;
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create output directory '{}'", self.dir.display()))?;
        let first = self.frame_path(0);
        if !self.overwrite && first.exists() {
            return Err(ComposerError::validation(format!(
                "output file '{}' already exists",
                first.display()
            )));
        }
        self.written = 0;
        self.config = Some(config);
        Ok(())
    }

    fn present(&mut self, frame: &PixelBuffer) -> ComposerResult<()> {
        if let Some(cfg) = &self.config {
            cfg.check_frame(frame)?;
        }
        let path = self.frame_path(self.written);
        save_png(frame, &path)?;
        tracing::trace!(path = %path.display(), "wrote frame");
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
