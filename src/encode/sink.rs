use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ComposerError, ComposerResult};
use crate::render::buffer::PixelBuffer;

/// Frame geometry and rate a sink is opened with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl SinkConfig {
    pub fn validate(&self) -> ComposerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ComposerError::validation("sink width/height must be non-zero"));
        }
        if self.fps == 0 {
            return Err(ComposerError::validation("sink fps must be non-zero"));
        }
        Ok(())
    }

    /// Reject frames whose size differs from the configured one.
    pub fn check_frame(&self, frame: &PixelBuffer) -> ComposerResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(ComposerError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }
}

/// Destination for rendered frames.
///
/// `begin` and `end` bracket a run; `present` is called once per frame with a buffer the
/// caller will not mutate afterwards.
pub trait DisplaySink {
    fn begin(&mut self, config: SinkConfig) -> ComposerResult<()> {
        config.validate()
    }

    fn present(&mut self, frame: &PixelBuffer) -> ComposerResult<()>;

    fn end(&mut self) -> ComposerResult<()> {
        Ok(())
    }
}

/// Keeps presented frames in memory, optionally only the most recent `limit` of them.
#[derive(Debug, Default)]
pub struct InMemorySink {
    config: Option<SinkConfig>,
    frames: VecDeque<PixelBuffer>,
    limit: Option<usize>,
    presented: u64,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain only the last `n` frames (at least one).
    pub fn keep_last(n: usize) -> Self {
        Self {
            limit: Some(n.max(1)),
            ..Self::default()
        }
    }

    /// Retained frames, oldest first.
    pub fn frames(&self) -> &VecDeque<PixelBuffer> {
        &self.frames
    }

    pub fn last(&self) -> Option<&PixelBuffer> {
        self.frames.back()
    }

    /// Total frames presented, including dropped ones.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.config
    }

    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl DisplaySink for InMemorySink {
    fn begin(&mut self, config: SinkConfig) -> ComposerResult<()> {
        config.validate()?;
        self.config = Some(config);
        self.ended = false;
        Ok(())
    }

    fn present(&mut self, frame: &PixelBuffer) -> ComposerResult<()> {
        if let Some(cfg) = &self.config {
            cfg.check_frame(frame)?;
        }
        if let Some(limit) = self.limit {
            while self.frames.len() >= limit {
                self.frames.pop_front();
            }
        }
        self.frames.push_back(frame.copy());
        self.presented += 1;
        Ok(())
    }

    fn end(&mut self) -> ComposerResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
