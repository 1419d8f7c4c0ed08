use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::encode::sink::SinkConfig;
use crate::foundation::error::{ComposerError, ComposerResult};

/// How the loop advances its clock between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pacing {
    /// Wall-clock time; sleep off whatever is left of each frame interval.
    #[default]
    Realtime,
    /// Advance exactly one frame interval per frame and never sleep.
    FixedStep,
}

/// Render loop settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoopConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Outline the focused node in every frame.
    pub debug_focus: bool,
    pub pacing: Pacing,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            fps: 30,
            debug_focus: false,
            pacing: Pacing::Realtime,
        }
    }
}

impl LoopConfig {
    pub fn validate(&self) -> ComposerResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ComposerError::validation(format!(
                "canvas dimensions must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(ComposerError::validation("fps must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> ComposerResult<Self> {
        let cfg: Self = serde_json::from_str(json).context("parse loop config json")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ComposerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read loop config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1)))
    }

    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.width,
            height: self.height,
            fps: self.fps,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/config.rs"]
mod tests;
