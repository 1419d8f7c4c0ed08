/// Convenience result type used across the composer.
pub type ComposerResult<T> = Result<T, ComposerError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only construction-time misconfiguration and sink IO surface as errors. Per-tick anomalies
/// (animations aimed at missing children, unknown phase names) are logged and absorbed.
#[derive(thiserror::Error, Debug)]
pub enum ComposerError {
    /// Invalid user-provided configuration (dimensions, fps, names).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid animation configuration (durations, empty groups, physics constants).
    #[error("animation error: {0}")]
    Animation(String),

    /// Scene registry and scene graph misuse.
    #[error("scene error: {0}")]
    Scene(String),

    /// IO failure inside a display sink or asset loader.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposerError {
    /// Build a [`ComposerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ComposerError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ComposerError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
