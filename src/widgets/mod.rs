//! Leaf nodes: solid fills, indicators, scrollable viewports and bitmaps.

use crate::foundation::error::{ComposerError, ComposerResult};

/// Solid colour rectangle.
pub mod fill;
/// Static bitmap from a file or buffer.
pub mod image;
/// Horizontal or vertical progress indicator.
pub mod progress;
/// Viewport over larger pixel content with optional autoscroll.
pub mod scroll_view;
/// Scroll position indicator.
pub mod scrollbar;

/// Horizontal or vertical axis of a bar-like widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

pub(crate) fn check_size(kind: &str, width: u32, height: u32) -> ComposerResult<()> {
    if width == 0 || height == 0 {
        return Err(ComposerError::validation(format!(
            "{kind} dimensions must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}
