//! Composite nodes that place their children automatically.

/// Stacks, grids and overlays.
pub mod stack;
