//! The renderable node abstraction and the focus model shared by composites.

/// `Component` trait, node bookkeeping and render context.
pub mod component;
/// Ordered focus ring.
pub mod focus;
