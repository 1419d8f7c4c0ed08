//! Time-driven mutators of scene children's property bags.

/// The `Animation` sum type and shared timing.
pub mod anim;
/// `Sequence`, `Parallel` and `Loop`.
pub mod combinators;
/// Easing curves.
pub mod ease;
/// Bulk builders and scheduling helpers.
pub mod ops;
/// Closed-form physics animations.
pub mod physics;
/// Parametric tweens, fades and slides.
pub mod tween;
