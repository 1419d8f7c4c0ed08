//! Error taxonomy, tagged values and small numeric helpers shared by every other module.

/// Error types and result aliases.
pub mod error;
/// Channel arithmetic and pixel-space conversions.
pub mod math;
/// Tagged values, property bags and state snapshots.
pub mod value;
