//! Pixel storage, compositing and per-node render caching.

/// RGBA pixel buffer.
pub mod buffer;
/// Per-node FIFO render cache.
pub mod cache;
/// Straight-alpha "over" compositing.
pub mod composite;
/// Stable 128-bit fingerprints of state snapshots.
pub mod fingerprint;
