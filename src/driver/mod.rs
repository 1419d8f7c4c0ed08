//! Render loop driver: loop configuration, input commands and the scene orchestrator.

/// Loop configuration loaded from JSON.
pub mod config;
/// Input command queue fed from a keyboard reader thread.
pub mod input;
/// Scene registry, clocks and the paced render loop.
pub mod orchestrator;
