//! Display sinks: where rendered frames go.

/// PNG frame dumps.
pub mod png;
/// Sink trait, sink configuration and an in-memory sink.
pub mod sink;
/// ANSI truecolor terminal painter.
pub mod terminal;
