// components/acquisition/src/sinks.rs
//! Narrow capability interfaces for reporting, so the batch runner stays
//! presentation-agnostic: a GUI, a TUI or a test harness each plug in
//! their own sinks.

/// Receives `(current, total)` after every processed track, in strictly
/// increasing order, regardless of the track's outcome.
pub trait ProgressSink: Send + Sync {
    fn update(&self, current: usize, total: usize);
}

/// Receives human-readable status lines.
pub trait LogSink: Send + Sync {
    fn line(&self, message: &str);
}

/// Default sink: plain console output.
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn update(&self, current: usize, total: usize) {
        println!("[{current}/{total}]");
    }
}

impl LogSink for ConsoleSink {
    fn line(&self, message: &str) {
        println!("{message}");
    }
}
