// components/acquisition/src/lib.rs
//! Per-track acquisition and the sequential batch loop.
//!
//! The acquirer turns one [`track_primitives::TrackRequest`] into a file on
//! disk by way of the search, download and loudness collaborators; the
//! runner drives it over a whole playlist with progress, logging and
//! cooperative cancellation.

mod acquirer;
mod filename;
mod runner;
mod sinks;

#[cfg(test)]
mod test_support;

pub use acquirer::{AcquireConfig, Outcome, TrackAcquirer, DEFAULT_SEARCH_RESULTS};
pub use filename::{clean_label, output_filename, AUDIO_EXTENSION, FILENAME_BUDGET};
pub use runner::{BatchRunner, RunStatus, RunSummary};
pub use sinks::{ConsoleSink, LogSink, ProgressSink};
