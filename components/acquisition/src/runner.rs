// components/acquisition/src/runner.rs
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use track_primitives::TrackRequest;

use crate::acquirer::{Outcome, TrackAcquirer};
use crate::sinks::{ConsoleSink, LogSink, ProgressSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub status: RunStatus,
    pub total: usize,
    pub processed: usize,
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives the acquirer over an ordered track list, strictly one track at a
/// time. Parallel downloads would only trip rate limiting on the external
/// search/download tool.
///
/// Cancellation is cooperative and only observed at track boundaries: an
/// in-flight external process finishes (or fails) on its own first. No
/// timeout is imposed on external invocations, so a hung tool blocks the
/// batch; that is a documented limitation, not something silently papered
/// over here.
pub struct BatchRunner {
    acquirer: TrackAcquirer,
    output_dir: PathBuf,
    normalize: bool,
    progress: Arc<dyn ProgressSink>,
    log: Arc<dyn LogSink>,
    cancel: CancellationToken,
}

impl BatchRunner {
    pub fn new(acquirer: TrackAcquirer, output_dir: impl Into<PathBuf>, normalize: bool) -> Self {
        Self {
            acquirer,
            output_dir: output_dir.into(),
            normalize,
            progress: Arc::new(ConsoleSink),
            log: Arc::new(ConsoleSink),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.progress = sink;
        self
    }

    pub fn with_log(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log = sink;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Process every track once, in playlist order. Per-track failures are
    /// logged and counted but never abort the batch; there are no retries.
    pub async fn run(&self, tracks: &[TrackRequest]) -> RunSummary {
        let started_at = Utc::now();
        let total = tracks.len();
        let mut processed = 0;
        let mut downloaded = 0;
        let mut skipped = 0;
        let mut failed = 0;
        let mut status = RunStatus::Completed;

        for track in tracks {
            if self.cancel.is_cancelled() {
                self.log.line("Stopped by user");
                status = RunStatus::Cancelled;
                break;
            }

            let label = track.display_label();
            let outcome = self
                .acquirer
                .acquire(track, &self.output_dir, self.normalize)
                .await;

            match &outcome {
                Outcome::Downloaded => {
                    downloaded += 1;
                    self.log
                        .line(&format!("[{:02}] Downloaded: {label}", track.index));
                }
                Outcome::Skipped => {
                    skipped += 1;
                    self.log
                        .line(&format!("[{:02}] Already present: {label}", track.index));
                }
                Outcome::Failed(reason) => {
                    failed += 1;
                    let first_line = reason.lines().next().unwrap_or("unknown");
                    self.log.line(&format!(
                        "[{:02}] Failed: {label} ({first_line})",
                        track.index
                    ));
                }
            }

            processed += 1;
            self.progress.update(processed, total);
        }

        RunSummary {
            status,
            total,
            processed,
            downloaded,
            skipped,
            failed,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
