// bases/fetch_cli/src/app.rs
use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::Result;

use acquisition::{AcquireConfig, BatchRunner, TrackAcquirer, DEFAULT_SEARCH_RESULTS};
use loudness::FfmpegLoudnorm;
use media_downloader::YtDlp;
use track_primitives::Playlist;
use translations::Language;

use crate::args::Args;
use crate::output::OutputHandler;

pub struct App {
    args: Args,
    output: Arc<OutputHandler>,
}

impl App {
    pub fn new(args: Args) -> Self {
        let language = Language::from_tag(&args.language).unwrap_or_default();
        let output = Arc::new(OutputHandler::new(language, args.verbose));
        Self { args, output }
    }

    pub async fn run(&self) -> Result<()> {
        // An unreadable or empty manifest is the one fatal condition; the
        // batch never starts.
        let playlist = playlist_csv::read_manifest(&self.args.manifest)?;
        self.output
            .print_playlist(playlist.name.as_deref(), playlist.len());

        let normalize = !self.args.no_normalize;
        YtDlp::ensure_available()?;
        if normalize {
            FfmpegLoudnorm::ensure_available()?;
        }

        let output_dir = self.resolve_output_dir(&playlist);
        tokio::fs::create_dir_all(&output_dir).await?;
        self.output.print_start(playlist.len(), &output_dir);

        let acquirer = TrackAcquirer::new(
            Arc::new(YtDlp),
            Arc::new(YtDlp),
            Arc::new(FfmpegLoudnorm),
        )
        .with_config(AcquireConfig {
            max_duration_seconds: self.args.max_duration,
            search_results: DEFAULT_SEARCH_RESULTS,
        });

        let runner = BatchRunner::new(acquirer, &output_dir, normalize)
            .with_progress(self.output.clone())
            .with_log(self.output.clone());

        // The batch runs on its own task so the main task stays free to
        // watch for Ctrl-C; cancellation takes effect at the next track
        // boundary.
        let cancel = runner.cancellation_token();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });

        let tracks = playlist.tracks.clone();
        let worker = tokio::spawn(async move { runner.run(&tracks).await });
        let summary = worker.await?;

        self.output.print_summary(&summary, &output_dir);
        Ok(())
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        self.output.print_error(error);
    }

    fn resolve_output_dir(&self, playlist: &Playlist) -> PathBuf {
        if let Some(dir) = &self.args.output_dir {
            return dir.clone();
        }
        let parent = self
            .args
            .manifest
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        parent.join(playlist.default_dir_name())
    }
}
