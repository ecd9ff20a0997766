// bases/fetch_cli/src/output.rs
use std::path::Path;

use acquisition::{LogSink, ProgressSink, RunStatus, RunSummary};
use translations::{Key, Language, Translator};

/// Console presentation: localized framing lines, per-track log pass-through
/// and a progress line after every track.
pub struct OutputHandler {
    translator: Translator,
    verbose: bool,
}

impl OutputHandler {
    pub fn new(language: Language, verbose: bool) -> Self {
        Self {
            translator: Translator::new(language),
            verbose,
        }
    }

    pub fn print_playlist(&self, name: Option<&str>, track_count: usize) {
        if let Some(name) = name {
            println!(
                "{}",
                self.translator.format(Key::PlaylistName, &[("name", name)])
            );
        }
        println!(
            "{}",
            self.translator
                .format(Key::TracksFound, &[("count", &track_count.to_string())])
        );
    }

    pub fn print_start(&self, track_count: usize, output_dir: &Path) {
        println!(
            "{}",
            self.translator.format(
                Key::StartingDownload,
                &[("count", &track_count.to_string())]
            )
        );
        println!(
            "{}",
            self.translator.format(
                Key::SavingTo,
                &[("folder", &output_dir.display().to_string())]
            )
        );
    }

    pub fn print_summary(&self, summary: &RunSummary, output_dir: &Path) {
        match summary.status {
            RunStatus::Completed => println!("{}", self.translator.tr(Key::StatusDone)),
            RunStatus::Cancelled => println!("{}", self.translator.tr(Key::StoppedByUser)),
        }
        println!(
            "{}",
            self.translator.format(
                Key::StatusDownloading,
                &[
                    ("current", &summary.processed.to_string()),
                    ("total", &summary.total.to_string()),
                ]
            )
        );
        println!(
            "{}",
            self.translator.format(
                Key::SavingTo,
                &[("folder", &output_dir.display().to_string())]
            )
        );

        if self.verbose {
            println!(
                "downloaded: {}, skipped: {}, failed: {} ({} .. {})",
                summary.downloaded, summary.skipped, summary.failed,
                summary.started_at, summary.finished_at
            );
        }
    }

    pub fn print_error(&self, error: &color_eyre::Report) {
        eprintln!(
            "{}",
            self.translator
                .format(Key::DownloadError, &[("error", &error.to_string())])
        );

        if self.verbose {
            error.chain().skip(1).for_each(|cause| {
                eprintln!("  caused by: {cause}");
            });
        }
    }
}

impl LogSink for OutputHandler {
    fn line(&self, message: &str) {
        println!("{message}");
    }
}

impl ProgressSink for OutputHandler {
    fn update(&self, current: usize, total: usize) {
        println!(
            "{}",
            self.translator.format(
                Key::StatusDownloading,
                &[
                    ("current", &current.to_string()),
                    ("total", &total.to_string()),
                ]
            )
        );
    }
}
