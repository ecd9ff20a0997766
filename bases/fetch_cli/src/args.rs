// bases/fetch_cli/src/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Download a playlist manifest as volume-normalized MP3 files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the playlist manifest CSV
    pub manifest: PathBuf,

    /// Directory to store downloaded files; defaults to a folder named
    /// after the playlist, next to the manifest
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Skip the loudness normalization pass
    #[arg(long)]
    pub no_normalize: bool,

    /// Interface language (en, es, fr)
    #[arg(short, long, default_value = "en")]
    pub language: String,

    /// Maximum acceptable track length in seconds
    #[arg(long, default_value_t = 420)]
    pub max_duration: u64,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
