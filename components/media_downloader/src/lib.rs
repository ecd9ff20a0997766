// components/media_downloader/src/lib.rs
//! Bridge to the external yt-dlp tool: candidate search and
//! download-and-transcode. The heuristics that decide which result to
//! download live in the candidate_matcher component; this one only runs
//! the tool and parses its output.

mod types;
mod ytdlp;

pub use types::{DownloadError, DownloadTarget};
pub use ytdlp::{AudioDownloader, SearchProvider, YtDlp};
