// components/media_downloader/src/ytdlp.rs
use std::path::Path;

use async_trait::async_trait;
use candidate_matcher::SearchCandidate;
use serde::Deserialize;
use tokio::process::Command;

use crate::types::{DownloadError, DownloadTarget};

/// Issues a free-text query against the video platform and returns the raw
/// ranked results. One blocking call per track, output captured in full
/// before parsing.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize)
        -> Result<Vec<SearchCandidate>, DownloadError>;
}

/// Fetches a target and transcodes it to an audio file at `output`,
/// embedding basic metadata and artwork when available.
#[async_trait]
pub trait AudioDownloader: Send + Sync {
    async fn download(&self, target: &DownloadTarget, output: &Path)
        -> Result<(), DownloadError>;
}

/// Production implementation backed by the yt-dlp binary.
pub struct YtDlp;

impl YtDlp {
    /// Verify the yt-dlp binary is reachable before starting a batch.
    pub fn ensure_available() -> Result<(), DownloadError> {
        which::which("yt-dlp")
            .map(|_| ())
            .map_err(|_| DownloadError::ToolNotFound("yt-dlp"))
    }
}

#[async_trait]
impl SearchProvider for YtDlp {
    async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchCandidate>, DownloadError> {
        let output = Command::new("yt-dlp")
            .arg("--dump-json")
            .arg("--skip-download")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(format!("ytsearch{limit}:{query}"))
            .output()
            .await?;

        if !output.status.success() {
            return Err(DownloadError::SearchFailed(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        let candidates = parse_search_output(&output.stdout)?;
        tracing::debug!(query, results = candidates.len(), "search completed");
        Ok(candidates)
    }
}

#[async_trait]
impl AudioDownloader for YtDlp {
    async fn download(
        &self,
        target: &DownloadTarget,
        output: &Path,
    ) -> Result<(), DownloadError> {
        let output_str = output
            .to_str()
            .ok_or_else(|| DownloadError::DownloadFailed("Invalid output path".to_string()))?;

        let result = Command::new("yt-dlp")
            .arg("-x")
            .arg("--audio-format")
            .arg("mp3")
            .arg("--audio-quality")
            .arg("0")
            .arg("--output")
            .arg(output_str)
            .arg("--add-metadata")
            .arg("--embed-thumbnail")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(target.as_tool_arg())
            .output()
            .await?;

        if !result.status.success() {
            return Err(DownloadError::DownloadFailed(
                String::from_utf8_lossy(&result.stderr).into_owned(),
            ));
        }

        Ok(())
    }
}

/// yt-dlp prints one JSON object per result line.
#[derive(Debug, Deserialize)]
struct SearchEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    webpage_url: Option<String>,
    #[serde(default)]
    uploader: Option<String>,
    #[serde(default)]
    channel: Option<String>,
}

impl SearchEntry {
    fn into_candidate(self) -> SearchCandidate {
        SearchCandidate {
            url: self.webpage_url.unwrap_or_default(),
            title: self.title.unwrap_or_else(|| "Unknown".to_string()),
            // Zero means yt-dlp did not know the length; the matcher treats
            // unknown durations as failing the duration constraint.
            duration_seconds: self
                .duration
                .filter(|d| *d > 0.0)
                .map(|d| d.round() as u64),
            uploader: self.uploader.or(self.channel).unwrap_or_default(),
        }
    }
}

fn parse_search_output(stdout: &[u8]) -> Result<Vec<SearchCandidate>, DownloadError> {
    let text = String::from_utf8_lossy(stdout);
    let mut candidates = Vec::new();

    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        let entry: SearchEntry = serde_json::from_str(line)
            .map_err(|e| DownloadError::SearchFailed(e.to_string()))?;
        candidates.push(entry.into_candidate());
    }

    Ok(candidates)
}
