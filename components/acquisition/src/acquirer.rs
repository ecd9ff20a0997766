// components/acquisition/src/acquirer.rs
use std::path::Path;
use std::sync::Arc;

use candidate_matcher::{select_best, Selection, DEFAULT_MAX_DURATION_SECONDS};
use loudness::LoudnessNormalizer;
use media_downloader::{AudioDownloader, DownloadTarget, SearchProvider};
use track_primitives::TrackRequest;

use crate::filename::output_filename;

/// How many top search results the matcher gets to look at.
pub const DEFAULT_SEARCH_RESULTS: usize = 5;

#[derive(Debug, Clone)]
pub struct AcquireConfig {
    pub max_duration_seconds: u64,
    pub search_results: usize,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            max_duration_seconds: DEFAULT_MAX_DURATION_SECONDS,
            search_results: DEFAULT_SEARCH_RESULTS,
        }
    }
}

/// Per-track result. Failures are recovered at this granularity; they never
/// escalate into a batch-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Downloaded,
    Skipped,
    Failed(String),
}

/// Orchestrates one track: output path, skip check, search, candidate
/// selection, download, optional loudness normalization.
pub struct TrackAcquirer {
    search: Arc<dyn SearchProvider>,
    downloader: Arc<dyn AudioDownloader>,
    normalizer: Arc<dyn LoudnessNormalizer>,
    config: AcquireConfig,
}

impl TrackAcquirer {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        downloader: Arc<dyn AudioDownloader>,
        normalizer: Arc<dyn LoudnessNormalizer>,
    ) -> Self {
        Self {
            search,
            downloader,
            normalizer,
            config: AcquireConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AcquireConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn acquire(&self, track: &TrackRequest, output_dir: &Path, normalize: bool) -> Outcome {
        if !track.is_processable() {
            return Outcome::Failed("missing title or artist".to_string());
        }

        let filename = output_filename(track.index, &track.artist, &track.title);
        let output_path = output_dir.join(&filename);

        // Existence is the only completion marker; no content verification.
        // This is what makes interrupted batches resumable.
        if output_path.exists() {
            return Outcome::Skipped;
        }

        let query = format!("{} {}", track.artist, track.title);
        let target = self.choose_target(&query).await;

        if let Err(err) = self.downloader.download(&target, &output_path).await {
            return Outcome::Failed(err.to_string());
        }

        if normalize {
            self.normalize_in_place(&output_path).await;
        }

        Outcome::Downloaded
    }

    /// Search and run the candidate matcher. A failed search is not fatal:
    /// it degrades to the generic first-result download, same as when every
    /// candidate exceeds the duration cap.
    async fn choose_target(&self, query: &str) -> DownloadTarget {
        match self
            .search
            .search(query, self.config.search_results)
            .await
        {
            Ok(candidates) => {
                match select_best(query, &candidates, self.config.max_duration_seconds) {
                    Selection::Target(url) => DownloadTarget::Url(url),
                    Selection::NoSpecificTarget => DownloadTarget::Search(query.to_string()),
                }
            }
            Err(err) => {
                tracing::warn!(query, error = %err, "search failed, using generic fallback");
                DownloadTarget::Search(query.to_string())
            }
        }
    }

    /// Normalize into a temporary sibling, then atomically replace the
    /// original. Failure leaves the un-normalized file in place; the track
    /// still counts as downloaded.
    async fn normalize_in_place(&self, path: &Path) {
        let temp = path.with_extension("norm.mp3");

        match self.normalizer.normalize(path, &temp).await {
            Ok(()) => {
                if let Err(err) = tokio::fs::rename(&temp, path).await {
                    tracing::warn!(path = %path.display(), error = %err, "could not replace with normalized file");
                    let _ = tokio::fs::remove_file(&temp).await;
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "normalization failed, keeping original");
                let _ = tokio::fs::remove_file(&temp).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedSearch, StubDownloader, StubNormalizer};
    use assert_matches::assert_matches;
    use candidate_matcher::SearchCandidate;

    fn short_candidate(url: &str) -> SearchCandidate {
        SearchCandidate {
            url: url.to_string(),
            title: "Song (Official Audio)".to_string(),
            duration_seconds: Some(200),
            uploader: "Channel".to_string(),
        }
    }

    fn long_candidate(url: &str) -> SearchCandidate {
        SearchCandidate {
            url: url.to_string(),
            title: "Song (Full Concert)".to_string(),
            duration_seconds: Some(4000),
            uploader: "Channel".to_string(),
        }
    }

    fn acquirer(
        search: Arc<ScriptedSearch>,
        downloader: Arc<StubDownloader>,
        normalizer: Arc<StubNormalizer>,
    ) -> TrackAcquirer {
        TrackAcquirer::new(search, downloader, normalizer)
    }

    #[tokio::test]
    async fn test_downloads_chosen_candidate_url() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::returning(vec![short_candidate("https://v/1")]));
        let downloader = Arc::new(StubDownloader::succeeding());
        let normalizer = Arc::new(StubNormalizer::succeeding());

        let track = TrackRequest::new(1, "Song", "Artist");
        let outcome = acquirer(search.clone(), downloader.clone(), normalizer)
            .acquire(&track, dir.path(), false)
            .await;

        assert_eq!(outcome, Outcome::Downloaded);
        assert_eq!(
            downloader.targets(),
            vec![DownloadTarget::Url("https://v/1".to_string())]
        );
        assert_eq!(search.queries(), vec!["Artist Song".to_string()]);
    }

    #[tokio::test]
    async fn test_falls_back_to_generic_search_when_all_too_long() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::returning(vec![long_candidate("https://v/1")]));
        let downloader = Arc::new(StubDownloader::succeeding());
        let normalizer = Arc::new(StubNormalizer::succeeding());

        let track = TrackRequest::new(1, "Song", "Artist");
        let outcome = acquirer(search, downloader.clone(), normalizer)
            .acquire(&track, dir.path(), false)
            .await;

        assert_eq!(outcome, Outcome::Downloaded);
        assert_eq!(
            downloader.targets(),
            vec![DownloadTarget::Search("Artist Song".to_string())]
        );
    }

    #[tokio::test]
    async fn test_search_failure_degrades_to_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::failing());
        let downloader = Arc::new(StubDownloader::succeeding());
        let normalizer = Arc::new(StubNormalizer::succeeding());

        let track = TrackRequest::new(1, "Song", "Artist");
        let outcome = acquirer(search, downloader.clone(), normalizer)
            .acquire(&track, dir.path(), false)
            .await;

        assert_eq!(outcome, Outcome::Downloaded);
        assert_eq!(
            downloader.targets(),
            vec![DownloadTarget::Search("Artist Song".to_string())]
        );
    }

    #[tokio::test]
    async fn test_second_run_skips_without_touching_collaborators() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::returning(vec![short_candidate("https://v/1")]));
        let downloader = Arc::new(StubDownloader::succeeding());
        let normalizer = Arc::new(StubNormalizer::succeeding());
        let acquirer = acquirer(search.clone(), downloader.clone(), normalizer);

        let track = TrackRequest::new(1, "Song", "Artist");
        let first = acquirer.acquire(&track, dir.path(), false).await;
        let second = acquirer.acquire(&track, dir.path(), false).await;

        assert_eq!(first, Outcome::Downloaded);
        assert_eq!(second, Outcome::Skipped);
        assert_eq!(search.queries().len(), 1);
        assert_eq!(downloader.targets().len(), 1);
    }

    #[tokio::test]
    async fn test_download_failure_marks_track_failed() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::returning(vec![short_candidate("https://v/1")]));
        let downloader = Arc::new(StubDownloader::failing());
        let normalizer = Arc::new(StubNormalizer::succeeding());

        let track = TrackRequest::new(1, "Song", "Artist");
        let outcome = acquirer(search, downloader, normalizer)
            .acquire(&track, dir.path(), true)
            .await;

        assert_matches!(outcome, Outcome::Failed(reason) if !reason.is_empty());
    }

    #[tokio::test]
    async fn test_normalization_replaces_file_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::returning(vec![short_candidate("https://v/1")]));
        let downloader = Arc::new(StubDownloader::succeeding());
        let normalizer = Arc::new(StubNormalizer::succeeding());

        let track = TrackRequest::new(1, "Song", "Artist");
        let outcome = acquirer(search, downloader, normalizer)
            .acquire(&track, dir.path(), true)
            .await;

        assert_eq!(outcome, Outcome::Downloaded);
        let path = dir.path().join("01. Artist - Song.mp3");
        assert_eq!(std::fs::read(&path).unwrap(), b"normalized");
        // No temporary sibling left behind.
        assert!(!dir.path().join("01. Artist - Song.norm.mp3").exists());
    }

    #[tokio::test]
    async fn test_normalization_failure_is_non_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::returning(vec![short_candidate("https://v/1")]));
        let downloader = Arc::new(StubDownloader::succeeding());
        let normalizer = Arc::new(StubNormalizer::failing());

        let track = TrackRequest::new(1, "Song", "Artist");
        let outcome = acquirer(search, downloader, normalizer.clone())
            .acquire(&track, dir.path(), true)
            .await;

        assert_eq!(outcome, Outcome::Downloaded);
        assert_eq!(normalizer.calls(), 1);
        // The un-normalized download survives.
        let path = dir.path().join("01. Artist - Song.mp3");
        assert_eq!(std::fs::read(&path).unwrap(), b"downloaded");
    }

    #[tokio::test]
    async fn test_unprocessable_track_fails_without_collaborator_calls() {
        let dir = tempfile::tempdir().unwrap();
        let search = Arc::new(ScriptedSearch::returning(vec![]));
        let downloader = Arc::new(StubDownloader::succeeding());
        let normalizer = Arc::new(StubNormalizer::succeeding());

        let track = TrackRequest::new(1, "", "Artist");
        let outcome = acquirer(search.clone(), downloader.clone(), normalizer)
            .acquire(&track, dir.path(), false)
            .await;

        assert_matches!(outcome, Outcome::Failed(_));
        assert!(search.queries().is_empty());
        assert!(downloader.targets().is_empty());
    }
}
