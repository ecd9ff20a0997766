// components/acquisition/src/test_support.rs
//! Scripted collaborator doubles shared by the acquirer and runner tests.

use std::path::Path;

use async_trait::async_trait;
use candidate_matcher::SearchCandidate;
use loudness::{LoudnessNormalizer, NormalizeError};
use media_downloader::{AudioDownloader, DownloadError, DownloadTarget, SearchProvider};
use parking_lot::Mutex;

pub struct ScriptedSearch {
    candidates: Vec<SearchCandidate>,
    fail: bool,
    queries: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn returning(candidates: Vec<SearchCandidate>) -> Self {
        Self {
            candidates,
            fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            candidates: Vec::new(),
            fail: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchProvider for ScriptedSearch {
    async fn search(
        &self,
        query: &str,
        _limit: usize,
    ) -> Result<Vec<SearchCandidate>, DownloadError> {
        self.queries.lock().push(query.to_string());
        if self.fail {
            return Err(DownloadError::SearchFailed("scripted failure".to_string()));
        }
        Ok(self.candidates.clone())
    }
}

pub struct StubDownloader {
    fail: bool,
    /// Substrings of the tool argument that should fail, for per-track
    /// failure scripting in batch tests.
    fail_matching: Vec<String>,
    targets: Mutex<Vec<DownloadTarget>>,
}

impl StubDownloader {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            fail_matching: Vec::new(),
            targets: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            fail_matching: Vec::new(),
            targets: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_for(needle: impl Into<String>) -> Self {
        Self {
            fail: false,
            fail_matching: vec![needle.into()],
            targets: Mutex::new(Vec::new()),
        }
    }

    pub fn targets(&self) -> Vec<DownloadTarget> {
        self.targets.lock().clone()
    }
}

#[async_trait]
impl AudioDownloader for StubDownloader {
    async fn download(
        &self,
        target: &DownloadTarget,
        output: &Path,
    ) -> Result<(), DownloadError> {
        self.targets.lock().push(target.clone());

        let arg = target.as_tool_arg();
        if self.fail || self.fail_matching.iter().any(|needle| arg.contains(needle)) {
            return Err(DownloadError::DownloadFailed("scripted failure".to_string()));
        }

        tokio::fs::write(output, b"downloaded").await?;
        Ok(())
    }
}

pub struct StubNormalizer {
    fail: bool,
    calls: Mutex<usize>,
}

impl StubNormalizer {
    pub fn succeeding() -> Self {
        Self {
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl LoudnessNormalizer for StubNormalizer {
    async fn normalize(&self, _input: &Path, output: &Path) -> Result<(), NormalizeError> {
        *self.calls.lock() += 1;
        if self.fail {
            return Err(NormalizeError::Failed("scripted failure".to_string()));
        }
        tokio::fs::write(output, b"normalized").await?;
        Ok(())
    }
}
