// components/loudness/src/lib.rs
//! Bridge to the external ffmpeg loudness normalizer.
//!
//! Tracks arrive from different uploads at wildly different levels; the
//! loudnorm pass brings them to a common integrated loudness so a playlist
//! plays back evenly.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// EBU R128 targets: integrated loudness, true-peak ceiling, loudness range.
const TARGET_INTEGRATED_LUFS: &str = "-16";
const TARGET_TRUE_PEAK_DB: &str = "-1.5";
const TARGET_LOUDNESS_RANGE_LU: &str = "11";
const OUTPUT_SAMPLE_RATE_HZ: &str = "48000";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Required dependency not found: {0}")]
    ToolNotFound(&'static str),

    #[error("Normalization failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces a loudness-adjusted copy of `input` at `output`, or fails
/// without modifying the input.
#[async_trait]
pub trait LoudnessNormalizer: Send + Sync {
    async fn normalize(&self, input: &Path, output: &Path) -> Result<(), NormalizeError>;
}

/// Production implementation backed by the ffmpeg binary.
pub struct FfmpegLoudnorm;

impl FfmpegLoudnorm {
    /// Verify the ffmpeg binary is reachable before starting a batch.
    pub fn ensure_available() -> Result<(), NormalizeError> {
        which::which("ffmpeg")
            .map(|_| ())
            .map_err(|_| NormalizeError::ToolNotFound("ffmpeg"))
    }

    fn filter_spec() -> String {
        format!(
            "loudnorm=I={TARGET_INTEGRATED_LUFS}:TP={TARGET_TRUE_PEAK_DB}:LRA={TARGET_LOUDNESS_RANGE_LU}"
        )
    }
}

#[async_trait]
impl LoudnessNormalizer for FfmpegLoudnorm {
    async fn normalize(&self, input: &Path, output: &Path) -> Result<(), NormalizeError> {
        let result = Command::new("ffmpeg")
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-af")
            .arg(Self::filter_spec())
            .arg("-ar")
            .arg(OUTPUT_SAMPLE_RATE_HZ)
            .arg("-loglevel")
            .arg("error")
            .arg(output)
            .output()
            .await?;

        if !result.status.success() {
            return Err(NormalizeError::Failed(
                String::from_utf8_lossy(&result.stderr).into_owned(),
            ));
        }

        tracing::debug!(input = %input.display(), "loudness normalized");
        Ok(())
    }
}
