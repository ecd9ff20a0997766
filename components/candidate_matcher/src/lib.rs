// components/candidate_matcher/src/lib.rs
//! Picks the best search result for an (artist, title) query.
//!
//! The selection is an ordered cascade of stages. Each stage either returns
//! a definitive pick or defers to the next one:
//!
//! 1. duration filter (hard constraint, inclusive bound)
//! 2. channel match: uploader name contains an artist keyword, literally or
//!    transliterated to Cyrillic; "live" titles are excluded here unless
//!    they also say "official"; shortest duration wins
//! 3. "official audio" / "audio" title keywords
//! 4. "official video" / "official" title keywords
//! 5. first candidate that passed the duration filter

mod translit;

use serde::{Deserialize, Serialize};

pub use translit::to_cyrillic;

/// Upper bound on track length. Anything longer is assumed to be a mix,
/// a full album or a live concert that happened to match the query.
pub const DEFAULT_MAX_DURATION_SECONDS: u64 = 420;

/// One raw search result, as reported by the search collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub url: String,
    pub title: String,
    /// Reported length in seconds; `None` when the source did not know it.
    pub duration_seconds: Option<u64>,
    /// Publishing channel or account name, possibly empty.
    pub uploader: String,
}

/// Outcome of [`select_best`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A specific candidate URL to download.
    Target(String),
    /// No candidate satisfied the duration constraint; the caller should
    /// fall back to a generic first-result download for the same query.
    NoSpecificTarget,
}

/// Select the single best candidate for `query`, or signal that the caller
/// must fall back to a generic search download.
///
/// If any candidate satisfies the duration constraint the result references
/// one of those candidates; `NoSpecificTarget` is returned only when none do.
pub fn select_best(
    query: &str,
    candidates: &[SearchCandidate],
    max_duration_seconds: u64,
) -> Selection {
    let filtered: Vec<&SearchCandidate> = candidates
        .iter()
        .filter(|c| matches!(c.duration_seconds, Some(d) if d <= max_duration_seconds))
        .collect();

    if filtered.is_empty() {
        return Selection::NoSpecificTarget;
    }

    let keywords = artist_keywords(query);

    let picked = channel_stage(&keywords, &filtered)
        .or_else(|| title_keyword_stage(&filtered, &["official audio", "audio"]))
        .or_else(|| title_keyword_stage(&filtered, &["official video", "official"]))
        .unwrap_or(filtered[0]);

    Selection::Target(picked.url.clone())
}

/// The first 3 whitespace tokens of the query (artist plus the start of the
/// title), lowercased. Tokens of 3 characters or fewer are too ambiguous
/// for substring matching and are dropped.
fn artist_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .take(3)
        .filter(|token| token.chars().count() > 3)
        .map(str::to_string)
        .collect()
}

/// Candidates whose uploader name contains an artist keyword, either
/// literally or after transliteration. Among those, live bootlegs are
/// excluded ("live" in the title without "official"), and the shortest
/// upload wins: studio versions are typically the shortest thing an
/// official channel publishes. Ties keep the earliest candidate.
fn channel_stage<'a>(
    keywords: &[String],
    filtered: &[&'a SearchCandidate],
) -> Option<&'a SearchCandidate> {
    filtered
        .iter()
        .copied()
        .filter(|c| {
            let uploader = c.uploader.to_lowercase();
            let matched = keywords.iter().any(|keyword| {
                uploader.contains(keyword.as_str())
                    || uploader.contains(&translit::to_cyrillic(keyword))
            });
            if !matched {
                return false;
            }
            let title = c.title.to_lowercase();
            !title.contains("live") || title.contains("official")
        })
        .min_by_key(|c| c.duration_seconds.unwrap_or(u64::MAX))
}

/// First candidate, in original order, whose title contains one of the
/// priority keywords and does not contain "live". Keywords are tried in
/// order: a full sweep for the first keyword happens before the second is
/// considered at all.
fn title_keyword_stage<'a>(
    filtered: &[&'a SearchCandidate],
    keywords: &[&str],
) -> Option<&'a SearchCandidate> {
    for keyword in keywords {
        for candidate in filtered {
            let title = candidate.title.to_lowercase();
            if title.contains(keyword) && !title.contains("live") {
                return Some(candidate);
            }
        }
    }
    None
}
