// components/track_primitives/src/lib.rs
use serde::{Deserialize, Serialize};

/// One unit of download work, taken from a playlist listing.
///
/// `index` is the 1-based position within the playlist. It is assigned
/// sequentially in playlist order and never reused within one run; the
/// output filename prefix is derived from it, which is what makes re-runs
/// resumable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRequest {
    pub index: u32,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
}

impl TrackRequest {
    pub fn new(index: u32, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            artist: artist.into(),
            album: None,
        }
    }

    pub fn with_album(
        index: u32,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
    ) -> Self {
        Self {
            index,
            title: title.into(),
            artist: artist.into(),
            album: Some(album.into()),
        }
    }

    /// A track needs both a title and an artist to be worth searching for.
    pub fn is_processable(&self) -> bool {
        !self.title.trim().is_empty() && !self.artist.trim().is_empty()
    }

    /// Human readable label used in log lines.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.artist.trim(), self.title.trim())
    }
}

/// An ordered track listing, optionally carrying the playlist's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub name: Option<String>,
    pub tracks: Vec<TrackRequest>,
}

impl Playlist {
    pub fn new(name: Option<String>, tracks: Vec<TrackRequest>) -> Self {
        Self { name, tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Directory name derived from the playlist name: word characters,
    /// whitespace and dashes survive, spaces become underscores.
    /// Falls back to "Downloaded_Music" when there is no usable name.
    pub fn default_dir_name(&self) -> String {
        let cleaned = self
            .name
            .as_deref()
            .map(|name| {
                name.chars()
                    .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
                    .collect::<String>()
                    .trim()
                    .replace(' ', "_")
            })
            .unwrap_or_default();

        if cleaned.is_empty() {
            "Downloaded_Music".to_string()
        } else {
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processable_requires_title_and_artist() {
        assert!(TrackRequest::new(1, "Iskala", "Zemfira").is_processable());
        assert!(!TrackRequest::new(2, "", "Zemfira").is_processable());
        assert!(!TrackRequest::new(3, "Iskala", "   ").is_processable());
    }

    #[test]
    fn test_display_label() {
        let track = TrackRequest::with_album(1, "Iskala", "Zemfira", "Forgive Me My Love");
        assert_eq!(track.display_label(), "Zemfira - Iskala");
    }

    #[test]
    fn test_default_dir_name_strips_punctuation() {
        let playlist = Playlist::new(
            Some("Road Trip! (2024 edition)".to_string()),
            vec![],
        );
        assert_eq!(playlist.default_dir_name(), "Road_Trip_2024_edition");
    }

    #[test]
    fn test_default_dir_name_fallback() {
        let unnamed = Playlist::new(None, vec![]);
        assert_eq!(unnamed.default_dir_name(), "Downloaded_Music");

        let unusable = Playlist::new(Some("???".to_string()), vec![]);
        assert_eq!(unusable.default_dir_name(), "Downloaded_Music");
    }
}
