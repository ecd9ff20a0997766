// components/playlist_csv/src/lib.rs
//! Reads and writes the playlist manifest: an optional `# Playlist: <name>`
//! header line followed by CSV records. Column names are matched against
//! aliases so manifests produced by the original Spotify exporter (Russian
//! headers) load the same as ones written by this crate.

use std::path::Path;

use thiserror::Error;
use track_primitives::{Playlist, TrackRequest};

const PLAYLIST_HEADER_PREFIX: &str = "# Playlist:";

const TITLE_ALIASES: &[&str] = &["title", "песня"];
const ARTIST_ALIASES: &[&str] = &["artist", "артист"];
const ALBUM_ALIASES: &[&str] = &["album", "альбом"];

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Parse(#[from] csv::Error),

    #[error("Malformed manifest: {0}")]
    Malformed(String),

    #[error("Manifest contains no usable tracks")]
    Empty,
}

/// Produces the ordered track list from a playlist identifier. The
/// browser-driven Spotify scraper is one implementation of this that lives
/// outside this workspace; [`CsvLister`] reads its exported manifest.
pub trait PlaylistLister {
    fn list(&self, source: &str) -> Result<Playlist, ListingError>;
}

pub struct CsvLister;

impl PlaylistLister for CsvLister {
    fn list(&self, source: &str) -> Result<Playlist, ListingError> {
        read_manifest(Path::new(source))
    }
}

pub fn read_manifest(path: &Path) -> Result<Playlist, ListingError> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest(&content)
}

pub fn parse_manifest(content: &str) -> Result<Playlist, ListingError> {
    let (name, body) = split_playlist_header(content);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers()?.clone();
    let title_col = find_column(&headers, TITLE_ALIASES)
        .ok_or_else(|| ListingError::Malformed("no title column".to_string()))?;
    let artist_col = find_column(&headers, ARTIST_ALIASES)
        .ok_or_else(|| ListingError::Malformed("no artist column".to_string()))?;
    let album_col = find_column(&headers, ALBUM_ALIASES);

    // Indices are reassigned sequentially in file order; whatever sequence
    // numbers the manifest carries are ignored.
    let mut tracks = Vec::new();
    for record in reader.records() {
        let record = record?;
        let title = record.get(title_col).unwrap_or("").trim();
        let artist = record.get(artist_col).unwrap_or("").trim();
        if title.is_empty() || artist.is_empty() {
            continue;
        }

        let album = album_col
            .and_then(|col| record.get(col))
            .map(str::trim)
            .filter(|album| !album.is_empty())
            .map(String::from);

        tracks.push(TrackRequest {
            index: tracks.len() as u32 + 1,
            title: title.to_string(),
            artist: artist.to_string(),
            album,
        });
    }

    if tracks.is_empty() {
        return Err(ListingError::Empty);
    }

    Ok(Playlist::new(name, tracks))
}

pub fn write_manifest(path: &Path, playlist: &Playlist) -> Result<(), ListingError> {
    let mut out = String::new();
    if let Some(name) = &playlist.name {
        out.push_str(PLAYLIST_HEADER_PREFIX);
        out.push(' ');
        out.push_str(name);
        out.push('\n');
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["#", "Title", "Artist", "Album"])?;
    for track in &playlist.tracks {
        let index = track.index.to_string();
        writer.write_record([
            index.as_str(),
            track.title.as_str(),
            track.artist.as_str(),
            track.album.as_deref().unwrap_or(""),
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| ListingError::Malformed(e.to_string()))?;
    out.push_str(&String::from_utf8_lossy(&data));

    std::fs::write(path, out)?;
    Ok(())
}

fn split_playlist_header(content: &str) -> (Option<String>, &str) {
    let first_line = content.lines().next().unwrap_or("");
    match first_line.trim().strip_prefix(PLAYLIST_HEADER_PREFIX) {
        Some(name) => {
            let body = content
                .split_once('\n')
                .map(|(_, rest)| rest)
                .unwrap_or("");
            let name = name.trim();
            let name = (!name.is_empty()).then(|| name.to_string());
            (name, body)
        }
        None => (None, content),
    }
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim().to_lowercase();
        aliases.contains(&header.as_str())
    })
}
