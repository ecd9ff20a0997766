// components/acquisition/src/filename.rs
//! Deterministic output naming: `"{NN}. {artist} - {title}.mp3"`, with the
//! whole base name held under a fixed character budget so directory
//! listings stay readable and no filesystem limit is ever hit.

/// Maximum length of the base filename (without extension).
pub const FILENAME_BUDGET: usize = 40;

/// Per-field cap applied before the combined budget kicks in.
const FIELD_CAP: usize = 100;

/// Characters consumed by the " - " separator.
const SEPARATOR_OVERHEAD: usize = 3;

pub const AUDIO_EXTENSION: &str = "mp3";

/// Normalize a raw metadata string into a filesystem-safe label of at most
/// `max_len` characters: bracketed segments go, illegal characters go,
/// whitespace collapses, and truncation never cuts a word in half.
pub fn clean_label(text: &str, max_len: usize) -> String {
    let text = strip_bracketed(text, '[', ']');
    let text = strip_bracketed(&text, '(', ')');
    // Tabs and newlines become plain spaces before sanitization eats them
    // as control characters; collapse again afterwards because removing an
    // illegal character can leave a double space behind.
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = sanitize_filename::sanitize(text);
    let mut text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.chars().count() > max_len {
        text = text.chars().take(max_len).collect::<String>().trim().to_string();
        // Drop the word the cut landed in.
        if let Some((head, _)) = text.rsplit_once(' ') {
            text = head.to_string();
        }
    }

    text.trim_end_matches([',', '-', '–', '—', ' ']).trim().to_string()
}

/// The output filename for a track. Fields are first cleaned with a
/// generous per-field cap; only if the combined base name exceeds the
/// budget is the remaining space split evenly between artist and title.
pub fn output_filename(index: u32, artist: &str, title: &str) -> String {
    let num = format!("{index:02}");
    let mut artist_label = clean_label(artist, FIELD_CAP);
    let mut title_label = clean_label(title, FIELD_CAP);
    let mut base = format!("{num}. {artist_label} - {title_label}");

    if base.chars().count() > FILENAME_BUDGET {
        let prefix_len = num.chars().count() + 2; // "NN. "
        let available = FILENAME_BUDGET.saturating_sub(prefix_len);
        let artist_max = (available / 2).saturating_sub(SEPARATOR_OVERHEAD);
        let title_max = available.saturating_sub(artist_max + SEPARATOR_OVERHEAD);

        artist_label = clean_label(artist, artist_max);
        title_label = clean_label(title, title_max);
        base = format!("{num}. {artist_label} - {title_label}");
    }

    format!("{base}.{AUDIO_EXTENSION}")
}

/// Remove `open...close` segments the way a non-greedy regex would: the
/// shortest closed pair is dropped, an opener without a closer is kept.
fn strip_bracketed(text: impl AsRef<str>, open: char, close: char) -> String {
    let text = text.as_ref();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    'outer: while let Some(c) = chars.next() {
        if c == open {
            let mut pending = String::new();
            pending.push(c);
            for inner in chars.by_ref() {
                pending.push(inner);
                if inner == close {
                    continue 'outer;
                }
            }
            out.push_str(&pending);
            break;
        }
        out.push(c);
    }

    out
}
