// components/media_downloader/src/types.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Required dependency not found: {0}")]
    ToolNotFound(&'static str),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to hand to the download tool: either a specific resource picked by
/// the candidate matcher, or a generic "first search result" fallback used
/// when no candidate satisfied the constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    Url(String),
    Search(String),
}

impl DownloadTarget {
    /// The positional argument yt-dlp expects for this target.
    pub fn as_tool_arg(&self) -> String {
        match self {
            DownloadTarget::Url(url) => url.clone(),
            DownloadTarget::Search(query) => format!("ytsearch1:{query}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_arg_rendering() {
        let url = DownloadTarget::Url("https://example.com/watch?v=abc".to_string());
        assert_eq!(url.as_tool_arg(), "https://example.com/watch?v=abc");

        let search = DownloadTarget::Search("Zemfira Iskala".to_string());
        assert_eq!(search.as_tool_arg(), "ytsearch1:Zemfira Iskala");
    }
}
