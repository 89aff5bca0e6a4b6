//! Video link extraction from pasted text
//!
//! Users paste either a bare link or the "share" text produced by the
//! Bilibili apps, which wraps the link in a title and some emoji:
//!
//! ```
//! use bvdl::core::url_collector::extract_url;
//!
//! let url = extract_url("【标题】 https://b23.tv/AbC123 快来看");
//! assert_eq!(url.as_deref(), Some("https://b23.tv/AbC123"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Recognized link shapes, tried in order; the first match wins.
///
/// Character classes are ASCII-only so surrounding CJK text never sticks
/// to the extracted link.
static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // Full video page, optional www, optional trailing path/query
        r"https?://(?:www\.)?bilibili\.com/video/[A-Za-z0-9]+(?:[/?#][A-Za-z0-9_\-./?=&%#~+]*)?",
        // Mobile video page
        r"https?://m\.bilibili\.com/video/[A-Za-z0-9]+(?:[/?#][A-Za-z0-9_\-./?=&%#~+]*)?",
        // Short share link
        r"https?://(?:www\.)?b23\.tv/[A-Za-z0-9]+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("invalid URL pattern"))
    .collect()
});

/// Outcome of feeding one input line to the collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineVerdict {
    /// Blank line: stop collecting
    Finish,
    /// A link was found; holds the extracted substring
    Accept(String),
    /// No recognized link in the line
    Reject,
}

/// Find the first recognized link inside `text`.
///
/// A trailing full stop belongs to the sentence, not the link.
pub fn extract_url(text: &str) -> Option<String> {
    URL_PATTERNS
        .iter()
        .find_map(|pattern| pattern.find(text))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
}

/// Classify one line of user input
pub fn classify_line(line: &str) -> LineVerdict {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineVerdict::Finish;
    }

    match extract_url(trimmed) {
        Some(url) => LineVerdict::Accept(url),
        None => LineVerdict::Reject,
    }
}
