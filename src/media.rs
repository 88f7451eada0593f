//! Embeddable track references.
//!
//! The backend links tracks as `https://open.spotify.com/track/<id>` where
//! `<id>` is a 22 character alphanumeric identifier. Anything else (wrong
//! length, placeholders such as `none`) is treated as "no media".

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of a public track link
pub const TRACK_URL_PREFIX: &str = "https://open.spotify.com/track/";
/// Prefix of the embeddable player for a track
pub const EMBED_URL_PREFIX: &str = "https://open.spotify.com/embed/track/";
/// Length of a valid track identifier
pub const TRACK_ID_LEN: usize = 22;

/// Values the backend uses when it has no link to offer
const PLACEHOLDERS: &[&str] = &["none", "null", "n/a", "undefined"];

static TRACK_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://open\.spotify\.com/(?:embed/)?track/([A-Za-z0-9]*)")
        .expect("track URL regex pattern is valid")
});

/// A validated track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaId(String);

impl MediaId {
    /// Parse a media reference that is either a track URL or a bare id.
    ///
    /// Returns `None` for empty input, placeholders and identifiers that do
    /// not have exactly [`TRACK_ID_LEN`] alphanumeric characters.
    pub fn parse(candidate: &str) -> Option<Self> {
        let candidate = candidate.trim();
        if is_placeholder(candidate) {
            return None;
        }

        let id = if candidate.contains("://") {
            TRACK_URL_RE
                .captures(candidate)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())?
        } else {
            candidate
        };

        Self::from_id(id)
    }

    fn from_id(id: &str) -> Option<Self> {
        if is_placeholder(id) {
            return None;
        }
        if id.len() == TRACK_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(Self(id.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL of the embeddable player for this track
    pub fn embed_url(&self) -> String {
        format!("{}{}", EMBED_URL_PREFIX, self.0)
    }

    /// Public link to the track
    pub fn track_url(&self) -> String {
        format!("{}{}", TRACK_URL_PREFIX, self.0)
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Find the first valid track link embedded in free text.
pub fn extract_from_text(text: &str) -> Option<MediaId> {
    TRACK_URL_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| MediaId::from_id(m.as_str()))
}

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || PLACEHOLDERS.iter().any(|p| value.eq_ignore_ascii_case(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "4uLU6hMCjMI75M1A2tKUQC";

    #[test]
    fn test_parse_bare_id_and_url() {
        assert_eq!(MediaId::parse(ID).unwrap().as_str(), ID);
        let url = format!("{}{}", TRACK_URL_PREFIX, ID);
        assert_eq!(MediaId::parse(&url).unwrap().as_str(), ID);
        let with_query = format!("{}{}?si=abc123", TRACK_URL_PREFIX, ID);
        assert_eq!(MediaId::parse(&with_query).unwrap().as_str(), ID);
    }

    #[test]
    fn test_parse_rejects_placeholders_and_bad_lengths() {
        assert!(MediaId::parse("").is_none());
        assert!(MediaId::parse("   ").is_none());
        assert!(MediaId::parse("none").is_none());
        assert!(MediaId::parse("N/A").is_none());
        assert!(MediaId::parse("https://open.spotify.com/track/none").is_none());
        assert!(MediaId::parse("4uLU6hMCjMI75M1A2tKUQ").is_none()); // 21 chars
        assert!(MediaId::parse("4uLU6hMCjMI75M1A2tKUQCx").is_none()); // 23 chars
        assert!(MediaId::parse("4uLU6hMCjMI75M1A2tKU-C").is_none());
        assert!(MediaId::parse("https://example.com/track/4uLU6hMCjMI75M1A2tKUQC").is_none());
    }

    #[test]
    fn test_extract_from_text() {
        let text = format!("Check this {}{} out", TRACK_URL_PREFIX, ID);
        assert_eq!(extract_from_text(&text).unwrap().as_str(), ID);
        assert!(extract_from_text("no links here").is_none());
        assert!(extract_from_text("https://open.spotify.com/track/short").is_none());
    }

    #[test]
    fn test_extract_skips_invalid_first_link() {
        let text = format!(
            "{}none and then {}{}",
            TRACK_URL_PREFIX, TRACK_URL_PREFIX, ID
        );
        assert_eq!(extract_from_text(&text).unwrap().as_str(), ID);
    }

    #[test]
    fn test_urls() {
        let id = MediaId::parse(ID).unwrap();
        assert_eq!(
            id.embed_url(),
            "https://open.spotify.com/embed/track/4uLU6hMCjMI75M1A2tKUQC"
        );
        assert_eq!(
            id.track_url(),
            "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"
        );
    }
}
