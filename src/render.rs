//! Bot reply rendering: media extraction, link sanitizing and typing delay.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup;
use crate::media::{self, MediaId};
use crate::payload::BotPayload;

/// Base delay before any reply appears
pub const BASE_DELAY_MS: u64 = 350;
/// Additional delay per word of reply text
pub const PER_WORD_DELAY_MS: u64 = 90;
/// Upper bound for the typing delay
pub const MAX_DELAY_MS: u64 = 2200;
/// Delay used when there is no text at all
pub const EMPTY_DELAY_MS: u64 = 500;

/// Pre-rendered anchors pointing at a track, or labelled "Listen on Spotify".
/// A leading note marker belongs to the anchor and goes with it.
static TRACK_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)(?:🎵\s*)?<a\b[^>]*open\.spotify\.com/(?:embed/)?track/[^>]*>.*?</a\s*>|(?:🎵\s*)?<a\b[^>]*>\s*(?:<[^>]*>\s*)*Listen on Spotify\s*(?:<[^>]*>\s*)*</a\s*>",
    )
    .expect("track anchor regex pattern is valid")
});

static RAW_TRACK_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"https?://open\.spotify\.com/(?:embed/)?track/[^\s<>"']*"#)
        .expect("raw track URL regex pattern is valid")
});

/// A reply ready to be shown after its typing delay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReply {
    /// Reply text with track links removed (markup otherwise preserved)
    pub text: String,
    /// Track to show as an embedded player
    pub media: Option<MediaId>,
    /// How long the typing indicator runs before the reply appears
    pub delay: Duration,
}

/// Render a bot payload into display text, optional media and typing delay.
///
/// Malformed media references never fail the render; the reply simply
/// has no embedded player.
pub fn render(payload: &BotPayload) -> RenderedReply {
    let media = match payload {
        BotPayload::PlainText(text) => media::extract_from_text(text),
        BotPayload::Structured { media_ref, .. } => {
            media_ref.as_deref().and_then(MediaId::parse)
        }
    };

    let text = sanitize(payload.text());
    let delay = typing_delay(&text);

    tracing::debug!(
        media = media.as_ref().map(MediaId::as_str),
        delay_ms = delay.as_millis() as u64,
        "rendered bot reply"
    );

    RenderedReply { text, media, delay }
}

/// Remove track anchors and raw track URLs from reply text.
///
/// Idempotent: sanitizing already clean text returns it unchanged.
pub fn sanitize(text: &str) -> String {
    // Dropping a URL can expose an anchor that only matches afterwards,
    // so strip until nothing changes. Every pass only removes text.
    let mut current = text.to_string();
    loop {
        let next = strip_track_links(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_track_links(text: &str) -> String {
    let without_anchors = TRACK_ANCHOR_RE.replace_all(text, "");
    RAW_TRACK_URL_RE
        .replace_all(&without_anchors, "")
        .into_owned()
}

/// Number of whitespace-separated words once markup tags are removed
pub fn word_count(text: &str) -> usize {
    markup::strip_tags(text).split_whitespace().count()
}

/// Typing delay for a reply: `min(2200, words * 90 + 350)` ms, or 500 ms
/// when there is no text.
pub fn typing_delay(text: &str) -> Duration {
    if text.is_empty() {
        return Duration::from_millis(EMPTY_DELAY_MS);
    }
    let words = word_count(text) as u64;
    let millis = words
        .saturating_mul(PER_WORD_DELAY_MS)
        .saturating_add(BASE_DELAY_MS)
        .min(MAX_DELAY_MS);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "4uLU6hMCjMI75M1A2tKUQC";

    #[test]
    fn test_plain_text_with_raw_url() {
        let payload =
            BotPayload::from("Check this https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC out");
        let reply = render(&payload);
        assert_eq!(reply.text, "Check this  out");
        assert_eq!(reply.media.unwrap().as_str(), ID);
        assert_eq!(reply.delay, Duration::from_millis(3 * 90 + 350));
    }

    #[test]
    fn test_structured_with_placeholder_link() {
        let payload = BotPayload::Structured {
            text: "Hi!".into(),
            media_ref: Some("https://open.spotify.com/track/none".into()),
        };
        let reply = render(&payload);
        assert_eq!(reply.text, "Hi!");
        assert!(reply.media.is_none());
        assert_eq!(reply.delay, Duration::from_millis(440));
    }

    #[test]
    fn test_structured_with_valid_link() {
        let payload = BotPayload::Structured {
            text: format!(
                "Try <b>Blinding Lights</b> 🎵 <a href=\"https://open.spotify.com/track/{}\" target=\"_blank\">Listen on Spotify</a>",
                ID
            ),
            media_ref: Some(format!("https://open.spotify.com/track/{}", ID)),
        };
        let reply = render(&payload);
        assert_eq!(reply.text, "Try <b>Blinding Lights</b> ");
        assert_eq!(reply.media.unwrap().as_str(), ID);
    }

    #[test]
    fn test_listen_anchor_without_track_href_is_removed() {
        let text = "Enjoy <a href=\"#\">Listen on Spotify</a>!";
        assert_eq!(sanitize(text), "Enjoy !");
    }

    #[test]
    fn test_short_listen_anchor_is_removed() {
        let text = format!(
            "Fallback <a href=\"https://open.spotify.com/track/{}\" target=\"_blank\">Listen</a>",
            ID
        );
        assert_eq!(sanitize(&text), "Fallback ");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "Check this https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC out".to_string(),
            format!(
                "a <a href='https://open.spotify.com/track/{}'>Listen on Spotify</a> b https://open.spotify.com/track/x",
                ID
            ),
            "nothing to strip".to_string(),
            format!(
                "Enjoy <a href=\"#\">Listen on Spotify https://open.spotify.com/track/{}</a>!",
                ID
            ),
            "Enjoy <a href=\"#\"><b>Listen on Spotify</b></a>!".to_string(),
        ];
        for input in inputs {
            let once = sanitize(&input);
            assert_eq!(sanitize(&once), once);
            assert!(!once.contains("open.spotify.com/track/"));
            assert!(!once.contains("Listen on Spotify"));
        }
    }

    #[test]
    fn test_url_inside_listen_anchor_is_removed_in_one_call() {
        let text = format!(
            "Enjoy <a href=\"#\">Listen on Spotify https://open.spotify.com/track/{}</a>!",
            ID
        );
        assert_eq!(sanitize(&text), "Enjoy !");
        assert_eq!(
            sanitize("Enjoy <a href=\"#\"><b>Listen on Spotify</b></a>!"),
            "Enjoy !"
        );
    }

    #[test]
    fn test_typing_delay_formula() {
        assert_eq!(typing_delay(""), Duration::from_millis(500));
        assert_eq!(typing_delay("   "), Duration::from_millis(350));
        assert_eq!(typing_delay("<br>"), Duration::from_millis(350));
        assert_eq!(typing_delay("one"), Duration::from_millis(440));
        assert_eq!(typing_delay("one two three"), Duration::from_millis(620));
        // 21 words: 21 * 90 + 350 = 2240, capped
        let long = vec!["word"; 21].join(" ");
        assert_eq!(typing_delay(&long), Duration::from_millis(2200));
        // 20 words: 20 * 90 + 350 = 2150, under the cap
        let under = vec!["word"; 20].join(" ");
        assert_eq!(typing_delay(&under), Duration::from_millis(2150));
    }

    #[test]
    fn test_word_count_ignores_tags() {
        assert_eq!(word_count("<span style='color:green'>Hello there</span>"), 2);
        assert_eq!(word_count("a<br>b"), 1);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_empty_payload() {
        let reply = render(&BotPayload::Structured {
            text: String::new(),
            media_ref: None,
        });
        assert_eq!(reply.text, "");
        assert_eq!(reply.delay, Duration::from_millis(500));
    }

    #[test]
    fn test_link_only_payload_has_empty_text() {
        let reply = render(&BotPayload::from(format!(
            "https://open.spotify.com/track/{}",
            ID
        )));
        assert_eq!(reply.text, "");
        assert_eq!(reply.delay, Duration::from_millis(500));
        assert!(reply.media.is_some());
    }
}
