//! Flattening of the backend's light HTML into plain chat text.
//!
//! Replies arrive with `<span style=...>`, `<br>` and a row of
//! `<button onclick="window.handleBotReply('...')">` elements. The native
//! UI has no HTML renderer, so line breaks are kept, buttons become
//! [`QuickReply`] actions and every other tag is dropped.

use once_cell::sync::Lazy;
use regex::Regex;

static BUTTON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<button\b[^>]*handleBotReply\(\s*['"]([^'"]*)['"]\s*\)[^>]*>(.*?)</button>"#)
        .expect("button regex pattern is valid")
});

static BR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("br regex pattern is valid"));

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex pattern is valid"));

/// A reply suggested by the backend, rendered as a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReply {
    /// Text shown on the button
    pub label: String,
    /// Text sent to `/command` when the button is pressed
    pub command: String,
}

/// Result of flattening a markup reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedMarkup {
    pub text: String,
    pub quick_replies: Vec<QuickReply>,
}

/// Remove every markup tag, leaving the text content untouched.
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Convert reply markup into display text plus quick-reply buttons.
pub fn flatten(markup: &str) -> FlattenedMarkup {
    let quick_replies = BUTTON_RE
        .captures_iter(markup)
        .filter_map(|caps| {
            let command = caps.get(1)?.as_str().trim().to_string();
            let label = decode_entities(strip_tags(caps.get(2)?.as_str()).trim());
            if command.is_empty() {
                return None;
            }
            let label = if label.is_empty() { command.clone() } else { label };
            Some(QuickReply { label, command })
        })
        .collect();

    let without_buttons = BUTTON_RE.replace_all(markup, "");
    let with_breaks = BR_RE.replace_all(&without_buttons, "\n");
    let plain = decode_entities(&strip_tags(&with_breaks));

    FlattenedMarkup {
        text: tidy_lines(&plain),
        quick_replies,
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Trim each line and collapse runs of blank lines into one.
fn tidy_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_blank = true;
    for line in text.lines().map(str::trim) {
        let blank = line.is_empty();
        if blank && previous_blank {
            continue;
        }
        lines.push(line);
        previous_blank = blank;
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
