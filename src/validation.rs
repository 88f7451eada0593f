//! Input validation for outgoing chat messages

/// Longest message accepted from the input box, in characters
pub const MAX_MESSAGE_CHARS: usize = 1000;

/// Validates a chat message before it is sent.
/// Leading and trailing whitespace does not count.
pub fn validate_message(msg: &str) -> Result<(), String> {
    let msg = msg.trim();
    if msg.is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    if msg.chars().count() > MAX_MESSAGE_CHARS {
        return Err(format!(
            "Message too long (max {} characters)",
            MAX_MESSAGE_CHARS
        ));
    }

    Ok(())
}

/// Sanitizes a message by trimming it and removing control characters
/// other than newlines and tabs
pub fn sanitize_message(msg: &str) -> String {
    msg.trim()
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message() {
        assert!(validate_message("Hello, world!").is_ok());
        assert!(validate_message("  jazz  ").is_ok());
        assert!(validate_message("Test message with 日本語").is_ok());

        assert!(validate_message("").is_err());
        assert!(validate_message("   \t\n").is_err());
        assert!(validate_message(&"x".repeat(MAX_MESSAGE_CHARS + 1)).is_err());
        assert!(validate_message(&"é".repeat(MAX_MESSAGE_CHARS)).is_ok());
    }

    #[test]
    fn test_sanitize_message() {
        assert_eq!(sanitize_message("  Hello, world!  "), "Hello, world!");
        assert_eq!(sanitize_message("a\0b\x07c"), "abc");
        assert_eq!(sanitize_message("line1\nline2"), "line1\nline2");
    }
}
