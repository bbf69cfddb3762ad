//! Truncation helpers for Discord message limits
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Initial creation for list embeds

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord embed field value limit
pub const FIELD_LIMIT: usize = 1024;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// Truncate text to `max`, adding ellipsis if needed (UTF-8 safe).
fn truncate_at(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    // Find a safe UTF-8 boundary with room for "..."
    let mut end = max - 3;
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit an embed description.
pub fn truncate_for_embed(text: &str) -> String {
    truncate_at(text, EMBED_LIMIT)
}

/// Truncate text to fit an embed field value.
pub fn truncate_for_field(text: &str) -> String {
    truncate_at(text, FIELD_LIMIT)
}

/// Truncate text to fit plain message content.
pub fn truncate_for_message(text: &str) -> String {
    truncate_at(text, MESSAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate_for_embed("hello"), "hello");
        assert_eq!(truncate_for_field("hello"), "hello");
        assert_eq!(truncate_for_message("hello"), "hello");
    }

    #[test]
    fn test_exactly_at_limit() {
        let text = "a".repeat(FIELD_LIMIT);
        assert_eq!(truncate_for_field(&text), text);
    }

    #[test]
    fn test_truncates_long_text() {
        let text = "a".repeat(FIELD_LIMIT + 100);
        let result = truncate_for_field(&text);
        assert_eq!(result.len(), FIELD_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_embed_limit() {
        let text = "b".repeat(5000);
        let result = truncate_for_embed(&text);
        assert!(result.len() <= EMBED_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_utf8_safety() {
        // Multi-byte characters near the cut point must not panic
        let text = "世".repeat(MESSAGE_LIMIT);
        let result = truncate_for_message(&text);
        assert!(result.len() <= MESSAGE_LIMIT);
        assert!(result.ends_with("..."));
    }
}
