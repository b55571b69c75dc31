//! Formatting helpers for AI responses in Discord.

/// Discord's per-message character limit.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Splits text into chunks of at most `limit` characters.
///
/// Counts `char`s rather than bytes so multi-byte text is never cut mid-character.
pub fn split_for_discord(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return vec![text.to_string()];
    }
    text.chars()
        .collect::<Vec<char>>()
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_for_discord("hello", 2000), vec!["hello".to_string()]);
    }

    #[test]
    fn long_text_is_split_on_char_boundaries() {
        let text = "é".repeat(4500);
        let chunks = split_for_discord(&text, DISCORD_MESSAGE_LIMIT);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 2000);
        assert_eq!(chunks[2].chars().count(), 500);
        assert_eq!(chunks.concat(), text);
    }
}
