//! Splitting long notification bodies into Bot API sized messages.

/// Longest text `sendMessage` accepts, in UTF-16 code units.
pub const MAX_MESSAGE_CHARS: usize = 4096;

const BLOCK_SEPARATOR: &str = "\n\n";

/// Splits `text` into messages of at most `limit` UTF-16 code units.
///
/// Length is measured the way the Bot API measures it, so an emoji outside
/// the Basic Multilingual Plane costs two units. Splits only between
/// blank-line separated blocks, packing as many whole blocks into each
/// message as fit. A block that is longer than `limit` on its own is cut
/// short and ends with `…`. Empty input yields no messages.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.is_empty() || limit == 0 {
        return Vec::new();
    }
    if utf16_len(text) <= limit {
        return vec![text.to_owned()];
    }

    let separator_len = utf16_len(BLOCK_SEPARATOR);
    let mut messages = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for block in text.split(BLOCK_SEPARATOR) {
        let block = truncate(block, limit);
        let block_len = utf16_len(&block);

        if current_len > 0 && current_len + separator_len + block_len > limit {
            messages.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push_str(BLOCK_SEPARATOR);
            current_len += separator_len;
        }
        current.push_str(&block);
        current_len += block_len;
    }

    if current_len > 0 {
        messages.push(current);
    }
    messages
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

fn truncate(block: &str, limit: usize) -> String {
    if utf16_len(block) <= limit {
        return block.to_owned();
    }
    // Room for the trailing ellipsis, which is one unit.
    let budget = limit.saturating_sub(1);
    let mut cut = String::new();
    let mut used = 0usize;
    for ch in block.chars() {
        if used + ch.len_utf16() > budget {
            break;
        }
        used += ch.len_utf16();
        cut.push(ch);
    }
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_message() {
        assert_eq!(split_message("hello", 10), vec!["hello".to_string()]);
    }

    #[test]
    fn empty_text_is_no_messages() {
        assert!(split_message("", 10).is_empty());
    }

    #[test]
    fn splits_on_block_boundaries() {
        let text = "aaaa\n\nbbbb\n\ncccc";
        assert_eq!(
            split_message(text, 10),
            vec!["aaaa\n\nbbbb".to_string(), "cccc".to_string()]
        );
    }

    #[test]
    fn every_message_fits_the_limit() {
        let blocks: Vec<String> = (0..300)
            .map(|i| format!("💰 Zmiana ceny: Product {i}\n129.99 zł → 99.99 zł\nhttps://www2.hm.com/p/{i}"))
            .collect();
        let text = blocks.join("\n\n");

        let messages = split_message(&text, MAX_MESSAGE_CHARS);

        assert!(messages.len() > 1);
        assert!(messages.iter().all(|m| utf16_len(m) <= MAX_MESSAGE_CHARS));
        assert_eq!(messages.join("\n\n"), text, "no block may be lost or reordered");
    }

    #[test]
    fn oversized_block_is_truncated() {
        let text = format!("{}\n\nshort", "x".repeat(20));
        let messages = split_message(&text, 10);
        assert_eq!(messages, vec![format!("{}…", "x".repeat(9)), "short".to_string()]);
    }

    #[test]
    fn astral_emoji_count_as_two_units() {
        // Each block is 5 chars but 6 UTF-16 units.
        let text = "🆕 abc\n\n🆕 def";
        assert_eq!(utf16_len("🆕 abc"), 6);
        assert_eq!(
            split_message(text, 13),
            vec!["🆕 abc".to_string(), "🆕 def".to_string()]
        );
        assert_eq!(split_message(text, 14), vec![text.to_string()]);
    }

    #[test]
    fn emoji_heavy_body_stays_under_the_unit_limit() {
        let blocks: Vec<String> = (0..200)
            .map(|i| format!("🆕 Nowy produkt: {}\nhttps://www2.hm.com/p/{i}", "y".repeat(60)))
            .collect();
        let text = blocks.join("\n\n");

        let messages = split_message(&text, MAX_MESSAGE_CHARS);

        assert!(messages.len() > 1);
        for message in &messages {
            assert!(utf16_len(message) <= MAX_MESSAGE_CHARS, "{}", utf16_len(message));
        }
    }

    #[test]
    fn truncation_does_not_split_a_surrogate_pair() {
        let messages = split_message("🔥🔥🔥", 4);
        assert_eq!(messages, vec!["🔥…".to_string()]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "ąęółź\n\nżźćń";
        // 11 characters but 20+ bytes.
        assert_eq!(split_message(text, 11), vec![text.to_string()]);
    }
}
