const MARKERS: [&str; 2] = ["spell ", "spelling "];

const FILLERS: [&str; 19] = [
    "a", "the", "an", "i", "um", "uh", "and", "or", "so", "like", "it", "is", "was", "to", "do",
    "how", "what", "can", "you",
];

/// Picks the word to spell out of a spoken request such as
/// "how do you spell elephant". Upper-cased; `None` if nothing usable.
pub fn extract_word(transcript: &str) -> Option<String> {
    let lower = transcript.to_lowercase();

    for marker in MARKERS {
        if let Some(at) = lower.find(marker) {
            let rest = lower[at + marker.len()..].trim();
            let word = rest
                .split_whitespace()
                .next()
                .map_or("", |word| word.trim_matches(|c: char| c.is_ascii_punctuation()));
            if word.chars().count() >= 2 {
                return Some(word.to_uppercase());
            }
        }
    }

    lower
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|word| word.chars().count() >= 2 && !FILLERS.contains(word))
        .last()
        .map(str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_after_marker() {
        assert_eq!(extract_word("How do you spell cat please").as_deref(), Some("CAT"));
        assert_eq!(extract_word("spelling dog").as_deref(), Some("DOG"));
    }

    #[test]
    fn test_marker_word_drops_punctuation() {
        assert_eq!(extract_word("spell cat.").as_deref(), Some("CAT"));
        assert_eq!(extract_word("Can you spell \"dog\"?").as_deref(), Some("DOG"));
        // too short once trimmed, so the fallback picks the last real word
        assert_eq!(extract_word("spell x! rainbow").as_deref(), Some("RAINBOW"));
    }

    #[test]
    fn test_falls_back_to_last_real_word() {
        assert_eq!(extract_word("um, elephant?").as_deref(), Some("ELEPHANT"));
        // a one-letter word after the marker is not enough
        assert_eq!(extract_word("spell a frog").as_deref(), Some("FROG"));
    }

    #[test]
    fn test_nothing_usable() {
        assert_eq!(extract_word(""), None);
        assert_eq!(extract_word("um uh the"), None);
    }
}
