pub const MAX_SUGGESTIONS: usize = 6;
pub const MAX_SUGGESTION_CHARS: usize = 19;

/// Parses a comma-separated completion into at most six short lower-case suggestions.
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.split(',')
        .map(|suggestion| suggestion.trim().to_lowercase())
        .filter(|suggestion| {
            !suggestion.is_empty() && suggestion.chars().count() <= MAX_SUGGESTION_CHARS
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}
