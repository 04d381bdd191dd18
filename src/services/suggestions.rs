//! Autocomplete suggestions for the search box.

/// Canned queries offered while typing.
pub const SUGGESTED_QUERIES: &[&str] = &[
    "nature photography",
    "technology trends",
    "architectural design",
    "food styling",
    "travel destinations",
    "animal portraits",
];

/// Inputs this short get no suggestions.
pub const MIN_INPUT_CHARS: usize = 3;

/// Returns the canned queries containing `input` as typed, ignoring case.
pub fn suggest_queries(input: &str) -> Vec<&'static str> {
    if input.chars().count() < MIN_INPUT_CHARS {
        return Vec::new();
    }

    let input = input.to_lowercase();

    SUGGESTED_QUERIES
        .iter()
        .copied()
        .filter(|suggestion| suggestion.contains(&input))
        .collect()
}
