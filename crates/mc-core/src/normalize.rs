//! Answer normalization.
//!
//! Typed answers and accepted answers both go through [`normalize`] before
//! they are compared. Applying it to only one side produces false negatives,
//! so every comparison in the workspace calls it on both.

/// Punctuation dropped from the end of an answer ("Kind of." == "kind of").
const TRAILING_PUNCTUATION: [char; 3] = ['.', '!', '?'];

/// Normalize a free-text answer for comparison.
///
/// Folds typographic quotes to straight quotes and the ellipsis character to
/// three dots, lower-cases, collapses runs of whitespace to a single space,
/// trims, and strips trailing sentence punctuation.
pub fn normalize(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '`' => folded.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => folded.push('"'),
            '\u{2026}' => folded.push_str("..."),
            other => folded.push(other),
        }
    }

    let collapsed = folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed
        .trim_end_matches(|c: char| TRAILING_PUNCTUATION.contains(&c) || c.is_whitespace())
        .to_string()
}

/// Join tokens with single spaces, the way built sentences are compared.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether two answers are equal after normalizing both.
pub fn answers_match(given: &str, expected: &str) -> bool {
    normalize(given) == normalize(expected)
}
