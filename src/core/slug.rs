// src/core/slug.rs
//
// Player display name → URL path segment.

/// "Alex O'Brien Jr." → "alex-obrien-jr"
///
/// Lowercase, periods and apostrophes dropped, whitespace runs joined by a
/// single hyphen. Empty in, empty out.
pub fn slugify(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '.' | '\'' | '\u{2019}'))
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Candidate player URLs: bare slug first, then each suffix variant.
pub fn url_variants(base: &str, slug: &str, suffixes: &[&str]) -> Vec<String> {
    suffixes.iter().map(|sfx| join!(base, slug, sfx)).collect()
}
