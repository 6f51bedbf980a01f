//! Text helpers for keyword matching against resumes and opportunities.

use crate::models::resume::Resume;

/// How many implicit keywords an opportunity's title/description contributes.
pub const OPPORTUNITY_KEYWORD_LIMIT: usize = 10;

/// Lower-cased JSON rendering of the whole resume document, keys included.
/// Keyword checks are plain substring searches over this string.
pub fn flatten_resume(resume: &Resume) -> String {
    serde_json::to_string(resume)
        .unwrap_or_default()
        .to_lowercase()
}

/// Case-insensitive substring match. `haystack` must already be lower-cased.
pub fn mentions(haystack: &str, keyword: &str) -> bool {
    haystack.contains(&keyword.to_lowercase())
}

/// Implicit keywords from an opportunity: words longer than three characters
/// from the lower-cased, punctuation-stripped title and description, unique,
/// in encounter order, capped at [`OPPORTUNITY_KEYWORD_LIMIT`].
///
/// No stopword filtering: "with" or "team" count like any other word.
pub fn opportunity_keywords(title: &str, description: &str) -> Vec<String> {
    let text = format!("{title} {description}").to_lowercase();
    let stripped: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for word in stripped.split_whitespace() {
        if keywords.len() == OPPORTUNITY_KEYWORD_LIMIT {
            break;
        }
        if word.chars().count() > 3 && !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}
