//! Fragment combinators shared by the PDF and DOCX extractors.
//!
//! Each scanning pass yields candidate fragments; these helpers turn the
//! combined candidates into a single readable string.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,;:!?)\]])").unwrap());

/// Fragments this short (in chars) are dropped as noise.
const MIN_FRAGMENT_CHARS: usize = 3;

/// Order-preserving exact dedup. The first occurrence wins.
pub fn dedup_fragments<I>(fragments: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    fragments
        .into_iter()
        .filter(|f| seen.insert(f.clone()))
        .collect()
}

/// Replaces control characters and U+FFFD with spaces, then trims.
pub fn strip_control(fragment: &str) -> String {
    fragment
        .chars()
        .map(|c| {
            if c.is_control() || c == char::REPLACEMENT_CHARACTER {
                ' '
            } else {
                c
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// Joins fragments with single spaces and collapses whitespace.
pub fn join_fragments(fragments: &[String]) -> String {
    collapse_whitespace(&fragments.join(" "))
}

/// Full clean-up used for PDF output: strip control chars, drop fragments of
/// two chars or fewer, dedup, join, collapse, and pull punctuation back onto
/// the preceding word.
pub fn clean_and_join<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let cleaned = fragments
        .into_iter()
        .map(|f| strip_control(&f))
        .filter(|f| f.chars().count() >= MIN_FRAGMENT_CHARS);

    let joined = join_fragments(&dedup_fragments(cleaned));
    SPACE_BEFORE_PUNCT.replace_all(&joined, "$1").into_owned()
}
