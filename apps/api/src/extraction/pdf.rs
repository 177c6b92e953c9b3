//! PDF Text Extractor — three redundant heuristic scans over the decoded bytes.
//!
//! 1. Text-block scan: literal strings shown with `Tj` / `TJ` inside `BT … ET`.
//! 2. Stream scan: readable parenthesized strings inside `stream … endstream`.
//! 3. Keyword scan: any parenthesized string mentioning a resume keyword.
//!
//! Passes are independent and may overlap; duplicates are removed afterwards.
//! Compressed (FlateDecode) content streams yield nothing here, the
//! orchestrator's quality gate handles that case.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::extraction::decode::decode_lossy;
use crate::extraction::fragments::clean_and_join;

static TEXT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\bBT\b(.*?)\bET\b").unwrap());

/// Body of a literal string: plain chars, escapes, and one level of balanced
/// unescaped parentheses.
const LITERAL_BODY: &str = r"(?:[^()\\]|\\.|\((?:[^()\\]|\\.)*\))*";

static SHOW_STRING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?s)\(({LITERAL_BODY})\)\s*Tj")).unwrap());
static SHOW_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[((?:[^\[\]\\]|\\.)*)\]\s*TJ").unwrap());
static LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?s)\(({LITERAL_BODY})\)")).unwrap());

static STREAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\bstream\b(.*?)\bendstream\b").unwrap());
static SAFE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r##"\(([A-Za-z0-9 .,;:!?@&%+'"#/\-]+)\)"##).unwrap());
static TWO_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]{2,}").unwrap());

/// Resume vocabulary used by the keyword-anchored pass.
pub const RESUME_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "work",
    "job",
    "project",
    "summary",
    "objective",
    "email",
    "phone",
    "address",
    "university",
    "college",
    "degree",
    "bachelor",
    "master",
    "engineer",
    "developer",
    "manager",
    "analyst",
    "intern",
    "certification",
];

static KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i)(?:{})", RESUME_KEYWORDS.join("|"))).unwrap()
});

/// Best-effort plain text from a buffer declared as PDF. Never fails; returns
/// an empty string when no pass finds anything.
pub fn extract_pdf_text(bytes: &[u8]) -> String {
    let content = decode_lossy(bytes);

    let blocks = scan_text_blocks(&content);
    let streams = scan_streams(&content);
    let keywords = scan_keywords(&content);

    debug!(
        text_block = blocks.len(),
        stream = streams.len(),
        keyword = keywords.len(),
        "pdf scan fragment counts"
    );

    clean_and_join(blocks.into_iter().chain(streams).chain(keywords))
}

/// Pass 1: strings drawn by `Tj` and `TJ` inside text objects.
pub(crate) fn scan_text_blocks(content: &str) -> Vec<String> {
    let mut fragments = Vec::new();

    for block in TEXT_BLOCK.captures_iter(content) {
        let body = &block[1];

        for shown in SHOW_STRING.captures_iter(body) {
            fragments.push(unescape_pdf_string(&shown[1]));
        }

        // Array form mixes strings and kerning numbers; keep only the strings.
        for array in SHOW_ARRAY.captures_iter(body) {
            let joined: String = LITERAL
                .captures_iter(&array[1])
                .map(|lit| unescape_pdf_string(&lit[1]))
                .collect();
            if !joined.is_empty() {
                fragments.push(joined);
            }
        }
    }

    fragments
}

/// Pass 2: readable parenthesized strings inside content streams.
pub(crate) fn scan_streams(content: &str) -> Vec<String> {
    STREAM
        .captures_iter(content)
        .flat_map(|stream| {
            SAFE_LITERAL
                .captures_iter(&stream[1])
                .map(|lit| lit[1].to_string())
                .filter(|text| TWO_LETTERS.is_match(text))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Pass 3: any parenthesized string containing a resume keyword.
pub(crate) fn scan_keywords(content: &str) -> Vec<String> {
    LITERAL
        .captures_iter(content)
        .map(|lit| lit[1].to_string())
        .filter(|text| KEYWORD.is_match(text))
        .map(|text| unescape_pdf_string(&text))
        .collect()
}

/// Resolves PDF literal-string escapes: `\n \r \t \b \f \( \) \\` and
/// one-to-three digit octal codes. Unknown escapes drop the backslash.
pub(crate) fn unescape_pdf_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some(d @ '0'..='7') => {
                let mut code = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|n| n.to_digit(8)) {
                        Some(v) => {
                            code = code * 8 + v;
                            chars.next();
                        }
                        None => break,
                    }
                }
                // Octal escapes address single bytes; read them as Latin-1.
                out.push(char::from((code & 0xff) as u8));
            }
            // Escaped line break is a continuation.
            Some('\n') => {}
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
