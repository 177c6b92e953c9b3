//! DOCX Text Extractor — scans WordprocessingML for text runs.
//!
//! The main document part is inflated from the ZIP container when the archive
//! opens. Otherwise the raw bytes are scanned as-is. Either way a loose markup
//! heuristic takes over when too few runs are found.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;
use zip::ZipArchive;

use crate::extraction::decode::decode_lossy;
use crate::extraction::fragments::{collapse_whitespace, dedup_fragments, join_fragments};

static TEXT_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<[A-Za-z0-9]+:t(?:\s[^>]*)?>(.*?)</[A-Za-z0-9]+:t>").unwrap()
});
static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<>]{5,})<").unwrap());
static THREE_LETTERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]{3,}").unwrap());
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(amp|lt|gt|quot|apos|#[0-9]+|#x[0-9A-Fa-f]+);").unwrap());

/// Below this many text runs the tag scan is considered to have missed.
const MIN_TEXT_RUNS: usize = 10;

const DOCUMENT_PART: &str = "word/document.xml";
/// Upper bound on the inflated document part.
const MAX_DOCUMENT_BYTES: u64 = 32 * 1024 * 1024;

/// Best-effort plain text from a buffer declared as DOCX. Never fails.
pub fn extract_docx_text(bytes: &[u8]) -> String {
    match read_document_part(bytes) {
        Some(xml) => extract_from_markup(&decode_lossy(&xml)),
        None => extract_from_markup(&decode_lossy(bytes)),
    }
}

/// Inflated `word/document.xml`, or `None` when `bytes` is not a readable
/// archive holding that part.
fn read_document_part(bytes: &[u8]) -> Option<Vec<u8>> {
    let mut archive = match ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(e) => {
            debug!("docx is not a readable zip archive, scanning raw bytes: {e}");
            return None;
        }
    };

    let part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(e) => {
            debug!("docx archive has no {DOCUMENT_PART}, scanning raw bytes: {e}");
            return None;
        }
    };

    let mut xml = Vec::new();
    if let Err(e) = part.take(MAX_DOCUMENT_BYTES).read_to_end(&mut xml) {
        debug!("failed to inflate {DOCUMENT_PART}, scanning raw bytes: {e}");
        return None;
    }
    Some(xml)
}

fn extract_from_markup(content: &str) -> String {
    let mut fragments = scan_text_runs(content);
    if fragments.len() < MIN_TEXT_RUNS {
        debug!(runs = fragments.len(), "docx run scan sparse, using markup heuristic");
        fragments = scan_between_tags(content);
    }

    let fragments = fragments
        .into_iter()
        .map(|f| collapse_whitespace(&decode_entities(&f)))
        .filter(|f| !f.is_empty());

    join_fragments(&dedup_fragments(fragments))
}

/// Inner text of every `<x:t>` run, in document order.
pub(crate) fn scan_text_runs(content: &str) -> Vec<String> {
    TEXT_RUN
        .captures_iter(content)
        .map(|run| run[1].to_string())
        .collect()
}

/// Loose fallback: text of five or more chars between `>` and `<` that
/// contains at least three consecutive letters.
pub(crate) fn scan_between_tags(content: &str) -> Vec<String> {
    BETWEEN_TAGS
        .captures_iter(content)
        .map(|m| m[1].to_string())
        .filter(|text| THREE_LETTERS.is_match(text))
        .collect()
}

/// Decodes the predefined XML entities and numeric character references.
pub(crate) fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => name
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .unwrap_or_else(|| name[1..].parse::<u32>())
                    .ok()
                    .and_then(char::from_u32),
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    fn deflated_docx(document: &str) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types/>"#).unwrap();
        zip.start_file(DOCUMENT_PART, options).unwrap();
        zip.write_all(document.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    fn document_xml(runs: &[&str]) -> String {
        let body: String = runs
            .iter()
            .map(|r| format!(r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">{r}</w:t></w:r></w:p>"#))
            .collect();
        format!("PK\u{3}\u{4}word/document.xml<w:document><w:body>{body}</w:body></w:document>")
    }

    #[test]
    fn test_text_runs_in_document_order() {
        let xml = document_xml(&["Kavya S", "Data Analyst"]);
        assert_eq!(scan_text_runs(&xml), vec!["Kavya S", "Data Analyst"]);
    }

    #[test]
    fn test_text_run_ignores_tab_and_table_tags() {
        let xml = "<w:tab/><w:tbl><w:t>Cell text</w:t></w:tbl>";
        assert_eq!(scan_text_runs(xml), vec!["Cell text"]);
    }

    #[test]
    fn test_enough_runs_uses_run_scan() {
        let runs = [
            "Arjun Kumar",
            "Chennai",
            "Summary",
            "Mechanical engineer",
            "Experience",
            "TVS Motors",
            "Quality inspection",
            "Education",
            "B.E. Mechanical",
            "Anna University",
        ];
        let out = extract_docx_text(document_xml(&runs).as_bytes());
        assert_eq!(out, runs.join(" "));
    }

    #[test]
    fn test_sparse_runs_fall_back_to_markup_heuristic() {
        let xml = "<root><w:t>Only run</w:t><name>Meena Lakshmi</name><x>ab</x><y>12345</y></root>";
        let out = extract_docx_text(xml.as_bytes());
        assert_eq!(out, "Only run Meena Lakshmi");
    }

    #[test]
    fn test_between_tags_requires_three_letters() {
        let frags = scan_between_tags("<a>12 ab 34</a><b>Python developer</b>");
        assert_eq!(frags, vec!["Python developer"]);
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(decode_entities("R&amp;D &lt;team&gt;"), "R&D <team>");
        assert_eq!(decode_entities("&quot;x&quot; &apos;y&apos;"), "\"x\" 'y'");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
    }

    #[test]
    fn test_duplicate_runs_removed() {
        let mut runs = vec!["Skills"; 6];
        runs.extend(["Excel", "Tally", "Excel", "Typing", "Skills"]);
        let out = extract_docx_text(document_xml(&runs).as_bytes());
        assert_eq!(out, "Skills Excel Tally Typing");
    }

    #[test]
    fn test_deflated_archive_is_inflated_before_scanning() {
        let runs = [
            "Divya Prakash",
            "Coimbatore",
            "Objective",
            "Entry-level accountant",
            "Education",
            "B.Com, PSG College",
            "Skills",
            "Tally ERP",
            "GST filing",
            "MS Excel",
            "Languages",
            "Tamil, English",
        ];
        let body: String = runs
            .iter()
            .map(|r| format!("<w:p><w:r><w:t>{r}</w:t></w:r></w:p>"))
            .collect();
        let docx = deflated_docx(&format!("<w:document><w:body>{body}</w:body></w:document>"));

        assert!(docx.starts_with(b"PK"));
        assert_eq!(extract_docx_text(&docx), runs.join(" "));
    }

    #[test]
    fn test_inflated_part_with_sparse_runs_uses_markup_heuristic() {
        let xml = "<w:document><w:t>Rahul</w:t><w:sdt><w:alias>Career summary</w:alias></w:sdt></w:document>";
        let out = extract_docx_text(&deflated_docx(xml));
        assert_eq!(out, "Rahul Career summary");
    }

    #[test]
    fn test_archive_without_document_part_scans_raw_bytes() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        zip.start_file("notes.xml", options).unwrap();
        zip.write_all(b"<note>Stored plain markup</note>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        assert!(extract_docx_text(&bytes).contains("Stored plain markup"));
    }

    #[test]
    fn test_binary_container_never_panics() {
        let noise: Vec<u8> = (0..2048u32).map(|i| (i * 17 % 256) as u8).collect();
        let _ = extract_docx_text(&noise);
        assert_eq!(extract_docx_text(&[]), "");
    }
}
