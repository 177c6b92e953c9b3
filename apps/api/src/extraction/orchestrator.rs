//! Extraction Orchestrator — fetch, dispatch, quality gate, cap.
//!
//! Every fault in this layer is absorbed into descriptive fallback text so the
//! generation stage is always reached with something usable.

use std::panic;

use serde::Serialize;
use tracing::{info, warn};

use crate::extraction::docx::extract_docx_text;
use crate::extraction::fetch::DocumentFetcher;
use crate::extraction::pdf::extract_pdf_text;
use crate::extraction::{ExtractionError, FileType};

/// Hard cap on text handed to the prompt builder.
pub const MAX_PROMPT_CHARS: usize = 15_000;
/// Cap on the copy archived alongside the resume record.
pub const MAX_ARCHIVE_CHARS: usize = 50_000;
/// Extractions shorter than this are wrapped in a "limited" notice.
pub const MIN_USEFUL_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    Extracted,
    Limited,
    RetrievalFailed,
    ExtractionFailed,
}

#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// At most `MAX_PROMPT_CHARS` chars. Never empty.
    pub text: String,
    /// At most `MAX_ARCHIVE_CHARS` chars. Never empty.
    pub archival_text: String,
    pub status: ExtractionStatus,
}

/// Downloads `file_url` and extracts readable text according to `file_type`.
pub async fn extract(
    fetcher: &dyn DocumentFetcher,
    file_url: &str,
    file_type: FileType,
) -> ExtractionOutcome {
    match fetcher.fetch(file_url).await {
        Ok(bytes) => {
            info!("Downloaded {} resume ({} bytes)", file_type, bytes.len());
            extract_from_bytes(&bytes, file_type)
        }
        Err(e) => {
            warn!("Resume download failed, using fallback text: {e}");
            finalize(retrieval_fallback(file_type), ExtractionStatus::RetrievalFailed)
        }
    }
}

/// Runs the matching extractor over an in-memory buffer and applies the
/// quality gate and size caps.
pub fn extract_from_bytes(bytes: &[u8], file_type: FileType) -> ExtractionOutcome {
    let extractor: Extractor = match file_type {
        FileType::Pdf => extract_pdf_text,
        FileType::Docx => extract_docx_text,
    };
    extract_with(bytes, file_type, extractor)
}

type Extractor = fn(&[u8]) -> String;

fn extract_with(bytes: &[u8], file_type: FileType, extractor: Extractor) -> ExtractionOutcome {
    match run_extractor(bytes, file_type, extractor) {
        Ok(text) if text.chars().count() < MIN_USEFUL_CHARS => {
            warn!(
                "{} extraction recovered only {} chars, wrapping in limited notice",
                file_type,
                text.chars().count()
            );
            finalize(limited_fallback(file_type, &text), ExtractionStatus::Limited)
        }
        Ok(text) => {
            info!("{} extraction recovered {} chars", file_type, text.chars().count());
            finalize(text, ExtractionStatus::Extracted)
        }
        Err(e) => {
            warn!("Resume extraction failed, using fallback text: {e}");
            finalize(failure_fallback(file_type), ExtractionStatus::ExtractionFailed)
        }
    }
}

fn run_extractor(
    bytes: &[u8],
    file_type: FileType,
    extractor: Extractor,
) -> Result<String, ExtractionError> {
    panic::catch_unwind(|| extractor(bytes)).map_err(|_| ExtractionError::Panicked(file_type))
}

fn finalize(text: String, status: ExtractionStatus) -> ExtractionOutcome {
    ExtractionOutcome {
        archival_text: truncate_chars(&text, MAX_ARCHIVE_CHARS),
        text: truncate_chars(&text, MAX_PROMPT_CHARS),
        status,
    }
}

/// Cuts `text` to at most `max` chars on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn retrieval_fallback(file_type: FileType) -> String {
    format!(
        "[The {file_type} resume file could not be downloaded, so its content is unavailable. \
        Provide general, encouraging career guidance suitable for a typical job seeker and \
        suggest sharing a clearer copy of the resume for detailed feedback.]"
    )
}

fn failure_fallback(file_type: FileType) -> String {
    format!(
        "[The {file_type} resume file could not be read, so its content is unavailable. \
        Provide general, encouraging career guidance suitable for a typical job seeker and \
        suggest sharing a text-based copy of the resume for detailed feedback.]"
    )
}

fn limited_fallback(file_type: FileType, recovered: &str) -> String {
    format!(
        "[Resume text extraction was limited. The {file_type} file may be scanned, image-based \
        or compressed, so only partial text could be recovered. Provide general career \
        guidance and base any specific feedback only on the recovered text below.]\n\n\
        Recovered text: {recovered}"
    )
}
