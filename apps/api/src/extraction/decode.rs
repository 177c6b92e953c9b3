//! Byte Decoder — lossy textual view over a binary buffer.

use std::borrow::Cow;

/// Decodes raw bytes as UTF-8, replacing invalid sequences with U+FFFD.
///
/// Never fails. Binary regions of a PDF or ZIP container come out as
/// replacement characters, which the scanning passes simply do not match.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
