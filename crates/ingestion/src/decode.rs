//! Declared-encoding text decoding.
//!
//! The source tabular file ships as UTF-16, not UTF-8, so the encoding is
//! explicit and configurable rather than assumed. A byte-order mark in the
//! payload overrides the declared encoding, matching how browsers decode
//! the same files.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

use capmap_common::{CapError, CapResult};

/// Text encodings accepted for the input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl Default for TextEncoding {
    /// The source data is 16-bit encoded; UTF-16LE is the default.
    fn default() -> Self {
        TextEncoding::Utf16Le
    }
}

impl TextEncoding {
    /// Parse an encoding label from configuration.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(TextEncoding::Utf8),
            "utf-16" | "utf-16le" | "utf16le" => Some(TextEncoding::Utf16Le),
            "utf-16be" | "utf16be" => Some(TextEncoding::Utf16Be),
            _ => None,
        }
    }

    /// Human-readable label for logs and errors.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
        }
    }

    fn as_encoding(&self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => UTF_8,
            TextEncoding::Utf16Le => UTF_16LE,
            TextEncoding::Utf16Be => UTF_16BE,
        }
    }
}

/// Decode raw bytes with the declared encoding.
///
/// A BOM in the payload takes precedence over `encoding` and is stripped
/// from the output. Malformed sequences fail the decode; the caller
/// degrades the dataset to empty rather than rendering garbage rows.
pub fn decode_text(raw: &[u8], encoding: TextEncoding) -> CapResult<String> {
    let (text, _actual, had_errors) = encoding.as_encoding().decode(raw);
    if had_errors {
        return Err(CapError::Decode {
            encoding: encoding.label().to_string(),
            message: "payload contains malformed sequences".to_string(),
        });
    }
    Ok(text.into_owned())
}
