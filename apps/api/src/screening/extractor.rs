//! Text extraction from uploaded resume documents.
//!
//! Extraction never fails at the boundary: a corrupt or unsupported document
//! becomes `Extraction::Failed`, which collapses to an empty string and is
//! then screened as an empty resume (score 0, Low quality, Rejected).

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

/// Outcome of extracting text from one document.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Text(String),
    /// The document parsed but contained no text (e.g. a scanned image PDF).
    Empty,
    Failed { reason: String },
}

impl Extraction {
    fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            Extraction::Empty
        } else {
            Extraction::Text(text)
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Extraction::Failed { .. })
    }

    pub fn into_text(self) -> String {
        match self {
            Extraction::Text(text) => text,
            Extraction::Empty | Extraction::Failed { .. } => String::new(),
        }
    }
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Extraction;

    fn name(&self) -> &'static str;
}

/// PDF extractor backed by `pdf-extract`. Pages are concatenated in document order.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Extraction {
        if bytes.is_empty() {
            return Extraction::Failed {
                reason: "document is empty".to_string(),
            };
        }
        // pdf-extract can panic on malformed streams; treat that like a parse error.
        match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Extraction::from_text(text),
            Ok(Err(e)) => Extraction::Failed {
                reason: e.to_string(),
            },
            Err(_) => Extraction::Failed {
                reason: "PDF parser panicked".to_string(),
            },
        }
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

/// Plain UTF-8 text; invalid sequences are replaced rather than rejected.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Extraction {
        Extraction::from_text(String::from_utf8_lossy(bytes).into_owned())
    }

    fn name(&self) -> &'static str {
        "plain_text"
    }
}

/// Picks an extractor from the filename extension. Unknown types go to the PDF
/// extractor and fail softly there.
pub fn extractor_for(filename: &str) -> &'static dyn TextExtractor {
    match file_extension(filename).as_deref() {
        Some("txt") => &PlainTextExtractor,
        _ => &PdfTextExtractor,
    }
}

/// Lowercased extension after the last `.`, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Extracts text from `bytes`, returning an empty string on any failure.
pub fn extract_text(bytes: &[u8], filename: &str) -> String {
    let extractor = extractor_for(filename);
    let outcome = extractor.extract(bytes);
    if let Extraction::Failed { reason } = &outcome {
        warn!(
            extractor = extractor.name(),
            filename, "Text extraction failed, screening as empty resume: {reason}"
        );
    }
    outcome.into_text()
}
