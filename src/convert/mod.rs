//! Document conversion for submitted CVs
//!
//! Callers send a Word (`.docx`) or PDF document as base64 and get back
//! plain text or markdown. Conversions are pure and synchronous; the HTTP
//! service runs them on the blocking pool.
//!
//! # Example
//!
//! ```no_run
//! use cv_finder::convert::Conversion;
//!
//! let markdown = Conversion::WordToMarkdown.apply("UEsDBA...").unwrap();
//! println!("{}", markdown);
//! ```

mod pdf;
mod word;

pub use pdf::{pdf_to_markdown, pdf_to_plain_text};
pub use word::{word_to_markdown, word_to_plain_text};

use crate::ConvertError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// The four supported conversions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    WordToPlainText,
    WordToMarkdown,
    PdfToPlainText,
    PdfToMarkdown,
}

impl Conversion {
    /// Runs the conversion on base64 document content
    pub fn apply(self, encoded: &str) -> Result<String, ConvertError> {
        match self {
            Self::WordToPlainText => word_to_plain_text(encoded),
            Self::WordToMarkdown => word_to_markdown(encoded),
            Self::PdfToPlainText => pdf_to_plain_text(encoded),
            Self::PdfToMarkdown => pdf_to_markdown(encoded),
        }
    }

    /// True when the output is markdown rather than plain text
    pub fn produces_markdown(self) -> bool {
        matches!(self, Self::WordToMarkdown | Self::PdfToMarkdown)
    }
}

/// Decodes base64 document content (standard alphabet)
///
/// ASCII whitespace is ignored, so line-wrapped base64 is accepted.
///
/// # Examples
///
/// ```
/// use cv_finder::convert::decode_base64_document;
///
/// assert_eq!(decode_base64_document("JVBE\nRi0=").unwrap(), b"%PDF-");
/// assert!(decode_base64_document("not base64!").is_err());
/// ```
pub fn decode_base64_document(encoded: &str) -> Result<Vec<u8>, ConvertError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact)?)
}
