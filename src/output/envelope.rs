use crate::convert::Conversion;
use crate::crawler::DocumentResult;
use crate::{ConvertError, CrawlError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// JSON response envelope shared by the CLI and the HTTP service
///
/// Successful lookups carry the document fields with the content
/// base64-encoded, and successful conversions carry `documentText` or
/// `documentMarkdown`. Every other response carries only the status and, for
/// client errors, a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Base64 (standard alphabet, padded) of the raw document bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_content: Option<String>,

    /// Plain text produced by a conversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_text: Option<String>,

    /// Markdown produced by a conversion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_markdown: Option<String>,

    pub status_code: u16,

    pub status_code_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    fn status(status_code: u16, description: &str, message: Option<String>) -> Self {
        Self {
            document_name: None,
            document_link: None,
            document_type: None,
            document_content: None,
            document_text: None,
            document_markdown: None,
            status_code,
            status_code_description: description.to_string(),
            message,
        }
    }

    /// 200 with the document fields
    pub fn found(result: &DocumentResult) -> Self {
        Self {
            document_name: Some(result.document_name.clone()),
            document_link: Some(result.document_link.clone()),
            document_type: Some(result.document_type.clone()),
            document_content: Some(STANDARD.encode(&result.document_content)),
            ..Self::status(200, "OK", None)
        }
    }

    /// 404 when the crawl found nothing acceptable
    pub fn not_found() -> Self {
        Self::status(404, "Not Found", None)
    }

    /// 400 with an explanation
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::status(400, "Bad Request", Some(message.into()))
    }

    /// 401 for a missing or unknown API key
    pub fn unauthorized() -> Self {
        Self::status(401, "Unauthorized", None)
    }

    /// 500 for failures that are not the caller's fault
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::status(500, "Internal Server Error", Some(message.into()))
    }

    /// Maps the result of a crawl onto the envelope
    ///
    /// | Result | Status |
    /// |--------|--------|
    /// | `Ok(Some(_))` | 200 |
    /// | `Ok(None)` | 404 |
    /// | `Err(InvalidStartUrl)` | 400 |
    /// | any other error | 500 |
    pub fn from_crawl(result: &Result<Option<DocumentResult>, CrawlError>) -> Self {
        match result {
            Ok(Some(document)) => Self::found(document),
            Ok(None) => Self::not_found(),
            Err(e @ CrawlError::InvalidStartUrl(_)) => Self::bad_request(e.to_string()),
            Err(e) => Self::internal_error(e.to_string()),
        }
    }

    /// Maps the result of a document conversion onto the envelope
    ///
    /// Output lands in `documentMarkdown` or `documentText` depending on the
    /// conversion; every conversion error is a 400.
    pub fn from_conversion(conversion: Conversion, result: Result<String, ConvertError>) -> Self {
        match result {
            Ok(output) if conversion.produces_markdown() => Self {
                document_markdown: Some(output),
                ..Self::status(200, "OK", None)
            },
            Ok(output) => Self {
                document_text: Some(output),
                ..Self::status(200, "OK", None)
            },
            Err(e) => Self::bad_request(e.to_string()),
        }
    }

    /// Decodes `document_content` back into bytes
    pub fn decode_content(&self) -> Option<Vec<u8>> {
        self.document_content
            .as_ref()
            .and_then(|content| STANDARD.decode(content).ok())
    }
}
