/// The outcome of a successful crawl
///
/// Either a matched document (PDF, Word, RTF) or the HTML page that looked
/// most like a CV. Built once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    /// File name for documents, page title (or derived name) for HTML pages
    pub document_name: String,

    /// The URL the resource was requested from
    pub document_link: String,

    /// MIME type, e.g. `application/pdf` or `text/html`
    pub document_type: String,

    /// Raw response body
    pub document_content: Vec<u8>,
}
