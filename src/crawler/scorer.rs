//! Keyword-based relevance scoring
//!
//! One keyword predicate drives two decisions: whether a fetched document is
//! the CV (terminal match), and how CV-like an HTML page is (candidate score).

/// Tokens that mark a CV when they appear as whole words
const CV_TOKENS: &[&str] = &["cv", "resume", "resumes", "vita", "vitae"];

/// Phrases that mark a CV anywhere in the normalized text
const CV_PHRASES: &[&str] = &["curriculum vitae"];

/// Points for a keyword in the page URL
pub const URL_WEIGHT: u32 = 3;

/// Points for a keyword in the page text
pub const TEXT_WEIGHT: u32 = 2;

/// Points for a keyword in the anchor text that led to the page
pub const ANCHOR_WEIGHT: u32 = 3;

/// Points for a keyword in the page title
pub const TITLE_WEIGHT: u32 = 3;

/// Highest score an HTML candidate can reach
pub const MAX_SCORE: u32 = URL_WEIGHT + TEXT_WEIGHT + ANCHOR_WEIGHT + TITLE_WEIGHT;

/// Returns true if any fragment mentions a CV
///
/// Each fragment is lowercased and every run of characters outside
/// `[a-z0-9]` collapses to a single space. A fragment matches when the result
/// contains `"curriculum vitae"` or one of its words is `cv`, `resume`,
/// `resumes`, `vita` or `vitae`. Missing and empty fragments are skipped.
///
/// # Examples
///
/// ```
/// use cv_finder::crawler::has_cv_keyword;
///
/// assert!(has_cv_keyword([Some("Curriculum-Vitae_2023.docx")]));
/// assert!(has_cv_keyword([None, Some("https://example.com/jane-cv.pdf")]));
/// assert!(!has_cv_keyword([Some("curriculumvitae.docx")]));
/// assert!(!has_cv_keyword([Some("cvs-pharmacy"), None]));
/// ```
pub fn has_cv_keyword<const N: usize>(fragments: [Option<&str>; N]) -> bool {
    fragments
        .into_iter()
        .flatten()
        .filter(|fragment| !fragment.is_empty())
        .any(fragment_has_cv_keyword)
}

fn fragment_has_cv_keyword(fragment: &str) -> bool {
    let normalized = normalize_fragment(fragment);

    if CV_PHRASES.iter().any(|phrase| normalized.contains(phrase)) {
        return true;
    }

    normalized
        .split_whitespace()
        .any(|token| CV_TOKENS.contains(&token))
}

/// Lowercases and collapses every non-`[a-z0-9]` run into one space
fn normalize_fragment(fragment: &str) -> String {
    let mut normalized = String::with_capacity(fragment.len());
    let mut in_separator = false;

    for c in fragment.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            normalized.push(c);
            in_separator = false;
        } else if !in_separator {
            normalized.push(' ');
            in_separator = true;
        }
    }

    normalized
}

/// Identifying text of a fetched document
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentSignals<'a> {
    pub filename: Option<&'a str>,
    pub url: Option<&'a str>,
    pub anchor_hint: Option<&'a str>,
    pub content_disposition: Option<&'a str>,
}

/// Returns true if the document is the CV the crawl is looking for
pub fn is_document_match(signals: &DocumentSignals<'_>) -> bool {
    has_cv_keyword([
        signals.filename,
        signals.url,
        signals.anchor_hint,
        signals.content_disposition,
    ])
}

/// Textual signals of an HTML page
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSignals<'a> {
    pub url: Option<&'a str>,
    pub text: Option<&'a str>,
    pub anchor_hint: Option<&'a str>,
    /// Page title, or the name derived from the URL when there is no title
    pub title: Option<&'a str>,
}

/// Scores how CV-like an HTML page is, from 0 to [`MAX_SCORE`]
///
/// | Signal | Points |
/// |--------|--------|
/// | URL | 3 |
/// | Page text | 2 |
/// | Anchor text that led here | 3 |
/// | Title | 3 |
pub fn score_html_candidate(signals: &PageSignals<'_>) -> u32 {
    [
        (signals.url, URL_WEIGHT),
        (signals.text, TEXT_WEIGHT),
        (signals.anchor_hint, ANCHOR_WEIGHT),
        (signals.title, TITLE_WEIGHT),
    ]
    .into_iter()
    .filter(|(fragment, _)| has_cv_keyword([*fragment]))
    .map(|(_, weight)| weight)
    .sum()
}
