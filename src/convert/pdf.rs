use super::decode_base64_document;
use crate::ConvertError;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Characters that open a bullet line in extracted PDF text
const BULLETS: &[char] = &['•', '◦', '▪', '‣', '●', '-', '*', '–'];

/// Longest line treated as a section heading
const MAX_HEADING_CHARS: usize = 60;

/// Extracts the text layer of a PDF
///
/// Trailing whitespace is trimmed from every line and runs of blank lines
/// collapse to one. Scanned PDFs without a text layer yield an empty string.
pub fn pdf_to_plain_text(encoded: &str) -> Result<String, ConvertError> {
    let raw = extract_pdf_text(encoded)?;
    Ok(normalize_text(&raw))
}

/// Converts the text layer of a PDF to markdown
///
/// Blank-line separated blocks become paragraphs. Short all-caps lines
/// standing alone become `##` headings, bullet lines become `- item`, and
/// the remaining lines of a block are joined with spaces.
pub fn pdf_to_markdown(encoded: &str) -> Result<String, ConvertError> {
    let raw = extract_pdf_text(encoded)?;
    Ok(text_to_markdown(&normalize_text(&raw)))
}

fn extract_pdf_text(encoded: &str) -> Result<String, ConvertError> {
    let bytes = decode_base64_document(encoded)?;
    if !bytes.starts_with(b"%PDF-") {
        return Err(ConvertError::UnreadablePdf("missing %PDF- header".to_string()));
    }

    // pdf-extract panics on some malformed fonts and streams
    match catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(&bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            tracing::debug!("Rejected PDF document: {}", e);
            Err(ConvertError::UnreadablePdf(e.to_string()))
        }
        Err(_) => {
            tracing::warn!("PDF text extraction panicked");
            Err(ConvertError::UnreadablePdf("text extraction failed".to_string()))
        }
    }
}

fn normalize_text(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut blank_run = false;

    for line in raw.lines() {
        let line = line.replace('\u{c}', "");
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run = true;
            continue;
        }
        if !output.is_empty() {
            output.push_str(if blank_run { "\n\n" } else { "\n" });
        }
        output.push_str(line);
        blank_run = false;
    }

    output
}

fn text_to_markdown(text: &str) -> String {
    let mut blocks = Vec::new();

    for block in text.split("\n\n") {
        let lines: Vec<&str> = block.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            continue;
        }

        if lines.len() == 1 && is_heading(lines[0]) {
            blocks.push(format!("## {}", lines[0]));
            continue;
        }

        let mut rendered = Vec::new();
        let mut paragraph = Vec::new();
        for line in lines {
            match bullet_item(line) {
                Some(item) => {
                    if !paragraph.is_empty() {
                        rendered.push(paragraph.join(" "));
                        paragraph.clear();
                    }
                    rendered.push(format!("- {}", item));
                }
                None => paragraph.push(line),
            }
        }
        if !paragraph.is_empty() {
            rendered.push(paragraph.join(" "));
        }
        blocks.push(rendered.join("\n"));
    }

    blocks.join("\n\n")
}

fn is_heading(line: &str) -> bool {
    line.chars().count() <= MAX_HEADING_CHARS
        && line.chars().any(char::is_alphabetic)
        && !line.chars().any(char::is_lowercase)
}

fn bullet_item(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(BULLETS)?;
    let item = rest.trim_start();
    (!item.is_empty() && rest.len() != item.len()).then_some(item)
}
