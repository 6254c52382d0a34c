use super::decode_base64_document;
use crate::ConvertError;
use docx_rs::{
    read_docx, DocumentChild, Docx, Paragraph, ParagraphChild, RunChild, Table, TableCellContent,
    TableChild, TableRowChild,
};

/// Extracts the text of a `.docx` document
///
/// Non-empty paragraphs become one line each; table rows become one line
/// with cells separated by tabs. Body order is preserved.
pub fn word_to_plain_text(encoded: &str) -> Result<String, ConvertError> {
    let docx = load_docx(encoded)?;
    let mut lines = Vec::new();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                let text = paragraph_text(paragraph);
                let text = text.trim();
                if !text.is_empty() {
                    lines.push(text.to_string());
                }
            }
            DocumentChild::Table(table) => {
                for row in table_rows(table) {
                    lines.push(row.join("\t"));
                }
            }
            _ => {}
        }
    }

    Ok(lines.join("\n").trim().to_string())
}

/// Converts a `.docx` document to markdown
///
/// | Word | Markdown |
/// |------|----------|
/// | `HeadingN` style | `#` repeated N times |
/// | Numbered or bulleted paragraph | `- item` |
/// | Table | pipe table, first row as header |
/// | Anything else | plain paragraph |
pub fn word_to_markdown(encoded: &str) -> Result<String, ConvertError> {
    let docx = load_docx(encoded)?;
    let mut lines = Vec::new();

    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(paragraph) => {
                if let Some(line) = paragraph_to_markdown(paragraph) {
                    lines.push(line);
                }
            }
            DocumentChild::Table(table) => lines.extend(table_to_markdown(table)),
            _ => {}
        }
    }

    Ok(lines.join("\n").trim().to_string())
}

fn load_docx(encoded: &str) -> Result<Docx, ConvertError> {
    let bytes = decode_base64_document(encoded)?;
    read_docx(&bytes).map_err(|e| {
        tracing::debug!("Rejected Word document: {}", e);
        ConvertError::UnreadableWord(e.to_string())
    })
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, &mut text);
    text
}

fn push_children_text(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_children_text(&link.children, text),
            _ => {}
        }
    }
}

fn paragraph_to_markdown(paragraph: &Paragraph) -> Option<String> {
    let text = paragraph_text(paragraph);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let style = paragraph
        .property
        .style
        .as_ref()
        .map(|style| style.val.as_str())
        .unwrap_or_default();
    if let Some(level) = heading_level(style) {
        return Some(format!("{} {}", "#".repeat(level), text));
    }

    if paragraph.property.numbering_property.is_some() || looks_like_list_item(text) {
        return Some(format!("- {}", text));
    }

    Some(text.to_string())
}

/// Level of a heading style such as `Heading2` or `heading 2`; 1 when the
/// style carries no number
fn heading_level(style: &str) -> Option<usize> {
    if !style.to_ascii_lowercase().starts_with("heading") {
        return None;
    }
    let digits: String = style.chars().filter(char::is_ascii_digit).collect();
    Some(digits.parse::<usize>().unwrap_or(1).max(1))
}

fn looks_like_list_item(text: &str) -> bool {
    let text = text.trim_start();
    if text.starts_with('-') || text.starts_with('*') {
        return true;
    }
    let bytes = text.as_bytes();
    bytes.len() > 2 && bytes[0].is_ascii_digit() && bytes[1] == b'.'
}

/// Cell texts of every row, trimmed
fn table_rows(table: &Table) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|TableChild::TableRow(row)| {
            row.cells
                .iter()
                .map(|TableRowChild::TableCell(cell)| {
                    cell.children
                        .iter()
                        .filter_map(|content| match content {
                            TableCellContent::Paragraph(paragraph) => {
                                Some(paragraph_text(paragraph))
                            }
                            _ => None,
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                        .trim()
                        .to_string()
                })
                .collect()
        })
        .collect()
}

fn table_to_markdown(table: &Table) -> Vec<String> {
    let rows = table_rows(table);
    let Some((header, body)) = rows.split_first() else {
        return Vec::new();
    };

    let cell = |text: &String| {
        if text.is_empty() {
            " ".to_string()
        } else {
            text.replace('\n', " ")
        }
    };

    let header: Vec<String> = header.iter().map(cell).collect();
    let mut lines = vec![
        format!("| {} |", header.join(" | ")),
        format!("| {} |", vec!["---"; header.len()].join(" | ")),
    ];
    for row in body {
        let cells: Vec<String> = row.iter().map(cell).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines
}
