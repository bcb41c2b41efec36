//! Document-to-text extraction for résumé source files.

use std::fs::{self, File};
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use thiserror::Error;
use zip::ZipArchive;

use crate::render::docx::DOCUMENT_PART;

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["pdf", "docx", "txt", "md"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Error parsing file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid document package: {0}")]
    Package(#[from] zip::result::ZipError),
}

/// Turns a résumé source file into plain text.
pub trait TextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Extracts `.pdf`, `.docx`, `.txt` and `.md` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentTextExtractor;

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let parse_error = |message: String| ExtractError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let text = match extension_of(path).as_deref() {
            Some("pdf") => pdf_extract::extract_text(path).map_err(|e| parse_error(e.to_string()))?,
            Some("docx") => File::open(path)
                .map_err(ExtractError::from)
                .and_then(docx_text)
                .map_err(|e| parse_error(e.to_string()))?,
            Some("txt") | Some("md") => {
                fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?
            }
            other => {
                return Err(ExtractError::UnsupportedFormat(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        Ok(text.trim().to_string())
    }
}

/// Lower-cased extension without the dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn is_supported(path: &Path) -> bool {
    extension_of(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Text of a `.docx` package, one line per paragraph.
pub fn docx_text<R: Read + Seek>(reader: R) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    Ok(paragraphs(&xml).join("\n").trim().to_string())
}

fn paragraphs(xml: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        if in_text {
            current.push_str(&unescape(&rest[..open]));
        }
        let Some(len) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + len];
        rest = &rest[open + len + 1..];

        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or_default();
        match name {
            "w:t" => in_text = !self_closing,
            "/w:t" => in_text = false,
            "w:br" | "w:cr" => current.push('\n'),
            "w:tab" => current.push('\t'),
            "w:p" if self_closing => paragraphs.push(String::new()),
            "/w:p" => paragraphs.push(std::mem::take(&mut current)),
            _ => {}
        }
    }
    paragraphs
}

/// Decodes the predefined XML entities and numeric character references.
/// Unknown or malformed references are kept verbatim.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .and_then(|end| Some((decode_entity(&rest[1..end])?, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "amp" => Some('&'),
        _ => {
            let code = match name.strip_prefix('#')? {
                hex if hex.starts_with(['x', 'X']) => u32::from_str_radix(&hex[1..], 16).ok()?,
                dec => dec.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::render::docx::package;
    use crate::render::Document;

    #[test]
    fn test_extension_detection() {
        assert!(is_supported(Path::new("cv.PDF")));
        assert!(is_supported(Path::new("dir/resume.md")));
        assert!(!is_supported(Path::new("resume.rtf")));
        assert!(!is_supported(Path::new("README")));
    }

    #[test]
    fn test_plain_text_is_trimmed() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("resume.txt");
        fs::write(&path, "\n  Ada Lovelace\nAnalyst  \n\n").unwrap();
        let text = DocumentTextExtractor.extract(&path).unwrap();
        assert_eq!(text, "Ada Lovelace\nAnalyst");
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let mut doc = Document::new();
        doc.heading(1, "Experience")
            .paragraph("R&D <Lead>")
            .bullet("first\nsecond");
        let bytes = package(&doc).unwrap();

        let text = docx_text(Cursor::new(bytes)).unwrap();
        assert_eq!(text, "Experience\nR&D <Lead>\nfirst\nsecond");
    }

    #[test]
    fn test_docx_file_through_extractor() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("resume.docx");
        let mut doc = Document::new();
        doc.paragraph("Grace Hopper");
        fs::write(&path, package(&doc).unwrap()).unwrap();

        assert_eq!(DocumentTextExtractor.extract(&path).unwrap(), "Grace Hopper");
    }

    #[test]
    fn test_corrupt_docx_is_parse_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("resume.docx");
        fs::write(&path, b"definitely not a zip").unwrap();
        let err = DocumentTextExtractor.extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DocumentTextExtractor
            .extract(Path::new("resume.rtf"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref ext) if ext == "rtf"));
    }

    #[test]
    fn test_self_closing_paragraph() {
        let xml = r#"<w:body><w:p/><w:p><w:r><w:t>x</w:t><w:tab/><w:t>y</w:t></w:r></w:p></w:body>"#;
        assert_eq!(paragraphs(xml), vec!["".to_string(), "x\ty".to_string()]);
    }

    #[test]
    fn test_numeric_character_references_decoded() {
        let xml = "<w:p><w:r><w:t>Caf&#233; &#x2013; R&amp;D</w:t></w:r></w:p>";
        assert_eq!(paragraphs(xml), vec!["Café – R&D".to_string()]);
    }

    #[test]
    fn test_unknown_references_kept() {
        assert_eq!(unescape("AT&T &nbsp; &#xZZ; a&b;"), "AT&T &nbsp; &#xZZ; a&b;");
    }
}
