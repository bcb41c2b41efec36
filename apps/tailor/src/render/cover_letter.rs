use crate::render::blocks::Document;

pub const PLACEHOLDER: &str = "No content provided.";
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// One paragraph per non-empty `"\n\n"`-separated segment of the body.
/// A missing or blank body renders the placeholder paragraph.
pub fn render_cover_letter(content: Option<&str>) -> Document {
    let mut doc = Document::new();
    let paragraphs = content
        .into_iter()
        .flat_map(|body| body.split(PARAGRAPH_SEPARATOR))
        .map(str::trim)
        .filter(|segment| !segment.is_empty());

    for paragraph in paragraphs {
        doc.paragraph(paragraph);
    }
    if doc.blocks().is_empty() {
        doc.paragraph(PLACEHOLDER);
    }
    doc
}
