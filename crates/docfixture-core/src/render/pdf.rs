//! Minimal single-page PDF writer.
//!
//! Produces a PDF 1.4 file with five objects: catalog, page tree, page,
//! content stream and a Type1 Helvetica font. The content stream length,
//! cross-reference offsets and `startxref` are computed from the bytes
//! actually written.

const FONT_SIZE: u32 = 12;
const ORIGIN_X: u32 = 100;
const ORIGIN_Y: u32 = 700;
const LINE_GAP: u32 = 20;
const SECTION_GAP: u32 = 40;
// US Letter in points.
const MEDIA_BOX: &str = "[0 0 612 792]";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Vertical distance from the previous line, in points.
    pub gap_before: u32,
}

/// Lines of text laid out top-down from a fixed origin.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TextPage {
    lines: Vec<TextLine>,
}

impl TextPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        let gap_before = if self.lines.is_empty() { 0 } else { LINE_GAP };
        self.push(text.into(), gap_before)
    }

    /// A label preceded by a wider gap.
    pub fn section(&mut self, text: impl Into<String>) -> &mut Self {
        let gap_before = if self.lines.is_empty() { 0 } else { SECTION_GAP };
        self.push(text.into(), gap_before)
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    fn push(&mut self, text: String, gap_before: u32) -> &mut Self {
        self.lines.push(TextLine { text, gap_before });
        self
    }
}

pub fn render_pdf(page: &TextPage) -> Vec<u8> {
    let content = content_stream(page);
    let objects = [
        "<<\n/Type /Catalog\n/Pages 2 0 R\n>>".to_owned(),
        "<<\n/Type /Pages\n/Kids [3 0 R]\n/Count 1\n>>".to_owned(),
        format!(
            "<<\n/Type /Page\n/Parent 2 0 R\n/MediaBox {MEDIA_BOX}\n/Contents 4 0 R\n\
             /Resources <<\n/Font <<\n/F1 5 0 R\n>>\n>>\n>>"
        ),
        format!(
            "<<\n/Length {}\n>>\nstream\n{}\nendstream",
            content.len(),
            content
        ),
        "<<\n/Type /Font\n/Subtype /Type1\n/BaseFont /Helvetica\n>>".to_owned(),
    ];

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n\n", idx + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        out.push_str(&format!("{offset:010} 00000 n \n"));
    }
    out.push_str(&format!(
        "trailer\n<<\n/Size {}\n/Root 1 0 R\n>>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}

fn content_stream(page: &TextPage) -> String {
    let mut stream = format!("BT\n/F1 {FONT_SIZE} Tf\n{ORIGIN_X} {ORIGIN_Y} Td\n");
    for (idx, line) in page.lines().iter().enumerate() {
        if idx > 0 {
            stream.push_str(&format!("0 -{} Td\n", line.gap_before));
        }
        stream.push_str(&format!("({}) Tj\n", escape_text(&line.text)));
    }
    stream.push_str("ET");
    stream
}

/// Escape for a PDF literal string. Characters outside ASCII have no glyph in
/// the standard Helvetica encoding and are replaced with `?`.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            _ => escaped.push('?'),
        }
    }
    escaped
}
