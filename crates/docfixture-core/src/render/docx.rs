//! DOCX rendering on top of `docx-rs`.

use std::collections::BTreeSet;
use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Run, Start, Style, StyleType,
};

use super::RenderError;
use crate::model::{Alignment, Block, BlockKind, Document};

const BULLET_NUMBERING_ID: usize = 2;
const DECIMAL_NUMBERING_ID: usize = 3;

/// Render `doc` and package it as a complete `.docx` archive.
pub fn render_docx(doc: &Document) -> Result<Vec<u8>, RenderError> {
    let mut cursor = Cursor::new(Vec::new());
    to_docx(doc)
        .build()
        .pack(&mut cursor)
        .map_err(|err| RenderError::Pack(err.to_string()))?;
    Ok(cursor.into_inner())
}

/// Translate the model into a `docx-rs` document, declaring only the styles
/// and numbering definitions the blocks reference.
pub fn to_docx(doc: &Document) -> Docx {
    let mut docx = Docx::new();

    let keys: BTreeSet<_> = doc
        .blocks()
        .iter()
        .filter_map(|block| style_key(block.kind))
        .collect();
    for key in keys {
        docx = docx.add_style(style_for(key));
    }

    if doc.uses(BlockKind::ListBullet) {
        docx = docx
            .add_abstract_numbering(list_definition(BULLET_NUMBERING_ID, "bullet", "\u{2022}"))
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));
    }
    if doc.uses(BlockKind::ListNumber) {
        docx = docx
            .add_abstract_numbering(list_definition(DECIMAL_NUMBERING_ID, "decimal", "%1."))
            .add_numbering(Numbering::new(DECIMAL_NUMBERING_ID, DECIMAL_NUMBERING_ID));
    }

    for block in doc.blocks() {
        docx = docx.add_paragraph(paragraph(block));
    }
    docx
}

fn paragraph(block: &Block) -> Paragraph {
    let mut paragraph = Paragraph::new().add_run(run(block));

    if let Some(style) = block.kind.style_id() {
        paragraph = paragraph.style(&style);
    }

    paragraph = match block.alignment {
        Alignment::Left => paragraph,
        Alignment::Center => paragraph.align(AlignmentType::Center),
    };

    match block.kind {
        BlockKind::ListBullet => {
            paragraph.numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0))
        }
        BlockKind::ListNumber => {
            paragraph.numbering(NumberingId::new(DECIMAL_NUMBERING_ID), IndentLevel::new(0))
        }
        _ => paragraph,
    }
}

fn run(block: &Block) -> Run {
    let mut run = Run::new();
    for (idx, segment) in block.segments().enumerate() {
        if idx > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !segment.is_empty() {
            run = run.add_text(segment);
        }
    }

    if block.format.bold {
        run = run.bold();
    }
    if block.format.italic {
        run = run.italic();
    }
    if let Some(color) = block.format.color {
        run = run.color(color.hex());
    }
    run
}

fn list_definition(id: usize, format: &str, text: &str) -> AbstractNumbering {
    AbstractNumbering::new(id).add_level(Level::new(
        0,
        Start::new(1),
        NumberFormat::new(format),
        LevelText::new(text),
        LevelJc::new("left"),
    ))
}

/// Orderable stand-in for `BlockKind` so each style is declared once.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum StyleKey {
    Title,
    Heading(u8),
    ListBullet,
    ListNumber,
}

/// Body paragraphs use the document default style and need no declaration.
fn style_key(kind: BlockKind) -> Option<StyleKey> {
    match kind {
        BlockKind::Title => Some(StyleKey::Title),
        BlockKind::Heading(level) => Some(StyleKey::Heading(level)),
        BlockKind::ListBullet => Some(StyleKey::ListBullet),
        BlockKind::ListNumber => Some(StyleKey::ListNumber),
        BlockKind::Paragraph => None,
    }
}

// Sizes are half-points and follow the stock Word template.
fn style_for(key: StyleKey) -> Style {
    match key {
        StyleKey::Title => Style::new("Title", StyleType::Paragraph)
            .name("Title")
            .size(52)
            .color("17365D"),
        StyleKey::Heading(level) => {
            let size = match level {
                1 => 28,
                2 => 26,
                _ => 22,
            };
            Style::new(format!("Heading{level}"), StyleType::Paragraph)
                .name(format!("Heading {level}"))
                .size(size)
                .bold()
                .color("365F91")
        }
        StyleKey::ListBullet => Style::new("ListBullet", StyleType::Paragraph).name("List Bullet"),
        StyleKey::ListNumber => Style::new("ListNumber", StyleType::Paragraph).name("List Number"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rgb;

    #[test]
    fn packed_output_is_a_zip_archive() {
        let mut doc = Document::new();
        doc.add_paragraph("hello");

        let bytes = render_docx(&doc).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn style_keys_are_deduplicated() {
        let mut doc = Document::new();
        doc.add_heading("One", 1).unwrap();
        doc.add_heading("Two", 1).unwrap();
        doc.add_heading("Three", 2).unwrap();
        doc.add_paragraph("body").color(Rgb(1, 2, 3));

        let keys: BTreeSet<_> = doc.blocks().iter().filter_map(|b| style_key(b.kind)).collect();
        assert_eq!(
            keys.into_iter().collect::<Vec<_>>(),
            vec![StyleKey::Heading(1), StyleKey::Heading(2)]
        );
    }
}
