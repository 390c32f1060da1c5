//! In-memory document built by sequential appends.
//!
//! The model mirrors what a word-processing authoring API exposes for simple
//! documents: a flat list of paragraphs, each with a paragraph style, an
//! alignment and a single formatted run of text.

use crate::error::{GenerateError, GenerateResult};

/// Highest heading level a word-processing document supports.
pub const MAX_HEADING_LEVEL: u8 = 9;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// 24-bit text colour.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Upper-case `RRGGBB`, the form WordprocessingML stores.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockKind {
    Title,
    Heading(u8),
    Paragraph,
    ListBullet,
    ListNumber,
}

impl BlockKind {
    /// Paragraph style id used in the rendered document.
    pub fn style_id(self) -> Option<String> {
        match self {
            BlockKind::Title => Some("Title".to_owned()),
            BlockKind::Heading(level) => Some(format!("Heading{level}")),
            BlockKind::Paragraph => None,
            BlockKind::ListBullet => Some("ListBullet".to_owned()),
            BlockKind::ListNumber => Some("ListNumber".to_owned()),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub text: String,
    pub alignment: Alignment,
    pub format: RunFormat,
}

impl Block {
    fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Block {
            kind,
            text: text.into(),
            alignment: Alignment::default(),
            format: RunFormat::default(),
        }
    }

    pub fn align(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = alignment;
        self
    }

    pub fn bold(&mut self) -> &mut Self {
        self.format.bold = true;
        self
    }

    pub fn italic(&mut self) -> &mut Self {
        self.format.italic = true;
        self
    }

    pub fn color(&mut self, color: Rgb) -> &mut Self {
        self.format.color = Some(color);
        self
    }

    /// Text split on hard line breaks; each segment after the first follows a break.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a heading. Level 0 is the document title.
    pub fn add_heading(
        &mut self,
        text: impl Into<String>,
        level: u8,
    ) -> GenerateResult<&mut Block> {
        let kind = match level {
            0 => BlockKind::Title,
            1..=MAX_HEADING_LEVEL => BlockKind::Heading(level),
            _ => return Err(GenerateError::HeadingLevel(level)),
        };
        Ok(self.push(Block::new(kind, text)))
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Block {
        self.push(Block::new(BlockKind::Paragraph, text))
    }

    pub fn add_bullet(&mut self, text: impl Into<String>) -> &mut Block {
        self.push(Block::new(BlockKind::ListBullet, text))
    }

    pub fn add_numbered(&mut self, text: impl Into<String>) -> &mut Block {
        self.push(Block::new(BlockKind::ListNumber, text))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn uses(&self, kind: BlockKind) -> bool {
        self.blocks.iter().any(|block| block.kind == kind)
    }

    fn push(&mut self, block: Block) -> &mut Block {
        self.blocks.push(block);
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }
}
