//! Literal content of every fixture.

use crate::error::GenerateResult;
use crate::model::{Alignment, Document, Rgb};
use crate::render::pdf::TextPage;
use crate::FixtureKind;

const FEATURES: &[&str] = &[
    "Document Upload: Support for multiple file formats including PDF, TXT, MD, DOC, and DOCX",
    "RAG System: Retrieval-Augmented Generation for intelligent responses",
    "Vector Search: Using pgvector for semantic similarity search",
    "OpenAI Integration: Text embeddings and GPT-4o-mini for conversations",
    "Tutor Management: Create and manage AI tutors with custom knowledge bases",
];

const TECHNOLOGIES: &[&str] = &[
    "Next.js 15 for the frontend framework",
    "Supabase for backend and database",
    "LangChain for document processing",
    "OpenAI for embeddings and chat completions",
    "TypeScript for type safety",
];

const PIPELINE_STEPS: &[&str] = &[
    "File validation and type detection",
    "Text extraction using appropriate parser (WebPDFLoader for PDF, DocxLoader for Word documents)",
    "Text chunking with RecursiveCharacterTextSplitter (1000 characters, 120 overlap)",
    "Embedding generation using OpenAI text-embedding-3-small model",
    "Storage in Supabase with pgvector for similarity search",
];

const SIMPLE_PARAGRAPHS: &[&str] = &[
    "This is a simple test document with minimal content.",
    "It contains only a few paragraphs to test basic DOCX parsing.",
    "The AI Knowledge Companion should be able to extract this text correctly.",
];

const FOOTER_GREY: Rgb = Rgb(128, 128, 128);

/// Content of one fixture, ready for its renderer.
#[derive(Clone, Debug)]
pub enum FixtureContent {
    Docx(Document),
    Pdf(TextPage),
}

pub fn build(kind: FixtureKind) -> GenerateResult<FixtureContent> {
    Ok(match kind {
        FixtureKind::Rich => FixtureContent::Docx(rich_document()?),
        FixtureKind::Simple => FixtureContent::Docx(simple_document()?),
        FixtureKind::Pdf => FixtureContent::Pdf(cv_page()),
    })
}

/// Formatted document covering title, headings, both list styles and run formatting.
pub fn rich_document() -> GenerateResult<Document> {
    let mut doc = Document::new();

    doc.add_heading("AI Knowledge Companion - Test Document", 0)?
        .align(Alignment::Center);

    doc.add_paragraph("This is a test document for the AI Knowledge Companion application.")
        .align(Alignment::Center)
        .italic();

    doc.add_heading("Introduction", 1)?;
    doc.add_paragraph(
        "The AI Knowledge Companion is a sophisticated platform that combines artificial \
         intelligence with knowledge management. This document serves as a test file for \
         validating the DOCX parsing capabilities using LangChain's DocxLoader.",
    );

    doc.add_heading("Features", 1)?;
    for feature in FEATURES {
        doc.add_bullet(*feature);
    }

    doc.add_heading("Technical Details", 1)?;
    doc.add_paragraph("The system uses several key technologies:");
    // Items carry their own "n. " prefix on top of list numbering.
    for (i, tech) in TECHNOLOGIES.iter().enumerate() {
        doc.add_numbered(format!("{}. {}", i + 1, tech));
    }

    doc.add_heading("Document Processing Pipeline", 1)?;
    doc.add_paragraph("When a document is uploaded, it goes through the following steps:");
    for step in PIPELINE_STEPS {
        doc.add_bullet(*step);
    }

    doc.add_heading("Conclusion", 1)?;
    doc.add_paragraph(
        "This test document contains enough varied content to properly test the DOCX parsing, \
         chunking, and embedding generation process. The content includes headers, lists, \
         technical terms, and multiple paragraphs to ensure comprehensive testing.",
    );

    doc.add_paragraph("\nEnd of Test Document")
        .align(Alignment::Center)
        .bold()
        .color(FOOTER_GREY);

    Ok(doc)
}

pub fn simple_document() -> GenerateResult<Document> {
    let mut doc = Document::new();
    doc.add_heading("Simple Test Document", 0)?;
    for paragraph in SIMPLE_PARAGRAPHS {
        doc.add_paragraph(*paragraph);
    }
    Ok(doc)
}

/// Single-page CV. Section labels are preceded by a wider gap.
pub fn cv_page() -> TextPage {
    let mut page = TextPage::new();
    page.line("Alex Rivera - Full Stack Developer")
        .line("Email: alex.rivera@example.com")
        .line("Phone: +1 555 010 0199");

    page.section("EXPERIENCE:")
        .line("- Senior Full Stack Developer at TechCorp (2020-2024)")
        .line("- Frontend Developer at WebAgency (2018-2020)")
        .line("- Junior Developer at StartupXYZ (2016-2018)");

    page.section("SKILLS:")
        .line("- JavaScript, TypeScript, React, Next.js")
        .line("- Node.js, Express, PostgreSQL")
        .line("- AWS, Docker, Kubernetes")
        .line("- Git, CI/CD, Agile methodologies");

    page.section("EDUCATION:")
        .line("- Computer Science Degree, State University (2012-2016)")
        .line("- Full Stack Bootcamp, TechAcademy (2016)");

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn rich_document_section_order() {
        let doc = rich_document().unwrap();
        let headings: Vec<_> = doc
            .blocks()
            .iter()
            .filter(|block| matches!(block.kind, BlockKind::Heading(1)))
            .map(|block| block.text.as_str())
            .collect();

        assert_eq!(
            headings,
            vec![
                "Introduction",
                "Features",
                "Technical Details",
                "Document Processing Pipeline",
                "Conclusion"
            ]
        );
        assert_eq!(doc.blocks()[0].kind, BlockKind::Title);
        assert_eq!(doc.len(), 27);
    }

    #[test]
    fn numbered_items_keep_literal_prefix() {
        let doc = rich_document().unwrap();
        let numbered: Vec<_> = doc
            .blocks()
            .iter()
            .filter(|block| block.kind == BlockKind::ListNumber)
            .map(|block| block.text.as_str())
            .collect();

        assert_eq!(numbered.len(), 5);
        assert_eq!(numbered[0], "1. Next.js 15 for the frontend framework");
        assert_eq!(numbered[4], "5. TypeScript for type safety");
    }

    #[test]
    fn subtitle_and_footer_formatting() {
        let doc = rich_document().unwrap();
        let subtitle = &doc.blocks()[1];
        assert_eq!(subtitle.alignment, Alignment::Center);
        assert!(subtitle.format.italic);
        assert!(!subtitle.format.bold);

        let footer = doc.blocks().last().unwrap();
        assert_eq!(footer.text, "\nEnd of Test Document");
        assert_eq!(footer.alignment, Alignment::Center);
        assert!(footer.format.bold);
        assert_eq!(footer.format.color, Some(FOOTER_GREY));
    }

    #[test]
    fn simple_document_is_title_plus_three_paragraphs() {
        let doc = simple_document().unwrap();
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.blocks()[0].text, "Simple Test Document");
        assert!(doc.blocks()[1..]
            .iter()
            .all(|block| block.kind == BlockKind::Paragraph));
        assert!(!doc.uses(BlockKind::ListBullet));
        assert_eq!(
            doc.blocks()[2].text,
            "It contains only a few paragraphs to test basic DOCX parsing."
        );
    }
}
