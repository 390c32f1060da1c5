//! Shared test harness utilities for docfixture crates.

use std::io::{Cursor, Read};
use std::path::Path;

use docfixture_config::{Config, LoadOptions};

/// Configuration resolved as if the generator ran inside `dir`.
pub fn test_config(dir: &Path) -> Config {
    Config::load(LoadOptions::default().with_working_dir(dir)).expect("load test config")
}

/// Reads a packaged `.docx` back and returns its JSON description, which
/// carries paragraph text, style ids and numbering references.
pub fn docx_json(bytes: &[u8]) -> String {
    docx_rs::read_docx(bytes)
        .expect("generated docx should be readable")
        .json()
}

/// Raw `word/document.xml` from a packaged `.docx`.
pub fn document_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("docx is a zip archive");
    let mut part = archive
        .by_name("word/document.xml")
        .expect("document part present");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("document part is utf8");
    xml
}

/// The `<w:p>` element whose text contains `needle`.
pub fn paragraph_with<'a>(xml: &'a str, needle: &str) -> &'a str {
    let at = xml
        .find(needle)
        .unwrap_or_else(|| panic!("no paragraph contains {needle:?}"));
    let start = [xml[..at].rfind("<w:p>"), xml[..at].rfind("<w:p ")]
        .into_iter()
        .flatten()
        .max()
        .expect("paragraph start");
    let end = at + xml[at..].find("</w:p>").expect("paragraph end");
    &xml[start..end]
}
