//! Sample-document generation for exercising document-ingestion pipelines.
//!
//! A fixture is described as a [`Document`] built by sequential appends,
//! rendered to DOCX (or PDF for the curriculum-vitae sample) and saved under a
//! fixed file name by the [`Generator`].

pub mod error;
pub mod fixtures;
pub mod generate;
pub mod model;
pub mod render;

pub use docfixture_config::{Config, FixtureKind};
pub use error::{GenerateError, GenerateResult};
pub use generate::{
    render_fixture, FixtureStatus, GenerateOptions, GenerateReport, GeneratedFixture, Generator,
};
pub use model::{Alignment, Block, BlockKind, Document, Rgb, RunFormat};
