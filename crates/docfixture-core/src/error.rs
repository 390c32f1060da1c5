use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::render::RenderError;
use crate::FixtureKind;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("heading level {0} is out of range (expected 0..=9)")]
    HeadingLevel(u8),

    #[error("failed to render {kind} fixture: {source}")]
    Render {
        kind: FixtureKind,
        source: RenderError,
    },

    #[error("failed to write {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

pub type GenerateResult<T> = Result<T, GenerateError>;
