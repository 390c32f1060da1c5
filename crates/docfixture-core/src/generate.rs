//! Build-then-save orchestration over the configured fixtures.

use std::path::PathBuf;

use docfixture_config::Config;
use docfixture_utils::atomic_write;
use tracing::{debug, info};

use crate::error::{GenerateError, GenerateResult};
use crate::fixtures::{self, FixtureContent};
use crate::render;
use crate::FixtureKind;

/// Per-invocation overrides layered on top of configuration.
#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    pub fixtures: Option<Vec<FixtureKind>>,
    pub output_dir: Option<PathBuf>,
    pub overwrite: Option<bool>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FixtureStatus {
    Created,
    /// Target existed and overwriting was disabled.
    Skipped,
}

#[derive(Clone, Debug)]
pub struct GeneratedFixture {
    pub kind: FixtureKind,
    pub path: PathBuf,
    pub status: FixtureStatus,
    pub bytes: usize,
}

#[derive(Clone, Debug, Default)]
pub struct GenerateReport {
    pub fixtures: Vec<GeneratedFixture>,
}

impl GenerateReport {
    pub fn created(&self) -> impl Iterator<Item = &GeneratedFixture> {
        self.fixtures
            .iter()
            .filter(|fixture| fixture.status == FixtureStatus::Created)
    }

    /// Whether any Word document was written in this run.
    pub fn created_docx(&self) -> bool {
        self.created().any(|fixture| fixture.kind.is_docx())
    }
}

/// Produces fixtures on disk.
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generates each selected fixture in order, stopping at the first failure.
    pub fn run(&self, options: GenerateOptions) -> GenerateResult<GenerateReport> {
        let kinds = options
            .fixtures
            .filter(|kinds| !kinds.is_empty())
            .unwrap_or_else(|| self.config.generate.fixtures.clone());
        let output_dir = options
            .output_dir
            .unwrap_or_else(|| self.config.generate.output_dir.clone());
        let overwrite = options.overwrite.unwrap_or(self.config.generate.overwrite);

        let mut report = GenerateReport::default();
        for kind in kinds {
            let path = output_dir.join(self.config.files.file_name(kind));
            report.fixtures.push(self.write(kind, path, overwrite)?);
        }
        Ok(report)
    }

    /// Generates every configured fixture.
    pub fn generate_all(&self) -> GenerateResult<GenerateReport> {
        self.run(GenerateOptions::default())
    }

    /// Generates one fixture at its configured path.
    pub fn generate(&self, kind: FixtureKind) -> GenerateResult<GeneratedFixture> {
        let path = self.config.output_path(kind);
        self.write(kind, path, self.config.generate.overwrite)
    }

    fn write(
        &self,
        kind: FixtureKind,
        path: PathBuf,
        overwrite: bool,
    ) -> GenerateResult<GeneratedFixture> {
        if !overwrite && path.exists() {
            info!(fixture = %kind, path = %path.display(), "keeping existing fixture");
            return Ok(GeneratedFixture {
                kind,
                path,
                status: FixtureStatus::Skipped,
                bytes: 0,
            });
        }

        let bytes = render_fixture(kind)?;
        atomic_write(&path, &bytes).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        info!(fixture = %kind, path = %path.display(), bytes = bytes.len(), "wrote fixture");

        Ok(GeneratedFixture {
            kind,
            path,
            status: FixtureStatus::Created,
            bytes: bytes.len(),
        })
    }
}

/// Builds and serializes `kind` without touching the filesystem.
pub fn render_fixture(kind: FixtureKind) -> GenerateResult<Vec<u8>> {
    let content = fixtures::build(kind)?;
    match &content {
        FixtureContent::Docx(doc) => debug!(fixture = %kind, blocks = doc.len(), "built document"),
        FixtureContent::Pdf(page) => {
            debug!(fixture = %kind, lines = page.lines().len(), "built page")
        }
    }
    render::render(&content).map_err(|source| GenerateError::Render { kind, source })
}
