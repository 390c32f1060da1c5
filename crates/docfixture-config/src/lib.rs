//! Configuration primitives and loader for the docfixture generator.
//!
//! Settings are resolved with the precedence
//! override flag → working directory → git root → built-in defaults.
//! Each layer is parsed from `.docfixture.toml` and merged field by field,
//! then normalised into typed settings so the generator never touches raw TOML.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".docfixture.toml";

/// Complete configuration resolved from defaults and on-disk overrides.
#[derive(Clone, Debug)]
pub struct Config {
    pub generate: GenerateSettings,
    pub files: FileSettings,
    pub sources: ConfigSources,
}

impl Config {
    /// Loads configuration using the precedence rules and returns typed settings.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let override_path = options
            .override_path
            .map(|path| make_absolute(&path, &working_dir));

        if let Some(path) = &override_path {
            if !path.exists() {
                return Err(ConfigError::OverrideNotFound { path: path.clone() });
            }
        }

        let default_source = ConfigSource::default(working_dir.clone());
        let mut merged = PartialConfig::default();
        merged.merge(defaults_layer(default_source.clone()));

        let mut source_layers = vec![default_source];

        let git_config_path = find_git_root(&working_dir).map(|root| root.join(CONFIG_FILE_NAME));
        let local_config_path = working_dir.join(CONFIG_FILE_NAME);

        if let Some(path) = git_config_path.as_ref() {
            if path.exists() && Some(path) != override_path.as_ref() && path != &local_config_path {
                let source = ConfigSource::for_file(ConfigSourceKind::GitRoot, path.clone());
                merged.merge(load_layer(path, source.clone())?);
                source_layers.push(source);
            }
        }

        if local_config_path.exists() && Some(&local_config_path) != override_path.as_ref() {
            let source = ConfigSource::for_file(ConfigSourceKind::Local, local_config_path.clone());
            merged.merge(load_layer(&local_config_path, source.clone())?);
            source_layers.push(source);
        }

        if let Some(path) = override_path {
            let source = ConfigSource::for_file(ConfigSourceKind::Override, path.clone());
            merged.merge(load_layer(&path, source.clone())?);
            source_layers.push(source);
        }

        let resolved = merged.finalize().map_err(ConfigError::Validation)?;
        Ok(Config {
            generate: resolved.generate,
            files: resolved.files,
            sources: ConfigSources {
                working_directory: working_dir,
                layers: source_layers,
            },
        })
    }

    /// Full output path for `kind` under the configured output directory.
    pub fn output_path(&self, kind: FixtureKind) -> PathBuf {
        self.generate.output_dir.join(self.files.file_name(kind))
    }
}

/// Settings that govern the generate command.
#[derive(Clone, Debug)]
pub struct GenerateSettings {
    pub output_dir: PathBuf,
    pub fixtures: Vec<FixtureKind>,
    pub overwrite: bool,
}

/// Output file names, one per fixture.
#[derive(Clone, Debug)]
pub struct FileSettings {
    names: HashMap<FixtureKind, String>,
}

impl FileSettings {
    pub fn file_name(&self, kind: FixtureKind) -> &str {
        self.names
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_file_name())
    }
}

/// Every fixture the generator knows how to produce.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum FixtureKind {
    Rich,
    Simple,
    Pdf,
}

impl FixtureKind {
    pub const ALL: &'static [FixtureKind] =
        &[FixtureKind::Rich, FixtureKind::Simple, FixtureKind::Pdf];

    /// Fixtures produced when nothing narrows the selection.
    pub const DEFAULT_SET: &'static [FixtureKind] = &[FixtureKind::Rich, FixtureKind::Simple];

    pub fn as_str(self) -> &'static str {
        match self {
            FixtureKind::Rich => "rich",
            FixtureKind::Simple => "simple",
            FixtureKind::Pdf => "pdf",
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            FixtureKind::Rich => "test-document.docx",
            FixtureKind::Simple => "simple-test.docx",
            FixtureKind::Pdf => "test-cv.pdf",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FixtureKind::Rich => "Formatted DOCX with title, headings, bullet and numbered lists",
            FixtureKind::Simple => "Minimal DOCX with a title and three paragraphs",
            FixtureKind::Pdf => "Single-page PDF curriculum vitae",
        }
    }

    pub fn is_docx(self) -> bool {
        matches!(self, FixtureKind::Rich | FixtureKind::Simple)
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FixtureKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "rich" => Ok(FixtureKind::Rich),
            "simple" => Ok(FixtureKind::Simple),
            "pdf" => Ok(FixtureKind::Pdf),
            _ => Err(()),
        }
    }
}

/// Provenance information for resolved configuration.
#[derive(Clone, Debug)]
pub struct ConfigSources {
    pub working_directory: PathBuf,
    pub layers: Vec<ConfigSource>,
}

/// Specific layer of configuration (default/git/local/override).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigSource {
    pub kind: ConfigSourceKind,
    pub path: Option<PathBuf>,
    pub base_dir: PathBuf,
}

impl ConfigSource {
    fn default(base_dir: PathBuf) -> Self {
        ConfigSource {
            kind: ConfigSourceKind::Default,
            path: None,
            base_dir,
        }
    }

    fn for_file(kind: ConfigSourceKind, path: PathBuf) -> Self {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        ConfigSource {
            kind,
            path: Some(path),
            base_dir,
        }
    }

    fn describe(&self) -> String {
        match (&self.kind, &self.path) {
            (ConfigSourceKind::Default, _) => "built-in defaults".to_owned(),
            (kind, Some(path)) => format!("{} at {}", kind, path.display()),
            (kind, None) => kind.to_string(),
        }
    }
}

/// Kinds of configuration sources, ordered from lowest to highest precedence.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigSourceKind {
    Default,
    GitRoot,
    Local,
    Override,
}

impl fmt::Display for ConfigSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigSourceKind::Default => "defaults",
            ConfigSourceKind::GitRoot => "git-root config",
            ConfigSourceKind::Local => "local config",
            ConfigSourceKind::Override => "override config",
        };
        f.write_str(label)
    }
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub override_path: Option<PathBuf>,
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_override_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("override config {path} not found")]
    OverrideNotFound { path: PathBuf },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("configuration validation failed:\n{0}")]
    Validation(ConfigValidationErrors),
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
            attempted: path,
            source,
        }),
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn make_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn load_layer(path: &Path, source: ConfigSource) -> Result<PartialConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.into(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.into(),
        source,
    })?;
    Ok(raw.into_partial(source))
}

fn defaults_layer(source: ConfigSource) -> PartialConfig {
    let generate = GeneratePartial {
        output_dir: Some(Located::new(PathBuf::from("."), source.clone())),
        fixtures: Some(Located::new(
            FixtureKind::DEFAULT_SET
                .iter()
                .map(|kind| kind.as_str().to_owned())
                .collect(),
            source.clone(),
        )),
        overwrite: Some(Located::new(true, source.clone())),
    };

    let files = FixtureKind::ALL
        .iter()
        .map(|kind| {
            (
                kind.as_str().to_owned(),
                Located::new(kind.default_file_name().to_owned(), source.clone()),
            )
        })
        .collect();

    PartialConfig {
        generate: Some(generate),
        files: Some(files),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

#[derive(Clone, Debug, Default)]
struct PartialConfig {
    generate: Option<GeneratePartial>,
    files: Option<HashMap<String, Located<String>>>,
}

impl PartialConfig {
    fn merge(&mut self, mut other: PartialConfig) {
        if let Some(other_generate) = other.generate.take() {
            match &mut self.generate {
                Some(generate) => generate.merge(other_generate),
                None => self.generate = Some(other_generate),
            }
        }

        if let Some(other_files) = other.files.take() {
            match &mut self.files {
                Some(files) => files.extend(other_files),
                None => self.files = Some(other_files),
            }
        }
    }

    fn finalize(self) -> Result<ResolvedConfig, ConfigValidationErrors> {
        let mut errors = Vec::new();

        let generate_partial = self.generate.unwrap_or_default();
        let output_dir_loc = generate_partial.output_dir.unwrap_or_else(|| {
            Located::new(PathBuf::from("."), ConfigSource::default(PathBuf::from(".")))
        });
        let output_dir = resolve_path(&output_dir_loc);

        let fixtures_loc = generate_partial.fixtures.unwrap_or_else(|| {
            Located::new(
                FixtureKind::DEFAULT_SET
                    .iter()
                    .map(|kind| kind.as_str().to_owned())
                    .collect(),
                ConfigSource::default(PathBuf::from(".")),
            )
        });
        let fixtures = parse_fixtures(fixtures_loc, &mut errors);

        let overwrite = generate_partial
            .overwrite
            .map(|located| located.value)
            .unwrap_or(true);

        let names = parse_file_names(self.files.unwrap_or_default(), &mut errors);

        if !errors.is_empty() {
            return Err(ConfigValidationErrors(errors));
        }

        Ok(ResolvedConfig {
            generate: GenerateSettings {
                output_dir,
                fixtures,
                overwrite,
            },
            files: FileSettings { names },
        })
    }
}

#[derive(Clone, Debug, Default)]
struct GeneratePartial {
    output_dir: Option<Located<PathBuf>>,
    fixtures: Option<Located<Vec<String>>>,
    overwrite: Option<Located<bool>>,
}

impl GeneratePartial {
    fn merge(&mut self, other: GeneratePartial) {
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
        if other.fixtures.is_some() {
            self.fixtures = other.fixtures;
        }
        if other.overwrite.is_some() {
            self.overwrite = other.overwrite;
        }
    }
}

#[derive(Clone, Debug)]
struct Located<T> {
    value: T,
    source: ConfigSource,
}

impl<T> Located<T> {
    fn new(value: T, source: ConfigSource) -> Self {
        Located { value, source }
    }
}

fn resolve_path(located: &Located<PathBuf>) -> PathBuf {
    let path = &located.value;
    if path.is_absolute() {
        path.clone()
    } else if path == Path::new(".") {
        located.source.base_dir.clone()
    } else {
        located.source.base_dir.join(path)
    }
}

fn parse_fixtures(
    located: Located<Vec<String>>,
    errors: &mut Vec<ConfigValidationError>,
) -> Vec<FixtureKind> {
    if located.value.is_empty() {
        errors.push(ConfigValidationError::new(
            Some(located.source.clone()),
            "generate.fixtures must name at least one fixture".into(),
        ));
        return Vec::new();
    }

    let mut kinds = Vec::new();
    for name in &located.value {
        match name.parse::<FixtureKind>() {
            Ok(kind) if kinds.contains(&kind) => errors.push(ConfigValidationError::new(
                Some(located.source.clone()),
                format!("generate.fixtures lists '{name}' more than once"),
            )),
            Ok(kind) => kinds.push(kind),
            Err(()) => errors.push(ConfigValidationError::new(
                Some(located.source.clone()),
                format!("generate.fixtures contains unknown fixture '{name}'"),
            )),
        }
    }
    kinds
}

fn parse_file_names(
    entries: HashMap<String, Located<String>>,
    errors: &mut Vec<ConfigValidationError>,
) -> HashMap<FixtureKind, String> {
    let mut names = HashMap::new();
    let mut keys: Vec<_> = entries.keys().cloned().collect();
    keys.sort();

    for key in keys {
        let located = &entries[&key];
        let Ok(kind) = key.parse::<FixtureKind>() else {
            errors.push(
                ConfigValidationError::new(
                    Some(located.source.clone()),
                    format!("unknown fixture '{key}'"),
                )
                .with_context("files"),
            );
            continue;
        };

        let value = located.value.trim();
        let is_bare_name = Path::new(value)
            .file_name()
            .is_some_and(|name| name == value);
        if value.is_empty() || !is_bare_name {
            errors.push(
                ConfigValidationError::new(
                    Some(located.source.clone()),
                    format!("'{}' is not a plain file name", located.value),
                )
                .with_context(format!("files.{key}")),
            );
            continue;
        }

        names.insert(kind, value.to_owned());
    }
    names
}

#[derive(Clone, Debug)]
struct ResolvedConfig {
    generate: GenerateSettings,
    files: FileSettings,
}

/// Container for validation failures, formatted as a bullet list.
#[derive(Debug)]
pub struct ConfigValidationErrors(pub Vec<ConfigValidationError>);

impl fmt::Display for ConfigValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "- {err}")?;
        }
        Ok(())
    }
}

/// Validation failure with optional provenance.
#[derive(Clone, Debug)]
pub struct ConfigValidationError {
    pub source: Option<ConfigSource>,
    pub message: String,
    pub context: Option<String>,
}

impl ConfigValidationError {
    fn new(source: Option<ConfigSource>, message: String) -> Self {
        ConfigValidationError {
            source,
            message,
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {}", context, self.message)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(source) = &self.source {
            write!(f, " ({})", source.describe())?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    generate: Option<RawGenerate>,
    #[serde(default)]
    files: Option<HashMap<String, String>>,
}

impl RawConfig {
    fn into_partial(self, source: ConfigSource) -> PartialConfig {
        PartialConfig {
            generate: self
                .generate
                .map(|generate| generate.into_partial(source.clone())),
            files: self.files.map(|files| {
                files
                    .into_iter()
                    .map(|(key, value)| (key, Located::new(value, source.clone())))
                    .collect()
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGenerate {
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    fixtures: Option<Vec<String>>,
    #[serde(default)]
    overwrite: Option<bool>,
}

impl RawGenerate {
    fn into_partial(self, source: ConfigSource) -> GeneratePartial {
        GeneratePartial {
            output_dir: self
                .output_dir
                .map(|value| Located::new(value, source.clone())),
            fixtures: self
                .fixtures
                .map(|value| Located::new(value, source.clone())),
            overwrite: self.overwrite.map(|value| Located::new(value, source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_names_round_trip_through_from_str() {
        for kind in FixtureKind::ALL {
            assert_eq!(kind.as_str().parse::<FixtureKind>(), Ok(*kind));
        }
        assert!("doc".parse::<FixtureKind>().is_err());
    }

    #[test]
    fn bare_file_name_check_rejects_paths() {
        let source = ConfigSource::default(PathBuf::from("."));
        let mut entries = HashMap::new();
        entries.insert(
            "rich".to_owned(),
            Located::new("nested/doc.docx".to_owned(), source.clone()),
        );
        entries.insert(
            "simple".to_owned(),
            Located::new("plain.docx".to_owned(), source),
        );

        let mut errors = Vec::new();
        let names = parse_file_names(entries, &mut errors);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("files.rich:"));
        assert_eq!(names.get(&FixtureKind::Simple).map(String::as_str), Some("plain.docx"));
    }
}
