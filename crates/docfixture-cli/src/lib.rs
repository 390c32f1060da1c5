use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use docfixture_config::{Config, FixtureKind, LoadOptions};
use docfixture_core::{FixtureStatus, GenerateOptions, GenerateReport, Generator};
use serde_json::json;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Entry point for CLI execution. Returns the desired exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut options = LoadOptions::default();
    if let Some(path) = cli.config {
        options = options.with_override_path(path);
    }
    let config = Config::load(options)?;
    tracing::debug!(layers = config.sources.layers.len(), "configuration loaded");

    match cli.command.unwrap_or_default() {
        Command::Generate(args) => handle_generate(config, args),
        Command::List(args) => handle_list(&config, args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_generate(config: Config, args: GenerateArgs) -> Result<i32> {
    let GenerateArgs {
        only,
        output_dir,
        no_clobber,
    } = args;

    let options = GenerateOptions {
        fixtures: selected_fixtures(only),
        output_dir,
        overwrite: no_clobber.then_some(false),
    };

    let working_dir = config.sources.working_directory.clone();
    let report = Generator::new(config).run(options)?;
    print_report(&report, &working_dir);
    Ok(0)
}

/// `--only` values in first-seen order, repeats dropped.
fn selected_fixtures(only: Vec<FixtureValue>) -> Option<Vec<FixtureKind>> {
    let mut kinds: Vec<FixtureKind> = Vec::new();
    for kind in only.into_iter().map(FixtureKind::from) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    (!kinds.is_empty()).then_some(kinds)
}

fn print_report(report: &GenerateReport, working_dir: &Path) {
    for fixture in &report.fixtures {
        let shown = display_path(&fixture.path, Some(working_dir));
        match fixture.status {
            FixtureStatus::Created => println!("✓ Created: {shown}"),
            FixtureStatus::Skipped => println!("- Skipped: {shown} (already exists)"),
        }
    }

    println!();
    if report.created().next().is_none() {
        println!("No test documents created; all targets already exist.");
        return;
    }
    println!("All test documents created successfully!");
    if report.created_docx() {
        println!();
        println!("Note: DOC format requires Microsoft Word or LibreOffice to convert.");
        println!("You can open the DOCX files and save them as .doc format if needed.");
    }
}

fn display_path(path: &Path, cwd: Option<&Path>) -> String {
    cwd.and_then(|cwd| path.strip_prefix(cwd).ok())
        .unwrap_or(path)
        .display()
        .to_string()
}

fn handle_list(config: &Config, args: ListArgs) -> Result<i32> {
    let enabled = &config.generate.fixtures;

    match args.format.unwrap_or(ListFormatValue::Plain) {
        ListFormatValue::Plain => {
            for kind in FixtureKind::ALL {
                let marker = if enabled.contains(kind) { '*' } else { ' ' };
                println!(
                    "{marker} {:<7} {:<20} {}",
                    kind.as_str(),
                    config.files.file_name(*kind),
                    kind.description()
                );
            }
        }
        ListFormatValue::Json => {
            let fixtures: Vec<_> = FixtureKind::ALL
                .iter()
                .map(|kind| {
                    json!({
                        "name": kind.as_str(),
                        "file": config.files.file_name(*kind),
                        "path": config.output_path(*kind).display().to_string(),
                        "description": kind.description(),
                        "enabled": enabled.contains(kind),
                    })
                })
                .collect();
            let rendered = serde_json::to_string_pretty(&json!({ "fixtures": fixtures }))?;
            println!("{rendered}");
        }
    }
    Ok(0)
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate sample documents for document-ingestion tests",
    propagate_version = true
)]
struct Cli {
    /// Explicit configuration file, applied over discovered ones
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write fixture documents to disk (default)
    Generate(GenerateArgs),
    /// Show the available fixtures
    List(ListArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Generate(GenerateArgs::default())
    }
}

#[derive(Args, Default)]
struct GenerateArgs {
    /// Generate only the named fixture (repeatable)
    #[arg(long = "only", value_name = "FIXTURE", value_enum, action = ArgAction::Append)]
    only: Vec<FixtureValue>,
    /// Directory to write fixtures into
    #[arg(long = "output-dir", value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Keep fixtures that already exist
    #[arg(long = "no-clobber")]
    no_clobber: bool,
}

#[derive(Args)]
struct ListArgs {
    /// Output format
    #[arg(long, value_enum)]
    format: Option<ListFormatValue>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FixtureValue {
    Rich,
    Simple,
    Pdf,
}

impl From<FixtureValue> for FixtureKind {
    fn from(value: FixtureValue) -> Self {
        match value {
            FixtureValue::Rich => FixtureKind::Rich,
            FixtureValue::Simple => FixtureKind::Simple,
            FixtureValue::Pdf => FixtureKind::Pdf,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ListFormatValue {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_defaults_to_generate() {
        let cli = Cli::try_parse_from(["docfixture"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Command::Generate(_)));
    }

    #[test]
    fn only_flag_accumulates() {
        let cli = Cli::try_parse_from(["docfixture", "generate", "--only", "pdf", "--only", "rich"])
            .unwrap();
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(
            selected_fixtures(args.only),
            Some(vec![FixtureKind::Pdf, FixtureKind::Rich])
        );
    }

    #[test]
    fn repeated_only_values_are_collapsed() {
        let cli = Cli::try_parse_from([
            "docfixture", "generate", "--only", "rich", "--only", "pdf", "--only", "rich",
        ])
        .unwrap();
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(
            selected_fixtures(args.only),
            Some(vec![FixtureKind::Rich, FixtureKind::Pdf])
        );
        assert_eq!(selected_fixtures(Vec::new()), None);
    }

    #[test]
    fn display_path_is_relative_to_cwd() {
        let cwd = Path::new("/work");
        assert_eq!(
            display_path(Path::new("/work/simple-test.docx"), Some(cwd)),
            "simple-test.docx"
        );
        assert_eq!(display_path(Path::new("/elsewhere/a.pdf"), Some(cwd)), "/elsewhere/a.pdf");
    }
}
