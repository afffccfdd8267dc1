//! Command-line interface for realitycheck.

use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::{Config, FileSet};
use crate::error::ensure_dir;
use crate::extract::{self, DiscoveryOutput};
use crate::patterns::PatternLibrary;
use crate::reality;
use crate::report::{self, ReportMode};
use crate::score;
use crate::validate::{self, ProjectValidator, ValidationResult};
use crate::walker::{progress_bar, Walker};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;

/// Refactoring reality checks for frontend code bases.
///
/// Realitycheck extracts the API contracts, data models and interactive
/// elements a refactoring must preserve, and flags code that is not
/// production-ready: mock data, placeholder implementations and missing
/// real-API integration.
#[derive(Parser)]
#[command(name = "realitycheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args)]
pub struct GlobalArgs {
    /// Path to config YAML file (default: auto-discover)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide progress bars and status lines
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract API contracts, data models and component props
    Extract(ExtractArgs),
    /// Extract interface, endpoint and React component definitions
    Definitions(DefinitionsArgs),
    /// Discover interactive UI elements
    Discover(DiscoverArgs),
    /// Scan for mock data, placeholders and missing integration
    #[command(subcommand)]
    Reality(RealityCommand),
    /// Validate every file of a refactored project
    Validate(ValidateArgs),
    /// Check a design document against the source it describes
    SpecCheck(SpecCheckArgs),
    /// Compare declarations between an original and a refactored tree
    Baseline(BaselineArgs),
    /// Create a realitycheck config from a template
    Init(InitArgs),
}

/// Arguments for the extract command.
#[derive(Parser)]
pub struct ExtractArgs {
    /// Source directory to extract from
    pub source: PathBuf,

    /// Markdown report file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also save the raw extraction as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Report to generate
    #[arg(short, long, value_enum, default_value = "combined")]
    pub mode: ReportMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DefinitionsFormat {
    Markdown,
    Json,
}

/// Arguments for the definitions command.
#[derive(Parser)]
pub struct DefinitionsArgs {
    /// Source directory to extract from
    pub source: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: DefinitionsFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiscoverFormat {
    Json,
    Report,
}

/// Arguments for the discover command.
#[derive(Parser)]
pub struct DiscoverArgs {
    /// Source directory to scan
    pub source: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "json")]
    pub format: DiscoverFormat,
}

#[derive(Subcommand)]
pub enum RealityCommand {
    /// List every mock or placeholder marker
    Scan(RealityArgs),
    /// Compute the real-API integration score
    Integration(RealityArgs),
    /// Full markdown report: scan, integration and recommendations
    Report(RealityArgs),
}

/// Output format of the reality commands. `pretty` means markdown for `report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RealityFormat {
    Pretty,
    Json,
}

/// Arguments shared by the reality subcommands.
#[derive(Parser)]
pub struct RealityArgs {
    /// Project directory to check
    pub path: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit non-zero on violations or an integration score below threshold
    #[arg(long)]
    pub fail_on_error: bool,

    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: RealityFormat,
}

/// Arguments for the validate command.
#[derive(Parser)]
pub struct ValidateArgs {
    /// Project directory to validate
    pub path: PathBuf,

    /// Markdown report file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit non-zero when any error-severity result exists
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Arguments for the spec-check command.
#[derive(Parser)]
pub struct SpecCheckArgs {
    /// Design document to check
    pub spec: PathBuf,

    /// Source directory the document describes
    pub source: PathBuf,

    /// Exit non-zero when the check fails with an error
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Arguments for the baseline command.
#[derive(Parser)]
pub struct BaselineArgs {
    /// Original source directory
    #[arg(long)]
    pub original: PathBuf,

    /// Refactored source directory
    #[arg(long)]
    pub refactored: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit non-zero when original declarations are missing
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "realitycheck.yaml")]
    pub output: PathBuf,

    /// Template to use
    #[arg(short, long, default_value = "default")]
    pub template: String,

    /// List available templates
    #[arg(short, long)]
    pub list: bool,
}

/// Available config templates.
struct Template {
    name: &'static str,
    description: &'static str,
    content: &'static str,
}

/// All available templates.
static TEMPLATES: &[Template] = &[
    Template {
        name: "default",
        description: "Built-in extension sets, node_modules excluded, threshold 80",
        content: include_str!("templates/default.yaml"),
    },
    Template {
        name: "strict",
        description: "Threshold 90, test fixtures excluded, extra mock and placeholder markers",
        content: include_str!("templates/strict.yaml"),
    },
];

/// Loaded config and compiled patterns for one run.
struct Session {
    config: Config,
    patterns: PatternLibrary,
    quiet: bool,
}

impl Session {
    /// Check `root`, then load the config for it and compile the pattern library.
    fn open(root: &Path, global: &GlobalArgs) -> anyhow::Result<Self> {
        ensure_dir(root)?;
        let (config, path) = Config::load(global.config.as_deref(), root)?;
        match &path {
            Some(p) => tracing::debug!(config = %p.display(), "loaded config"),
            None => tracing::debug!("no config file found, using defaults"),
        }
        let patterns = PatternLibrary::new(&config)?;
        Ok(Self {
            config,
            patterns,
            quiet: global.quiet,
        })
    }

    fn walker(&self, set: FileSet, message: &str) -> anyhow::Result<Walker> {
        Ok(self
            .config
            .walker(set)?
            .with_progress(progress_bar(message, self.quiet)))
    }

    /// Status line for a report written to a file.
    fn saved(&self, path: &Path) {
        if !self.quiet {
            println!("✅ Report saved: {}", path.display());
        }
    }
}

/// Colors only make sense on a terminal.
fn plain_when_writing(output: Option<&Path>) {
    if output.is_some() {
        colored::control::set_override(false);
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Run the extract command.
pub fn run_extract(args: &ExtractArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.source, global)?;
    let walker = session.walker(FileSet::Source, "extracting contracts")?;
    let data = extract::extract_contracts(&args.source, &walker, &session.patterns.contracts)?;

    report::write_output(args.output.as_deref(), &report::contracts::render(&data, args.mode))?;
    if let Some(path) = &args.output {
        session.saved(path);
    }

    if let Some(json_path) = &args.json {
        report::write_output(Some(json_path.as_path()), &report::to_json(&data)?)?;
        if !session.quiet {
            println!("✅ JSON data saved: {}", json_path.display());
        }
    }

    if args.output.is_some() && !session.quiet {
        println!();
        println!("Extraction summary:");
        println!("   - API endpoints: {}", data.metadata.total_endpoints);
        println!("   - Interfaces: {}", data.metadata.total_interfaces);
        println!("   - Component props: {}", data.metadata.total_components);
    }
    Ok(EXIT_SUCCESS)
}

/// Run the definitions command.
pub fn run_definitions(args: &DefinitionsArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.source, global)?;
    let walker = session.walker(FileSet::Source, "extracting definitions")?;
    let defs = extract::extract_definitions(&args.source, &walker, &session.patterns.definitions)?;

    let content = match args.format {
        DefinitionsFormat::Markdown => report::definitions::render_definitions(&defs),
        DefinitionsFormat::Json => report::to_json(&defs)?,
    };
    report::write_output(args.output.as_deref(), &content)?;

    if let Some(path) = &args.output {
        session.saved(path);
        if !session.quiet {
            println!("   Interfaces: {}", defs.interfaces.len());
            println!("   API Endpoints: {}", defs.endpoints.len());
            println!("   Components: {}", defs.components.len());
        }
    }
    Ok(EXIT_SUCCESS)
}

/// Run the discover command.
pub fn run_discover(args: &DiscoverArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.source, global)?;
    let walker = session.walker(FileSet::Source, "discovering elements")?;
    let output: DiscoveryOutput = extract::discover_elements(&args.source, &walker, &session.patterns.elements)?;

    let content = match args.format {
        DiscoverFormat::Json => report::to_json(&output)?,
        DiscoverFormat::Report => report::elements::render_discovery(&output.analysis_report),
    };
    report::write_output(args.output.as_deref(), &content)?;
    if let Some(path) = &args.output {
        session.saved(path);
    }
    Ok(EXIT_SUCCESS)
}

/// Run a reality subcommand.
pub fn run_reality(command: &RealityCommand, global: &GlobalArgs) -> anyhow::Result<i32> {
    match command {
        RealityCommand::Scan(args) => run_reality_scan(args, global),
        RealityCommand::Integration(args) => run_reality_integration(args, global),
        RealityCommand::Report(args) => run_reality_report(args, global),
    }
}

fn run_reality_scan(args: &RealityArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.path, global)?;
    let walker = session.walker(FileSet::Reality, "scanning")?;
    let scan = reality::scan_project(&args.path, &walker, &session.patterns.reality)?;

    plain_when_writing(args.output.as_deref());
    let content = match args.format {
        RealityFormat::Pretty => report::reality::render_scan_pretty(&display(&args.path), &scan),
        RealityFormat::Json => report::to_json(&scan)?,
    };
    report::write_output(args.output.as_deref(), &content)?;
    if let Some(path) = &args.output {
        session.saved(path);
    }

    if args.fail_on_error && scan.has_errors() {
        return Ok(EXIT_FAILED);
    }
    Ok(EXIT_SUCCESS)
}

fn run_reality_integration(args: &RealityArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.path, global)?;
    let walker = session.walker(FileSet::Reality, "checking integration")?;
    let stats = reality::validate_integration(&args.path, &walker, &session.patterns.reality)?;
    let verdict = score::calculate(&stats, session.config.integration_threshold());

    plain_when_writing(args.output.as_deref());
    let content = match args.format {
        RealityFormat::Pretty => {
            report::reality::render_integration_pretty(&display(&args.path), &stats, &verdict)
        }
        RealityFormat::Json => report::to_json(&serde_json::json!({
            "integration": stats,
            "verdict": verdict,
        }))?,
    };
    report::write_output(args.output.as_deref(), &content)?;
    if let Some(path) = &args.output {
        session.saved(path);
    }

    if args.fail_on_error && !verdict.passed {
        return Ok(EXIT_FAILED);
    }
    Ok(EXIT_SUCCESS)
}

fn run_reality_report(args: &RealityArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.path, global)?;
    let walker = session.walker(FileSet::Reality, "scanning")?;
    let scan = reality::scan_project(&args.path, &walker, &session.patterns.reality)?;
    let stats = reality::validate_integration(&args.path, &walker, &session.patterns.reality)?;
    let verdict = score::calculate(&stats, session.config.integration_threshold());

    let content = match args.format {
        RealityFormat::Pretty => report::reality::render_markdown(&scan, &stats, &verdict),
        RealityFormat::Json => report::to_json(&serde_json::json!({
            "scan": scan,
            "integration": stats,
            "verdict": verdict,
            "generated_at": Utc::now().to_rfc3339(),
        }))?,
    };
    report::write_output(args.output.as_deref(), &content)?;
    if let Some(path) = &args.output {
        session.saved(path);
    }

    if args.fail_on_error && (scan.has_errors() || !verdict.passed) {
        return Ok(EXIT_FAILED);
    }
    Ok(EXIT_SUCCESS)
}

/// Run the validate command.
pub fn run_validate(args: &ValidateArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.path, global)?;
    let walker = session.walker(FileSet::Validation, "validating")?;
    let project = ProjectValidator::new(&session.patterns.validation).validate_project(&args.path, &walker)?;

    report::write_output(args.output.as_deref(), &report::validation::render_markdown(&project))?;
    if let Some(path) = &args.output {
        session.saved(path);
        if !session.quiet {
            println!(
                "   Files: {}  Passed: {}  Failed: {}  Errors: {}",
                project.stats.total_files,
                project.stats.passed_validations,
                project.stats.failed_validations,
                project.stats.errors.len()
            );
        }
    }

    if args.fail_on_error && project.has_errors() {
        return Ok(EXIT_FAILED);
    }
    Ok(EXIT_SUCCESS)
}

fn exit_for(result: &ValidationResult, fail_on_error: bool) -> i32 {
    if fail_on_error && result.is_error() {
        EXIT_FAILED
    } else {
        EXIT_SUCCESS
    }
}

/// Run the spec-check command.
pub fn run_spec_check(args: &SpecCheckArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    let session = Session::open(&args.source, global)?;
    let walker = session.walker(FileSet::Source, "checking source")?;
    let result = validate::validate_spec_against_source(&args.spec, &args.source, &walker, &session.patterns);

    print!("{}", report::validation::render_result_pretty("spec-check", &result));
    Ok(exit_for(&result, args.fail_on_error))
}

/// Run the baseline command.
pub fn run_baseline(args: &BaselineArgs, global: &GlobalArgs) -> anyhow::Result<i32> {
    ensure_dir(&args.refactored)?;
    let session = Session::open(&args.original, global)?;
    let walker = session.walker(FileSet::Source, "comparing declarations")?;
    let result = validate::compare_trees(
        &args.original,
        &args.refactored,
        &walker,
        &session.patterns.validation,
    )?;

    plain_when_writing(args.output.as_deref());
    report::write_output(
        args.output.as_deref(),
        &report::validation::render_result_pretty("baseline", &result),
    )?;
    if let Some(path) = &args.output {
        session.saved(path);
    }
    Ok(exit_for(&result, args.fail_on_error))
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.list {
        return list_templates();
    }

    let template = match TEMPLATES.iter().find(|t| t.name == args.template) {
        Some(t) => t,
        None => {
            eprintln!("Error: unknown template {:?}", args.template);
            eprintln!("Run 'realitycheck init --list' to see available templates");
            return Ok(EXIT_FAILED);
        }
    };

    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_FAILED);
    }

    report::write_output(Some(args.output.as_path()), template.content)?;

    println!("Created {} from template '{}'", args.output.display(), template.name);
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    println!("  2. Run: realitycheck reality report . --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}

/// List available templates.
fn list_templates() -> anyhow::Result<i32> {
    println!("Available templates:");
    println!();

    for template in TEMPLATES {
        let name = if template.name == "default" {
            format!("{} (default)", template.name)
        } else {
            template.name.to_string()
        };
        println!("  {:<20} {}", name, template.description);
    }

    println!();
    println!("Usage:");
    println!("  realitycheck init --template <name>");

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_parse_and_validate() {
        for template in TEMPLATES {
            let config: Config = serde_yaml::from_str(template.content)
                .unwrap_or_else(|e| panic!("template {} does not parse: {}", template.name, e));
            crate::config::validate(&config)
                .unwrap_or_else(|e| panic!("template {} is invalid: {}", template.name, e));
            PatternLibrary::new(&config).unwrap();
        }
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::parse_from([
            "realitycheck",
            "--quiet",
            "extract",
            "src",
            "-m",
            "backend-apis",
            "--json",
            "out.json",
        ]);
        assert!(cli.global.quiet);
        match cli.command {
            Commands::Extract(args) => {
                assert_eq!(args.mode, ReportMode::BackendApis);
                assert_eq!(args.json, Some(PathBuf::from("out.json")));
                assert!(args.output.is_none());
            }
            _ => panic!("expected extract"),
        }

        let cli = Cli::parse_from(["realitycheck", "reality", "report", ".", "--fail-on-error"]);
        match cli.command {
            Commands::Reality(RealityCommand::Report(args)) => {
                assert!(args.fail_on_error);
                assert_eq!(args.format, RealityFormat::Pretty);
            }
            _ => panic!("expected reality report"),
        }
    }

    #[test]
    fn test_missing_source_is_error() {
        let args = ExtractArgs {
            source: PathBuf::from("/definitely/not/here"),
            output: None,
            json: None,
            mode: ReportMode::Combined,
        };
        let global = GlobalArgs {
            config: None,
            verbose: false,
            quiet: true,
        };
        assert!(run_extract(&args, &global).is_err());
    }
}
