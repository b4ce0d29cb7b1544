// crates/degree-audit-cli/src/main.rs
// ============================================================================
// Module: Degree Audit CLI Entry Point
// Description: Command dispatcher for audit reports and data validation.
// Purpose: Load config, catalog, and user state from disk and print reports.
// Dependencies: clap, degree-audit-config, degree-audit-core, serde_json, thiserror, tracing
// ============================================================================

//! ## Overview
//! The `degree-audit` binary is the only component that performs I/O. It
//! loads the TOML config, the requirement catalog, the exam credit table,
//! and the user state, then runs the fulfillment engine. Reports go to
//! stdout; logs and errors go to stderr.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use degree_audit_config::AuditConfig;
use degree_audit_config::ConfigError;
use degree_audit_config::config_toml_example;
use degree_audit_core::FulfillmentEngine;
use degree_audit_core::FulfillmentReport;
use degree_audit_core::FulfillmentStatistics;
use degree_audit_core::GroupKind;
use degree_audit_core::RequirementCatalog;
use degree_audit_core::SourceType;
use degree_audit_core::UserState;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Env var holding a log filter directive.
const LOG_ENV: &str = "DEGREE_AUDIT_LOG";
/// Log filter used when neither env nor config provide one.
const DEFAULT_LOG_FILTER: &str = "degree_audit=info";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "degree-audit", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a fulfillment report for a user state.
    Report(ReportCommand),
    /// Requirement catalog utilities.
    Catalog {
        /// Selected catalog subcommand.
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Catalog subcommands.
#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Build the catalog and print per-source requirement counts.
    Check(ConfigArgs),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a degree audit configuration file.
    Validate(ConfigArgs),
    /// Print an annotated example configuration.
    Example,
}

/// Config location shared by subcommands.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Optional config file path (defaults to degree-audit.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for report generation.
#[derive(Args, Debug)]
struct ReportCommand {
    /// Config location.
    #[command(flatten)]
    config: ConfigArgs,
    /// Path to the user state JSON file.
    #[arg(long, value_name = "PATH")]
    user: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,
}

/// Report output formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ReportFormat {
    /// Pretty-printed JSON report.
    Json,
    /// One line per requirement.
    Text,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Report(command) => command_report(&command),
        Commands::Catalog {
            command,
        } => match command {
            CatalogCommand::Check(args) => command_catalog_check(&args),
        },
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(args) => command_config_validate(&args),
            ConfigCommand::Example => command_config_example(),
        },
    }
}

// ============================================================================
// SECTION: Report Command
// ============================================================================

/// Executes the `report` command.
fn command_report(command: &ReportCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let catalog = load_catalog(&config)?;
    let exams = config
        .load_exam_table()
        .map_err(|err| CliError::new(format!("failed to load exam table: {err}")))?;
    let user = load_user_state(&command.user)?;

    let engine = FulfillmentEngine::new(&catalog, &exams, config.engine_options());
    let outcome = engine.compute(&user);
    info!(
        requirements = outcome.report.requirement_count(),
        courses = outcome.courses.len(),
        double_counted = outcome.report.double_counted_course_unique_ids.len(),
        "report computed"
    );

    match command.format {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.report)
                .map_err(|err| CliError::new(format!("failed to serialize report: {err}")))?;
            write_stdout(&json)?;
        }
        ReportFormat::Text => {
            for line in render_text(&outcome.report) {
                write_stdout(&line)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Reads and parses the user state file.
fn load_user_state(path: &Path) -> CliResult<UserState> {
    degree_audit_config::load_user_state(path).map_err(|err| match err {
        ConfigError::Io(_) => CliError::new(format!("failed to read user state: {err}")),
        ConfigError::Parse(_) | ConfigError::Invalid(_) | ConfigError::Catalog(_) => {
            CliError::new(format!("invalid user state {}: {err}", path.display()))
        }
    })
}

/// Renders a report as indented text lines.
fn render_text(report: &FulfillmentReport) -> Vec<String> {
    let mut lines = Vec::new();
    for group in &report.groups {
        lines.push(format!("{} {}", group_label(group.group), group.specific));
        for entry in &group.requirements {
            let fulfillment = &entry.fulfillment;
            let mark = if fulfillment.safe.is_fulfilled { "x" } else { " " };
            lines.push(format!(
                "  [{mark}] {}  safe {}  dangerous {}",
                entry.requirement.name,
                progress(&fulfillment.safe),
                progress(&fulfillment.dangerous),
            ));
        }
    }
    if !report.double_counted_course_unique_ids.is_empty() {
        let ids: Vec<String> =
            report.double_counted_course_unique_ids.iter().map(ToString::to_string).collect();
        lines.push(format!("double counted: {}", ids.join(", ")));
    }
    lines
}

/// Formats capped progress as `fulfilled/required`.
fn progress(statistics: &FulfillmentStatistics) -> String {
    format!("{}/{}", statistics.display_count(), statistics.min_count_required)
}

/// Returns the heading for a report group.
const fn group_label(kind: GroupKind) -> &'static str {
    match kind {
        GroupKind::College => "College",
        GroupKind::Major => "Major",
        GroupKind::Minor => "Minor",
        GroupKind::Grad => "Grad",
    }
}

// ============================================================================
// SECTION: Catalog Command
// ============================================================================

/// Executes the `catalog check` command.
fn command_catalog_check(args: &ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(args)?;
    let catalog = load_catalog(&config)?;
    for line in catalog_summary(&catalog) {
        write_stdout(&line)?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Summarizes requirement counts per source.
fn catalog_summary(catalog: &RequirementCatalog) -> Vec<String> {
    let mut lines = vec![format!("university: {} requirements", catalog.university().len())];
    for (label, source_type) in [
        ("colleges", SourceType::College),
        ("majors", SourceType::Major),
        ("minors", SourceType::Minor),
        ("grad", SourceType::Grad),
    ] {
        let (programs, requirements) = catalog
            .programs(source_type)
            .fold((0_usize, 0_usize), |(programs, requirements), program| {
                (programs + 1, requirements + program.requirements.len())
            });
        lines.push(format!("{label}: {programs} programs, {requirements} requirements"));
    }
    lines.push(format!("catalog ok: {} requirements", catalog.requirement_count()));
    lines
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes the `config validate` command.
fn command_config_validate(args: &ConfigArgs) -> CliResult<ExitCode> {
    let _config = load_config(args)?;
    write_stdout("config ok")?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `config example` command.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout(config_toml_example().trim_end())?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads the config and installs the log subscriber.
fn load_config(args: &ConfigArgs) -> CliResult<AuditConfig> {
    let config = AuditConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    init_tracing(config.log_filter.as_deref());
    Ok(config)
}

/// Loads the requirement catalog named by the config.
fn load_catalog(config: &AuditConfig) -> CliResult<RequirementCatalog> {
    let catalog = config
        .load_catalog()
        .map_err(|err| CliError::new(format!("failed to load catalog: {err}")))?;
    info!(requirements = catalog.requirement_count(), "catalog loaded");
    Ok(catalog)
}

/// Installs a stderr subscriber filtered by env, then config, then default.
fn init_tracing(config_filter: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a line to stdout.
fn write_stdout(message: &str) -> CliResult<()> {
    write_stdout_line(message).map_err(|err| CliError::new(format!("failed to write stdout: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
