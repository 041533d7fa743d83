//! record-diff: order-insensitive structural diff for nested records

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use record_diff::{
    cli,
    config::{AppConfig, ConfigPreset, DiffConfig},
    matching::MatchStrategy,
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "record-diff")]
#[command(version)]
#[command(about = "Order-insensitive structural diff for nested records", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or --fail-on-change not set)
    1  Changes detected
    3  Error occurred

EXAMPLES:
    # Compare two records, ignoring sequence order
    record-diff diff before.json after.json

    # Machine-readable output for CI
    record-diff diff before.yaml after.yaml -o json --fail-on-change

    # List every changed leaf
    record-diff diff before.json after.json -o paths

    # Compare every record in two directories
    record-diff audit expected/ actual/ -O audit.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start from a named preset (default, ci-cd, strict, lenient)
    #[arg(long, global = true, value_parser = parse_preset)]
    preset: Option<ConfigPreset>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Diff tuning shared by every subcommand that compares records
#[derive(clap::Args)]
struct DifferArgs {
    /// Sequence items further apart than this (0.0-1.0) are reported as
    /// removed plus added
    #[arg(long)]
    pair_cutoff: Option<f64>,

    /// Pair sequence items by position once this many are left unmatched
    #[arg(long)]
    max_pairing_len: Option<usize>,

    /// Drop repeated paths from the classification lists
    #[arg(long)]
    dedup: bool,

    /// Abort a comparison after this many seconds (0 = no deadline)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Exit with code 1 if any change is detected
    #[arg(long)]
    fail_on_change: bool,
}

/// Output selection shared by report-producing subcommands
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// List diff entry paths instead of leaf paths (paths format)
    #[arg(long)]
    entry_paths: bool,

    /// Omit raw diff entries from JSON output
    #[arg(long)]
    no_entries: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two records
    Diff {
        /// Path to record A
        a: PathBuf,

        /// Path to record B
        b: PathBuf,

        #[command(flatten)]
        differ: DifferArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Classify a precomputed diff report (JSON)
    Classify {
        /// Path to the diff report
        report: PathBuf,

        /// Drop repeated paths from the classification lists
        #[arg(long)]
        dedup: bool,

        /// Exit with code 1 if the report contains any entry
        #[arg(long)]
        fail_on_change: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the leaf paths and values of a record
    Flatten {
        /// Path to the record
        record: PathBuf,

        /// Emit a JSON object instead of one line per leaf
        #[arg(long)]
        json: bool,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Solve a best-match problem (JSON with indices1, indices2, distances)
    Match {
        /// Path to the problem file
        problem: PathBuf,

        /// Solver to use
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<MatchStrategy>,

        /// Largest candidate list the exhaustive solver accepts
        #[arg(long)]
        exhaustive_limit: Option<usize>,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Compare every record in a directory with its namesake in another
    Audit {
        /// Directory with reference records
        reference: PathBuf,

        /// Directory with candidate records
        candidate: PathBuf,

        #[command(flatten)]
        differ: DifferArgs,

        /// Output file path (stdout if not specified)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Print the JSON Schema of the configuration file
    ConfigSchema {
        /// Write the schema to a file instead of stdout
        #[arg(short = 'O', long)]
        output: Option<PathBuf>,
    },

    /// Print an example configuration file
    ConfigExample,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_preset(s: &str) -> std::result::Result<ConfigPreset, String> {
    ConfigPreset::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
        format!("unknown preset '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_strategy(s: &str) -> std::result::Result<MatchStrategy, String> {
    s.parse()
}

// ============================================================================
// Configuration layering
// ============================================================================

/// Resolve the effective configuration: preset, then config file, then
/// global flags. Per-command flags are applied by the caller.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let (file_config, loaded_from) = record_diff::config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let mut config = match cli.preset {
        Some(preset) => AppConfig::from_preset(preset),
        None => AppConfig::default(),
    };
    config.merge(&file_config);

    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    if cli.quiet {
        config.behavior.quiet = true;
    }
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        config.output.no_color = true;
    }
    Ok(config)
}

fn apply_differ_args(config: &mut AppConfig, args: &DifferArgs) {
    if let Some(cutoff) = args.pair_cutoff {
        config.diff.pair_cutoff = cutoff;
    }
    if let Some(len) = args.max_pairing_len {
        config.diff.max_pairing_len = len;
    }
    if args.dedup {
        config.diff.deduplicate = true;
    }
    if let Some(secs) = args.timeout_secs {
        config.behavior.timeout_secs = secs;
    }
    if args.fail_on_change {
        config.behavior.fail_on_change = true;
    }
}

fn apply_output_args(config: &mut AppConfig, args: &OutputArgs) {
    if let Some(format) = args.output {
        config.output.format = format;
    }
    if args.output_file.is_some() {
        config.output.file.clone_from(&args.output_file);
    }
    if args.entry_paths {
        config.output.leaf_paths = false;
    }
    if args.no_entries {
        config.output.include_entries = false;
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    use record_diff::Validatable;

    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow::bail!("Invalid configuration: {}", messages.join("; "))
}

fn write_schema(output: Option<&Path>) -> Result<()> {
    let schema = record_diff::config::generate_json_schema()?;
    match output {
        Some(path) => {
            std::fs::write(path, &schema)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Schema written to {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(())
}

// ============================================================================
// Entry point
// ============================================================================

fn run(cli: Cli) -> Result<i32> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Diff {
            a,
            b,
            differ,
            output,
        } => {
            apply_differ_args(&mut config, &differ);
            apply_output_args(&mut config, &output);
            validate(&config)?;
            cli::run_diff(DiffConfig::from_app(&config, a, b))
        }

        Commands::Classify {
            report,
            dedup,
            fail_on_change,
            output,
        } => {
            if dedup {
                config.diff.deduplicate = true;
            }
            if fail_on_change {
                config.behavior.fail_on_change = true;
            }
            apply_output_args(&mut config, &output);
            validate(&config)?;
            cli::run_classify(&report, &config)
        }

        Commands::Flatten {
            record,
            json,
            output_file,
        } => {
            cli::run_flatten(&record, json, output_file, config.behavior.quiet)?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Match {
            problem,
            strategy,
            exhaustive_limit,
            output_file,
        } => {
            if let Some(strategy) = strategy {
                config.matching.strategy = strategy;
            }
            if let Some(limit) = exhaustive_limit {
                config.matching.exhaustive_limit = limit;
            }
            validate(&config)?;
            cli::run_match(
                &problem,
                &config.matching,
                output_file,
                config.behavior.quiet,
            )?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Audit {
            reference,
            candidate,
            differ,
            output_file,
        } => {
            apply_differ_args(&mut config, &differ);
            validate(&config)?;
            cli::run_audit(&reference, &candidate, &config, output_file)
        }

        Commands::ConfigSchema { output } => {
            write_schema(output.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigExample => {
            print!("{}", record_diff::config::generate_example_config());
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "record-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    if exit_code != exit_codes::SUCCESS {
        std::process::exit(exit_code);
    }
}
