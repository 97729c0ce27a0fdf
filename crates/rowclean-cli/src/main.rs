mod config;

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rowclean_core::roles::Role;
use rowclean_core::{CleanMode, CleanOptions, CleanOutcome, CleanReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, OutputConfig};

/// rowclean — normalize and deduplicate customer CSV files
///
/// Scrubs the Number, Name, Gender, Points, Birthday and Anniversary
/// columns and keeps only the first row for each phone number.
#[derive(Parser)]
#[command(name = "rowclean", version, about, long_about = None)]
struct Cli {
    /// Suppress normal output
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a CSV file and write the result
    Clean {
        /// Path to the .csv file
        file: PathBuf,
        /// Output path (default: cleaned_<file> next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the cleaned CSV to stdout instead of a file
        #[arg(long, conflicts_with_all = ["output", "json"])]
        stdout: bool,
        /// Which rules to apply
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report what cleaning would do without writing anything
    Inspect {
        /// Path to the .csv file
        file: PathBuf,
        /// Which rules to apply
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize date values to YYYY-MM-DD
    Date {
        /// Raw date strings
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Full,
    DedupOnly,
}

impl From<ModeArg> for CleanMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Full => CleanMode::Full,
            ModeArg::DedupOnly => CleanMode::DedupOnly,
        }
    }
}

// Exit codes: 0 success, 1 input rejected, 2 I/O or configuration error
const EXIT_OK: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {:#}", "error:".red().bold(), err);
            EXIT_ERROR
        }
    };

    process::exit(exit_code);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(cli: Cli) -> Result<i32> {
    let quiet = cli.quiet;
    match cli.command {
        Commands::Clean {
            file,
            output,
            stdout,
            mode,
            json,
        } => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            let options = clean_options(&config, mode);
            let destination = match (stdout, output) {
                (true, _) => Destination::Stdout,
                (false, Some(path)) => Destination::File(path),
                (false, None) => Destination::File(default_output_path(&file, &config.output)?),
            };
            cmd_clean(&file, destination, &options, json, quiet)
        }
        Commands::Inspect { file, mode, json } => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            let options = clean_options(&config, mode);
            cmd_inspect(&file, &options, json, quiet)
        }
        Commands::Date { values } => {
            if !quiet {
                for value in &values {
                    println!("{}", rowclean_core::date::normalize_date(value));
                }
            }
            Ok(EXIT_OK)
        }
        Commands::Version => {
            println!(
                "rowclean {} (rowclean-core {})",
                env!("CARGO_PKG_VERSION"),
                rowclean_core::VERSION
            );
            Ok(EXIT_OK)
        }
    }
}

fn clean_options(config: &Config, mode: Option<ModeArg>) -> CleanOptions {
    let mut options = config.clean.clone();
    if let Some(mode) = mode {
        options.mode = mode.into();
    }
    options
}

// ── Commands ──────────────────────────────────────────────

enum Destination {
    Stdout,
    File(PathBuf),
}

fn cmd_clean(
    file: &Path,
    destination: Destination,
    options: &CleanOptions,
    json: bool,
    quiet: bool,
) -> Result<i32> {
    let text = read_input(file)?;
    let outcome = match rowclean_core::clean_with(&text, options) {
        Ok(outcome) => outcome,
        Err(err) => return Ok(reject(file, &err, json)),
    };
    let csv = outcome.table.to_csv();

    match &destination {
        Destination::Stdout => {
            println!("{}", csv);
            if !quiet {
                print_summary(file, None, &outcome.report, true);
            }
        }
        Destination::File(path) => {
            write_atomically(path, &csv)?;
            info!(
                input = %file.display(),
                output = %path.display(),
                rows_written = outcome.report.rows_written,
                "wrote cleaned file"
            );
            if json {
                let report = serde_json::json!({
                    "success": true,
                    "input": file.display().to_string(),
                    "output": path.display().to_string(),
                    "report": outcome.report,
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if !quiet {
                print_summary(file, Some(path), &outcome.report, false);
            }
        }
    }

    Ok(EXIT_OK)
}

fn cmd_inspect(file: &Path, options: &CleanOptions, json: bool, quiet: bool) -> Result<i32> {
    let text = read_input(file)?;
    let CleanOutcome { table, report } = match rowclean_core::clean_with(&text, options) {
        Ok(outcome) => outcome,
        Err(err) => return Ok(reject(file, &err, json)),
    };

    if json {
        let roles: serde_json::Map<String, serde_json::Value> = Role::ALL
            .iter()
            .map(|role| {
                let column = report.roles.get(*role).map(|idx| table.header[idx].clone());
                (role.to_string(), serde_json::json!(column))
            })
            .collect();
        let out = serde_json::json!({
            "success": true,
            "header": table.header,
            "roles": roles,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(EXIT_OK);
    }

    if quiet {
        return Ok(EXIT_OK);
    }

    println!("{} {}", "file:".bold(), file.display());
    println!("{} {}", "columns:".bold(), table.header.join(", "));
    println!("{}", "roles:".bold());
    for role in Role::ALL {
        let column = match report.roles.get(role) {
            Some(idx) if role == Role::Number && report.roles.number_is_fallback => {
                format!("{} (first column)", table.header[idx])
            }
            Some(idx) => table.header[idx].clone(),
            None => "-".dimmed().to_string(),
        };
        println!("  {:<12} {}", role.to_string(), column);
    }
    print_counts(&report, false);
    Ok(EXIT_OK)
}

// ── Helpers ───────────────────────────────────────────────

fn read_input(file: &Path) -> Result<String> {
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

/// Report an engine rejection and return the exit code for it
fn reject(file: &Path, err: &rowclean_core::Error, json: bool) -> i32 {
    tracing::warn!(input = %file.display(), error = %err, "input rejected");
    if json {
        let out = serde_json::json!({
            "success": false,
            "input": file.display().to_string(),
            "error": err.to_string(),
        });
        println!("{}", out);
    } else {
        eprintln!("{} {}: {}", "error:".red().bold(), file.display(), err);
    }
    EXIT_REJECTED
}

/// `cleaned_<name>` in the configured directory, or next to the input
fn default_output_path(input: &Path, output: &OutputConfig) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .ok_or_else(|| anyhow!("input path has no file name: {}", input.display()))?;
    let mut name = OsString::from(&output.prefix);
    name.push(file_name);

    let dir = match &output.dir {
        Some(dir) => dir.clone(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    Ok(dir.join(name))
}

/// Write through a temporary file in the target directory, then rename
///
/// A failed run leaves no partial output behind.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn print_summary(input: &Path, output: Option<&Path>, report: &CleanReport, to_stderr: bool) {
    let line = match output {
        Some(output) => format!(
            "{} cleaned {} → {}",
            "✓".green(),
            input.display(),
            output.display()
        ),
        None => format!("{} cleaned {}", "✓".green(), input.display()),
    };
    if to_stderr {
        eprintln!("{}", line);
    } else {
        println!("{}", line);
    }
    print_counts(report, to_stderr);
}

fn print_counts(report: &CleanReport, to_stderr: bool) {
    let lines = [
        format!(
            "  rows: {} read, {} written, {} duplicates dropped",
            report.rows_read, report.rows_written, report.duplicates_dropped
        ),
        format!(
            "  dates: {} normalized, {} left unchanged (mode: {})",
            report.dates_normalized, report.dates_unchanged, report.mode
        ),
    ];
    for line in lines {
        if to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}
