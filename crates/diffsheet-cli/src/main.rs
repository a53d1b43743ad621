//! diffsheet CLI - HTML diff reports to a reviewable spreadsheet

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use diffsheet::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "diffsheet")]
#[command(
    author,
    version,
    about = "Consolidate HTML diff reports into one XLSX workbook"
)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the workbook for a report and write it as XLSX
    Build {
        /// Summary report; per-file reports are read from <name>.files/
        input: PathBuf,

        /// Output workbook (default: input with .xlsx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show the changes found per file without writing anything
    Inspect {
        /// Summary report; per-file reports are read from <name>.files/
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[derive(Args, Debug, Default)]
struct ConfigArgs {
    /// JSON configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Unchanged rows kept around each change
    #[arg(long)]
    context: Option<u32>,

    /// Fill colour marking changed lines (ARGB or RGB hex, e.g. FFC0C0C0)
    #[arg(long, value_parser = parse_color)]
    highlight: Option<Color>,

    /// Leave out the comments column
    #[arg(long)]
    no_annotation: bool,
}

impl ConfigArgs {
    fn load(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => ReportConfig::default(),
        };

        if let Some(lines) = self.context {
            config = config.with_context_lines(lines);
        }
        if let Some(color) = self.highlight {
            config = config.with_highlight_color(color);
        }
        if self.no_annotation {
            config = config.with_annotation(false);
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

fn parse_color(value: &str) -> std::result::Result<Color, String> {
    Color::normalize_html(value).ok_or_else(|| format!("'{}' is not a hex colour", value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            output,
            config,
        } => build(&input, output, &config),
        Commands::Inspect { input, config } => inspect(&input, &config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run_pipeline(input: &Path, config: &ReportConfig) -> Result<Report> {
    let source = ReportSource::discover(input)
        .with_context(|| format!("Failed to scan reports of '{}'", input.display()))?;
    tracing::debug!(files = source.files.len(), "discovered reports");

    ReportBuilder::new(config)
        .build(&source)
        .with_context(|| format!("Failed to build report from '{}'", input.display()))
}

fn build(input: &Path, output: Option<PathBuf>, args: &ConfigArgs) -> Result<()> {
    let config = args.load()?;
    let report = run_pipeline(input, &config)?;

    let output = output.unwrap_or_else(|| input.with_extension("xlsx"));
    report
        .workbook
        .save(&output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    print_report(&report);
    eprintln!(
        "Wrote {} sheets to '{}'",
        report.workbook.sheet_count(),
        output.display()
    );
    Ok(())
}

fn inspect(input: &Path, args: &ConfigArgs) -> Result<()> {
    let config = args.load()?;
    let report = run_pipeline(input, &config)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    for file in &report.files {
        println!("{}", format_record(file));
        for warning in &file.warnings {
            println!("    warning: {}", warning);
        }
    }
    for warning in &report.summary_warnings {
        println!("summary warning: {}", warning);
    }

    let changed = report.files.iter().filter(|f| f.has_changes()).count();
    println!(
        "{} file(s), {} with changes, {} failed, {} summary link(s)",
        report.files.len(),
        changed,
        report.failed_count(),
        report.summary_links
    );
}

/// One line per file: sheet, changed rows and block ranges, or the failure
fn format_record(file: &FileReport) -> String {
    if let Some(error) = &file.error {
        return format!("{}: FAILED: {}", file.file, error);
    }

    let sheet = file.sheet.as_deref().unwrap_or("-");
    if file.blocks.is_empty() {
        return format!("{} [{}]: no changes", file.file, sheet);
    }
    let ranges: Vec<String> = file.blocks.iter().map(|b| b.to_string()).collect();
    format!(
        "{} [{}]: {} changed row(s) in {} block(s): {}",
        file.file,
        sheet,
        file.diff_rows.len(),
        file.blocks.len(),
        ranges.join(", ")
    )
}
