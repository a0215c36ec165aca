use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sgrna_analyzer::editing::{
    efficiency_line, write_report, ALIGNED_COLUMN, DEFAULT_GUIDE, READS_COLUMN, REFERENCE_COLUMN,
};
use sgrna_analyzer::{analyzer_from_args, AnalysisReport, ColumnNames};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sgrna-analyzer",
    version,
    about = "Base-editing efficiency within an sgRNA target window"
)]
struct Cli {
    /// Allele frequency table with aligned sequences (tab or whitespace separated).
    input: PathBuf,
    /// File the report is written to.
    output: PathBuf,
    /// Strand of the guide: forward/+ (C>T) or reverse/- (G>A).
    #[arg(short, long, default_value = "forward", allow_hyphen_values = true)]
    strand: String,
    /// Guide sequence used to anchor the window.
    #[arg(short = 'g', long, default_value = DEFAULT_GUIDE)]
    sgrna: String,
    /// Target window as 1-based inclusive `start-end`.
    #[arg(short, long, default_value = "3-9")]
    region: String,
    /// Column holding aligned read sequences.
    #[arg(long, default_value = ALIGNED_COLUMN)]
    aligned_column: String,
    /// Column holding reference sequences.
    #[arg(long, default_value = REFERENCE_COLUMN)]
    reference_column: String,
    /// Column holding read counts.
    #[arg(long, default_value = READS_COLUMN)]
    reads_column: String,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let analyzer = analyzer_from_args(&cli.sgrna, &cli.strand, &cli.region)
        .context("invalid analysis configuration")?;
    let columns = ColumnNames {
        aligned: cli.aligned_column,
        reference: cli.reference_column,
        reads: cli.reads_column,
    };

    println!("Analyzing {}...", cli.input.display());
    let report = analyzer
        .analyze_file(&cli.input, &columns)
        .with_context(|| format!("failed to analyse {}", cli.input.display()))?;

    save_report(&cli.output, &report)?;
    println!("{}", efficiency_line(&report));
    println!("Analysis complete. Results saved to {}", cli.output.display());

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn save_report(path: &Path, report: &AnalysisReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_report(&mut writer, report)
        .with_context(|| format!("failed to write report to {}", path.display()))
}
