use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use proteome::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

mod config;
mod load;

use config::Manifest;

/// Pathogenic-variant candidates across proteomics samples
#[derive(Parser)]
#[command(name = "compare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every sample of a manifest and write the comparison
    Run {
        /// TOML manifest listing the samples
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Directory receiving the output files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Parse a single export file and report its layout
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Treat the file as a protein table instead of a peptide table
        #[arg(long)]
        protein: bool,
    },
}

fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Overlap data handed to the diagram layer
#[derive(Serialize)]
struct Overlaps {
    intersections: Vec<OverlapSet>,
    regions: Vec<OverlapSet>,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let f = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(f, value)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn run(manifest_path: &Path, output: &Path) -> Result<()> {
    let manifest = Manifest::from_file(manifest_path)?;
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let inputs = load::load(&manifest, base)?;

    let mut set = SampleSet::default();
    if let Err(e) = set.run_batch(&inputs, &manifest.settings()) {
        bail!("batch aborted, no samples were stored: {}", e);
    }

    for sample in set.samples() {
        println!(
            "{}\t{}\t{} candidates\t{} peptides\tfactor {:.4}\t{} skipped rows",
            sample.id,
            sample.name,
            sample.analysis_results.len(),
            sample.total_peptides_count,
            sample.normalization_factor,
            sample.skipped_rows
        );
    }

    let selection = manifest.selection();
    let selected = set.select(&selection);
    if selected.len() != selection.len() {
        log::warn!(
            "{} of the {} selected sample ids are unknown",
            selection.len() - selected.len(),
            selection.len()
        );
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_json(&output.join("samples.json"), &set.samples())?;

    let dataset = ComparativeDataset::build(&selected);
    if dataset.is_empty() {
        log::warn!("nothing to compare across the selected samples, no comparison written");
    } else {
        let delimiter = manifest.output.delimiter;
        let path = output.join(format!("comparison.{}", delimiter.extension()));
        dataset
            .write(&path, delimiter)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("{} accessions written to {}", dataset.rows.len(), path.display());
    }

    let overlaps = Overlaps {
        intersections: build_overlap(&selected),
        regions: exclusive_regions(&selected),
    };
    write_json(&output.join("overlaps.json"), &overlaps)?;
    Ok(())
}

fn inspect(file: &Path, protein: bool) -> Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let kind = if protein {
        TableKind::Protein
    } else {
        TableKind::Peptide
    };
    let table = Table::parse(kind, &text)?;

    println!("delimiter\t{:?}", table.delimiter as char);
    println!("rows\t{}", table.len());
    println!("skipped\t{}", table.skipped().len());
    for (idx, header) in table.headers().iter().enumerate() {
        println!("column {}\t{}", idx + 1, header);
    }
    for row in table.skipped() {
        println!(
            "line {}\texpected {} cells, found {}",
            row.line, row.expected, row.found
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { manifest, output } => run(&manifest, &output),
        Commands::Inspect { file, protein } => inspect(&file, protein),
    }
}
