use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use invoice_core::Profile;
use invoice_ingest::{SourceDocument, process_batch_with};
use invoice_pdf::PdfExtractBackend;

/// Invoice Processor - Extract structured fields from invoice PDFs into
/// an Excel summary
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// PDF invoices to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Invoice layout to extract
    #[arg(long, value_enum, default_value_t = ProfileArg::Customs)]
    profile: ProfileArg,

    /// Output spreadsheet path
    #[arg(short, long, default_value = invoice_export::DEFAULT_FILENAME)]
    output: PathBuf,

    /// Per-file size ceiling in megabytes; larger files are skipped
    #[arg(long, default_value_t = 25)]
    max_size_mb: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ProfileArg {
    /// Customs-broker invoices (reference, duties, GST, broker fee)
    Customs,
    /// Freight invoices (shipper, weights, chargeable, freight rate)
    Freight,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Customs => Profile::Customs,
            ProfileArg::Freight => Profile::Freight,
        }
    }
}

fn warn(message: &str, use_color: bool) {
    if use_color {
        eprintln!("{}", message.yellow());
    } else {
        eprintln!("{message}");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = Profile::from(cli.profile);
    let use_color = !cli.no_color;
    let size_ceiling = cli.max_size_mb * 1024 * 1024;

    // Boundary layer: size gating and file reading happen before any
    // bytes reach the extraction engine.
    let mut documents = Vec::new();
    let mut skipped = 0usize;
    for path in &cli.files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let size = match fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(e) => {
                warn(&format!("Cannot read {name}: {e}"), use_color);
                skipped += 1;
                continue;
            }
        };
        if size > size_ceiling {
            warn(
                &format!("Skipping {name}: exceeds {} MB limit", cli.max_size_mb),
                use_color,
            );
            skipped += 1;
            continue;
        }

        match fs::read(path) {
            Ok(bytes) => documents.push(SourceDocument::new(name, bytes)),
            Err(e) => {
                warn(&format!("Cannot read {name}: {e}"), use_color);
                skipped += 1;
            }
        }
    }

    let backend = PdfExtractBackend::new();
    let bar = ProgressBar::new(documents.len() as u64);
    bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);

    let outcome = process_batch_with(&backend, profile, &documents, |_, document| {
        bar.set_message(document.name.clone());
        bar.inc(1);
    });
    bar.finish_and_clear();

    for failure in &outcome.failures {
        warn(&format!("Nothing extracted from {}", failure.name), use_color);
    }

    if outcome.records.is_empty() {
        anyhow::bail!("no valid data extracted");
    }

    let buffer = invoice_export::export_records(profile, &outcome.records)?;
    fs::write(&cli.output, buffer)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!(
        "Extraction complete: {} file(s) processed, {} failed or skipped.",
        outcome.records.len(),
        outcome.failures.len() + skipped
    );
    println!("Summary written to {}", cli.output.display());

    Ok(())
}
