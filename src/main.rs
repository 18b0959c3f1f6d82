// src/main.rs
mod extractors;
mod pipeline;
mod sources;
mod storage;
mod utils;

use clap::{Args, Parser, Subcommand};
use extractors::{DateExtractor, DateOrder};
use pipeline::ExtractionPipeline;
use sources::{OcrConfig, PdftotextBackend, TesseractOcr};
use std::path::PathBuf;
use storage::{SavedDateStore, StorageManager};
use utils::AppError;

/// Finds calendar dates in text files, images, PDFs and emails
#[derive(Parser, Debug)]
#[command(name = "date-extractor", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract dates from files or directories
    Extract(ExtractArgs),
    /// List saved dates
    Saved(StoreArgs),
    /// Remove all saved dates
    Clear(StoreArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Files or directories to scan
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output directory for the report
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Report file name
    #[arg(long, default_value = "extracted_dates.txt")]
    report: String,

    /// Also write extracted_dates.json
    #[arg(long)]
    json: bool,

    /// How to read ambiguous numeric dates like 03/04/2026
    #[arg(long, value_enum, default_value_t = DateOrder::MonthFirst)]
    date_order: DateOrder,

    /// Tesseract executable
    #[arg(long, env = "TESSERACT_CMD", default_value = "tesseract")]
    tesseract_cmd: PathBuf,

    /// Tesseract language data directory
    #[arg(long, env = "TESSDATA_PREFIX")]
    tessdata_dir: Option<PathBuf>,

    /// OCR language(s), e.g. "eng" or "eng+fra"
    #[arg(long, default_value = "eng")]
    ocr_lang: String,

    /// pdftotext executable
    #[arg(long, default_value = "pdftotext")]
    pdftotext_cmd: PathBuf,

    /// Append every extracted date to the saved-date store
    #[arg(long)]
    save: bool,

    #[command(flatten)]
    store: StoreArgs,
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Saved-date store
    #[arg(long, default_value = "saved_dates.json")]
    store: PathBuf,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let cli = Cli::parse();
    tracing::debug!("Parsed args: {:?}", cli);

    match cli.command {
        Command::Extract(args) => run_extract(args),
        Command::Saved(args) => list_saved(&args),
        Command::Clear(args) => {
            SavedDateStore::new(&args.store).clear()?;
            tracing::info!("All saved dates cleared ({})", args.store.display());
            Ok(())
        }
    }
}

fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    tracing::info!("Starting extraction for {} input paths", args.paths.len());

    let ocr = TesseractOcr::new(OcrConfig {
        tesseract_cmd: args.tesseract_cmd.clone(),
        tessdata_dir: args.tessdata_dir.clone(),
        lang: args.ocr_lang.clone(),
    });
    let pdf = PdftotextBackend::new(args.pdftotext_cmd.clone());
    let mut pipeline = ExtractionPipeline::new(
        DateExtractor::new(args.date_order),
        Box::new(ocr),
        Box::new(pdf),
    );

    process_inputs(&mut pipeline, &args.paths)?;

    let storage = StorageManager::new(&args.output_dir)?;
    storage.save_report(pipeline.results(), &args.report)?;
    if args.json {
        storage.save_json(pipeline.results(), "extracted_dates.json")?;
    }

    if args.save {
        let store = SavedDateStore::new(&args.store.store);
        let mut saved = 0;
        for result in pipeline.results() {
            let values: Vec<String> = result.dates.iter().map(|d| d.value.clone()).collect();
            saved += store.append_all(&result.label, &values)?;
        }
        tracing::info!("Saved {} dates to {}", saved, store.path().display());
    }

    Ok(())
}

/// Runs every input through the pipeline. Fails only when none of them could
/// be read; an empty directory still counts as read.
fn process_inputs(pipeline: &mut ExtractionPipeline, paths: &[PathBuf]) -> Result<usize, AppError> {
    let mut readable = 0;
    let mut processed = 0;
    for path in paths {
        if let Ok(count) = pipeline.process_path(path) {
            readable += 1;
            processed += count;
        }
    }

    tracing::info!(
        "Processing finished. Processed: {}, Failures: {}, Dropped compound fragments: {}",
        processed,
        pipeline.failures(),
        pipeline.dropped_expansions()
    );

    if readable == 0 {
        return Err(AppError::Processing(
            "None of the given inputs could be read".to_string(),
        ));
    }
    Ok(processed)
}

fn list_saved(args: &StoreArgs) -> Result<(), AppError> {
    let saved = SavedDateStore::new(&args.store).load()?;
    if saved.is_empty() {
        println!("No dates saved yet.");
        return Ok(());
    }

    println!("Your Saved Dates:");
    for (i, item) in saved.iter().enumerate() {
        println!("{}. {} - {}", i + 1, item.event_name, item.date);
    }
    Ok(())
}
