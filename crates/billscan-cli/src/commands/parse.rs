//! Parse command - extract a bill from a single receipt file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use billscan_core::{BillDraft, ImportContext, ReceiptPipeline};

use super::output::{format_draft, format_record, OutputFormat};
use super::{load_config, Upload};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (PDF, image or text)
    #[arg(required = true)]
    input: PathBuf,

    /// MIME type of the input (default: from the file extension)
    #[arg(long)]
    mime: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// List fields that could not be extracted
    #[arg(long)]
    show_misses: bool,

    /// Emit a storage-ready bill draft instead of the parsed receipt
    #[arg(long)]
    draft: bool,

    /// Floor the bill draft is booked against
    #[arg(long, default_value = "1")]
    floor: String,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let upload = Upload::read(&args.input, args.mime.as_deref())?;

    info!("Parsing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Extracting text...");

    let pipeline = ReceiptPipeline::from_config(&config);
    let text = pipeline.extract_text(&upload.data, &upload.mime)?;

    pb.set_message("Parsing receipt...");
    let result = pipeline.process_text(&text).ok_or_else(|| {
        anyhow::anyhow!("No text could be extracted from {}", args.input.display())
    })?;

    pb.finish_and_clear();
    info!("Parsed with {} parser", result.parser);

    let output = if args.draft {
        let mut ctx = ImportContext::new(args.floor.clone(), upload.kind.bill_source());
        if let Some(name) = args.input.file_name().and_then(|n| n.to_str()) {
            ctx = ctx.with_filename(name);
        }
        let draft = BillDraft::from_receipt(&result, &ctx, &config.import)?;
        format_draft(&draft, args.format)?
    } else {
        format_record(&result.record, args.format)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.show_misses {
        eprintln!();
        if result.misses.is_empty() {
            eprintln!("{} All fields extracted", style("ℹ").blue());
        } else {
            eprintln!("{}", style("Missed fields:").yellow());
            for miss in &result.misses {
                eprintln!("  - {}", miss);
            }
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
