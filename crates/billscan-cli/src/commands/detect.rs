//! Detect command - report which store parser a file would use.

use std::path::PathBuf;

use clap::Args;

use billscan_core::ReceiptPipeline;

use super::{load_config, Upload};

#[derive(Args)]
pub struct DetectArgs {
    /// Input file (PDF, image or text)
    #[arg(required = true)]
    input: PathBuf,

    /// MIME type of the input (default: from the file extension)
    #[arg(long)]
    mime: Option<String>,
}

pub async fn run(args: DetectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let upload = Upload::read(&args.input, args.mime.as_deref())?;

    let pipeline = ReceiptPipeline::from_config(&config);
    let text = pipeline.extract_text(&upload.data, &upload.mime)?;

    println!("{}", pipeline.detect(&text));

    Ok(())
}
