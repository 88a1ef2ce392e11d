//! Extract command - line items from a file of OCR text lines.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use meisai_core::ExtractPipeline;

use super::{HeaderPolicyArg, build_config};
use crate::output;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file of text lines in document reading order
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Tax rate applied to derived amounts
    #[arg(long)]
    tax_rate: Option<Decimal>,

    /// Header association policy
    #[arg(long, value_enum)]
    header_policy: Option<HeaderPolicyArg>,

    /// Prefix the output with a UTF-8 byte-order mark (for spreadsheets)
    #[arg(long)]
    bom: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let config = build_config(config_path, args.tax_rate, args.header_policy)?;
    let pipeline = ExtractPipeline::new(config);

    let text = fs::read_to_string(&args.input)?;
    let lines: Vec<&str> = text.lines().collect();
    info!("read {} lines from {}", lines.len(), args.input.display());

    let items = pipeline.extract_lines(&lines);
    info!("extracted {} line items", items.len());

    output::write_items(&items, args.output.as_deref(), args.bom)
}
