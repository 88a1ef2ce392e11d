//! Table command - line items from an extracted table CSV.

use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use meisai_core::{ExtractPipeline, Table};

use super::{HeaderPolicyArg, build_config};
use crate::output;

/// Arguments for the table command.
#[derive(Args)]
pub struct TableArgs {
    /// Input CSV whose first non-empty row holds the column labels
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

pub fn run(args: TableArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let config = build_config(config_path, args.tax_rate, args.header_policy)?;
    let pipeline = ExtractPipeline::new(config);

    let table = read_table(&args.input)?;
    info!(
        "read table with {} columns and {} rows from {}",
        table.header.len(),
        table.rows.len(),
        args.input.display()
    );

    let items = pipeline.extract_table(&table)?;
    info!("extracted {} line items", items.len());

    output::write_items(&items, args.output.as_deref(), args.bom)
}

/// Read a cell table from CSV; the first row with any content becomes the
/// header row.
fn read_table(path: &PathBuf) -> anyhow::Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    let header_idx = rows
        .iter()
        .position(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .ok_or_else(|| anyhow::anyhow!("table input is empty: {}", path.display()))?;

    let header = rows[header_idx].clone();
    let data = rows.split_off(header_idx + 1);

    Ok(Table { header, rows: data })
}
