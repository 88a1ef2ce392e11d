//! CLI subcommands.

pub mod config;
pub mod extract;
pub mod table;

use std::path::Path;

use clap::ValueEnum;
use rust_decimal::Decimal;

use meisai_core::{ExtractConfig, HeaderPolicy};

/// Header association policy flag.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum HeaderPolicyArg {
    /// A header prefixes exactly one following detail row
    Consume,
    /// A header persists until the next header supersedes it
    Persist,
}

impl From<HeaderPolicyArg> for HeaderPolicy {
    fn from(arg: HeaderPolicyArg) -> Self {
        match arg {
            HeaderPolicyArg::Consume => HeaderPolicy::ConsumeAfterDetail,
            HeaderPolicyArg::Persist => HeaderPolicy::PersistUntilNext,
        }
    }
}

/// Build the extraction config from an optional config file plus flag
/// overrides.
pub fn build_config(
    config_path: Option<&str>,
    tax_rate: Option<Decimal>,
    header_policy: Option<HeaderPolicyArg>,
) -> anyhow::Result<ExtractConfig> {
    let mut config = match config_path {
        Some(path) => ExtractConfig::from_file(Path::new(path))?,
        None => ExtractConfig::default(),
    };

    if let Some(rate) = tax_rate {
        config.tax_rate = rate;
    }
    if let Some(policy) = header_policy {
        config.header_policy = policy.into();
    }

    Ok(config)
}
