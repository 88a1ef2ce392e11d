//! Error types for the meisai-core library.

use thiserror::Error;

/// Errors raised while extracting line items from a document.
///
/// `Decode` and `AmountUnresolved` are per-unit failures: the pipeline
/// drops the offending unit and continues. `NoHeaderColumns` is a
/// structural failure that aborts extraction for the whole document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A numeric/currency token could not be parsed.
    #[error("failed to decode {field}: {value:?}")]
    Decode {
        /// Which field the token was extracted for.
        field: &'static str,
        /// The raw token that failed to parse.
        value: String,
    },

    /// A detail row matched structurally but carries no usable amount.
    #[error("no usable amount for detail row: {0:?}")]
    AmountUnresolved(String),

    /// Table input lacks the minimum required columns.
    #[error("table header lacks required columns, found: {found:?}")]
    NoHeaderColumns {
        /// The header labels that were present.
        found: String,
    },
}

/// Result type for the meisai-core library.
pub type Result<T> = std::result::Result<T, ExtractError>;
