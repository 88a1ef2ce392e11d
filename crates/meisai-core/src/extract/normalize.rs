//! Token normalization for numeric/currency substrings.
//!
//! OCR output mixes full-width and half-width digits, currency marks and
//! thousands separators; everything numeric goes through here before
//! parsing.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ExtractError, Result};

/// Fold full-width characters to their half-width equivalents (NFKC).
///
/// Maps ０-９ to 0-9, ￥ to ¥, ＠ to @ and the ideographic space to a
/// plain space, leaving kana/kanji intact.
pub fn nfkc_fold(raw: &str) -> String {
    raw.nfkc().collect()
}

/// Parse a currency-like token into whole currency units.
///
/// Strips currency marks, thousands separators and surrounding
/// whitespace. A decimal token is accepted only when its value is
/// integral (`1500.0` parses to 1500).
pub fn normalize_numeric(raw: &str) -> Result<u64> {
    let value = normalize_decimal_inner(raw, "amount")?;

    if !value.fract().is_zero() {
        return Err(ExtractError::Decode {
            field: "amount",
            value: raw.to_string(),
        });
    }

    value.trunc().to_u64().ok_or_else(|| ExtractError::Decode {
        field: "amount",
        value: raw.to_string(),
    })
}

/// Parse a numeric token preserving fractional quantities.
pub fn normalize_decimal(raw: &str) -> Result<Decimal> {
    normalize_decimal_inner(raw, "quantity")
}

fn normalize_decimal_inner(raw: &str, field: &'static str) -> Result<Decimal> {
    let folded = nfkc_fold(raw);

    // Keep digits and the decimal point; drop ¥, commas and whitespace.
    let cleaned: String = folded
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() || folded.contains('-') {
        return Err(ExtractError::Decode {
            field,
            value: raw.to_string(),
        });
    }

    Decimal::from_str(&cleaned).map_err(|_| ExtractError::Decode {
        field,
        value: raw.to_string(),
    })
}

/// Normalize a description remainder: strip quote characters, collapse
/// repeated whitespace to one space and trim.
pub fn clean_description(raw: &str) -> String {
    let folded = nfkc_fold(raw);
    let unquoted: String = folded
        .chars()
        .filter(|c| !matches!(c, '"' | '\u{201c}' | '\u{201d}' | '「' | '」' | '『' | '』'))
        .collect();

    unquoted.split_whitespace().collect::<Vec<_>>().join(" ")
}
