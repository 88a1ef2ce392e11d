//! Regex patterns for line-item recognition.
//!
//! Fixed patterns live in the `lazy_static` block; patterns that depend on
//! the configured unit-marker set are compiled once per pipeline in
//! [`CompiledPatterns`]. All patterns are applied to NFKC-folded text, so
//! the half-width forms of ¥ and @ are the canonical ones (the full-width
//! forms are kept as alternates for cell text that bypasses folding).

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Leading ordinal/numeric marker on a header row: `1 `, `2. `, `(3) `.
    pub static ref ORDINAL_MARKER: Regex = Regex::new(
        r"^[(（]?\d{1,2}[.)）]?\s+"
    ).unwrap();

    /// An embedded price token (currency mark followed by a digit).
    pub static ref PRICE_TOKEN: Regex = Regex::new(
        r"[¥￥]\s*\d"
    ).unwrap();

    /// A line ending in a numeric run.
    pub static ref TRAILING_NUMBER: Regex = Regex::new(
        r"\d[\d,]*\s*$"
    ).unwrap();

    /// Trailing amount token with its description remainder.
    pub static ref TRAILING_AMOUNT: Regex = Regex::new(
        r"^(?P<desc>.*?)\s*(?P<yen>[¥￥])?\s*(?P<amt>\d[\d,]*)\s*$"
    ).unwrap();

    /// A line ending in `@<number>` or `×<number>`: a unit price, never a
    /// bare trailing amount.
    pub static ref UNIT_PRICE_TAIL: Regex = Regex::new(
        r"[@＠×]\s*\d[\d,]*\s*$"
    ).unwrap();

    /// Separator-shape quantity/unit-price pair without a count-unit word:
    /// `3 @ 450`, `2×1,500`.
    pub static ref QTY_SEP_PRICE: Regex = Regex::new(
        r"(?P<qty>\d+(?:\.\d+)?)\s*[@＠×]\s*(?P<unit>\d[\d,]*)"
    ).unwrap();
}

/// Patterns whose shape depends on the configured unit-marker words.
#[derive(Debug)]
pub struct CompiledPatterns {
    /// `¥<unit price> <qty> <marker>` — unit price first, then quantity.
    pub price_qty_marker: Regex,
    /// `<qty><marker> [×] [@] <unit price>`.
    pub qty_marker_price: Regex,
}

impl CompiledPatterns {
    /// Compile the marker-dependent patterns.
    ///
    /// Markers are regex-escaped, so compilation cannot fail on user
    /// configuration.
    pub fn new(unit_markers: &[String]) -> Self {
        let markers = unit_markers
            .iter()
            .map(|m| regex::escape(m))
            .collect::<Vec<_>>()
            .join("|");

        let price_qty_marker = Regex::new(&format!(
            r"[¥￥]\s*(?P<unit>\d[\d,]*)\s+(?P<qty>\d+(?:\.\d+)?)\s*(?P<marker>{markers})"
        ))
        .unwrap();

        let qty_marker_price = Regex::new(&format!(
            r"(?P<qty>\d+(?:\.\d+)?)\s*(?P<marker>{markers})\s*[×x*]?\s*[@＠]?\s*(?P<unit>\d[\d,]*)"
        ))
        .unwrap();

        Self {
            price_qty_marker,
            qty_marker_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        vec!["台".to_string(), "個".to_string()]
    }

    #[test]
    fn test_price_qty_marker_shape() {
        let patterns = CompiledPatterns::new(&markers());
        let caps = patterns
            .price_qty_marker
            .captures("\"ネジ\" ¥100 10 台 ¥1,000")
            .unwrap();
        assert_eq!(&caps["unit"], "100");
        assert_eq!(&caps["qty"], "10");
        assert_eq!(&caps["marker"], "台");
    }

    #[test]
    fn test_qty_marker_price_shape() {
        let patterns = CompiledPatterns::new(&markers());

        let caps = patterns.qty_marker_price.captures("57台 @300").unwrap();
        assert_eq!(&caps["qty"], "57");
        assert_eq!(&caps["unit"], "300");

        let caps = patterns.qty_marker_price.captures("1台×1,500").unwrap();
        assert_eq!(&caps["qty"], "1");
        assert_eq!(&caps["unit"], "1,500");
    }

    #[test]
    fn test_unit_price_tail_guard() {
        assert!(UNIT_PRICE_TAIL.is_match("特急対応 @450"));
        assert!(UNIT_PRICE_TAIL.is_match("作業 ×300"));
        assert!(!UNIT_PRICE_TAIL.is_match("送料 ¥500"));
    }

    #[test]
    fn test_ordinal_marker() {
        assert!(ORDINAL_MARKER.is_match("1 部材:"));
        assert!(ORDINAL_MARKER.is_match("2. 送料"));
        assert!(ORDINAL_MARKER.is_match("(3) その他"));
        assert!(!ORDINAL_MARKER.is_match("部材:"));
    }
}
