//! Pattern recognition: classifies one input unit against the ordered
//! pattern set.
//!
//! Patterns overlap, so evaluation order is a contract (see module tests):
//! summary rows short-circuit everything, headers are tried before detail
//! shapes, and the quantity×unit-price shapes are tried before the
//! trailing-amount shape so that the more specific pattern wins.

use tracing::trace;

use crate::models::config::ExtractConfig;
use crate::models::item::{DetailFields, HeaderLabel, RawMatch, RowCells};

use super::normalize::nfkc_fold;
use super::patterns::{
    CompiledPatterns, ORDINAL_MARKER, PRICE_TOKEN, QTY_SEP_PRICE, TRAILING_AMOUNT, TRAILING_NUMBER,
    UNIT_PRICE_TAIL,
};

/// Longest label (in chars) still accepted as a group header.
const MAX_HEADER_LABEL_CHARS: usize = 24;

/// Stateless classifier for input units.
pub struct PatternRecognizer {
    summary_keywords: Vec<String>,
    default_unit_marker: String,
    patterns: CompiledPatterns,
}

impl PatternRecognizer {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            // Keywords are folded once so containment checks see the same
            // width-normalized text as the input lines.
            summary_keywords: config.summary_keywords.iter().map(|k| nfkc_fold(k)).collect(),
            default_unit_marker: config.default_unit_marker().to_string(),
            patterns: CompiledPatterns::new(&config.unit_markers),
        }
    }

    /// Classify a single text line.
    pub fn classify_line(&self, raw: &str, pos: usize) -> RawMatch {
        let line = nfkc_fold(raw);
        let line = line.trim();

        if line.is_empty() {
            return RawMatch::NoMatch;
        }

        if self.is_summary(line) {
            trace!(pos, line, "summary row");
            return RawMatch::Summary;
        }

        if let Some(name) = self.match_header(line) {
            trace!(pos, %name, "header row");
            return RawMatch::Header(HeaderLabel { name, pos });
        }

        if let Some(fields) = self.match_quantity_unit_price(line) {
            return RawMatch::Detail(fields);
        }

        if let Some(fields) = self.match_trailing_amount(line) {
            return RawMatch::Detail(fields);
        }

        RawMatch::NoMatch
    }

    /// Classify a table row whose cells are already projected onto roles.
    pub fn classify_row(&self, cells: &RowCells, pos: usize) -> RawMatch {
        let name = nfkc_fold(&cells.name);
        let name = name.trim();

        let has_cell = |c: &Option<String>| c.as_deref().is_some_and(|v| !v.trim().is_empty());
        let has_numbers =
            has_cell(&cells.amount) || has_cell(&cells.quantity) || has_cell(&cells.unit_price);

        if name.is_empty() && !has_numbers {
            return RawMatch::NoMatch;
        }

        if self.is_summary(name) {
            trace!(pos, name, "summary row");
            return RawMatch::Summary;
        }

        if !has_numbers {
            // A repeated in-table header row ("品 名" etc.), possibly split
            // by the extractor. Only a row without numeric cells qualifies;
            // a priced item whose name contains both characters is a detail.
            if name.contains('品') && name.contains('名') {
                return RawMatch::NoMatch;
            }

            // A name-only row with an ordinal marker or colon groups the
            // details that follow it.
            return match self.match_header(name) {
                Some(label) => RawMatch::Header(HeaderLabel { name: label, pos }),
                None => RawMatch::NoMatch,
            };
        }

        let mut description = strip_ordinal(name).to_string();
        if let Some(remarks) = cells.remarks.as_deref() {
            let remarks = nfkc_fold(remarks);
            let remarks = remarks.trim();
            if !remarks.is_empty() {
                description.push(' ');
                description.push_str(remarks);
            }
        }

        let take = |c: &Option<String>| {
            c.as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        RawMatch::Detail(DetailFields {
            description,
            quantity: take(&cells.quantity),
            unit_price: take(&cells.unit_price),
            stated_amount: take(&cells.amount),
            unit_marker: Some(self.default_unit_marker.clone()),
        })
    }

    fn is_summary(&self, text: &str) -> bool {
        self.summary_keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Group-header shape: optional ordinal marker, short label, optional
    /// `:`-separated descriptive suffix, no embedded price token.
    fn match_header(&self, line: &str) -> Option<String> {
        if PRICE_TOKEN.is_match(line) || TRAILING_NUMBER.is_match(line) {
            return None;
        }

        let had_ordinal = ORDINAL_MARKER.is_match(line);
        let label = strip_ordinal(line);

        if label.is_empty() {
            return None;
        }

        // The canonical name is the label before the first colon
        // ("PCWL-0410:受入検査作業" names the PCWL-0410 group).
        if let Some((name, _suffix)) = label.split_once(':') {
            let name = name.trim();
            return (!name.is_empty()).then(|| name.to_string());
        }

        if had_ordinal && label.chars().count() <= MAX_HEADER_LABEL_CHARS {
            return Some(label.to_string());
        }

        None
    }

    /// The two quantity×unit-price surface shapes. A trailing stated total
    /// on the same line is deliberately not captured: the more specific
    /// pattern claims the line and the amount is derived.
    fn match_quantity_unit_price(&self, line: &str) -> Option<DetailFields> {
        // `¥<unit> <qty> <marker>` (unit price first).
        if let Some(caps) = self.patterns.price_qty_marker.captures(line) {
            let whole = caps.get(0).unwrap();
            let before = &line[..whole.start()];
            // Anything after the matched span can only be a stated total;
            // drop it from the remainder.
            let after = TRAILING_AMOUNT
                .captures(&line[whole.end()..])
                .map(|c| c["desc"].to_string())
                .unwrap_or_else(|| line[whole.end()..].to_string());

            return Some(DetailFields {
                description: format!("{before} {after}"),
                quantity: Some(caps["qty"].to_string()),
                unit_price: Some(caps["unit"].to_string()),
                stated_amount: None,
                unit_marker: Some(caps["marker"].to_string()),
            });
        }

        // `<qty><marker> [@|×] <unit>`.
        if let Some(caps) = self.patterns.qty_marker_price.captures(line) {
            let whole = caps.get(0).unwrap();
            return Some(DetailFields {
                description: format!("{} {}", &line[..whole.start()], &line[whole.end()..]),
                quantity: Some(caps["qty"].to_string()),
                unit_price: Some(caps["unit"].to_string()),
                stated_amount: None,
                unit_marker: Some(caps["marker"].to_string()),
            });
        }

        // `<qty> @ <unit>` with no count-unit word.
        if let Some(caps) = QTY_SEP_PRICE.captures(line) {
            let whole = caps.get(0).unwrap();
            return Some(DetailFields {
                description: format!("{} {}", &line[..whole.start()], &line[whole.end()..]),
                quantity: Some(caps["qty"].to_string()),
                unit_price: Some(caps["unit"].to_string()),
                stated_amount: None,
                unit_marker: None,
            });
        }

        None
    }

    /// Bare trailing amount: an unlabeled one-off charge. Lines ending in
    /// `@<n>`/`×<n>` carry a unit price, not a total, and never match.
    fn match_trailing_amount(&self, line: &str) -> Option<DetailFields> {
        if UNIT_PRICE_TAIL.is_match(line) {
            return None;
        }

        let caps = TRAILING_AMOUNT.captures(line)?;
        let desc = caps["desc"].trim();

        // A lone unmarked number is layout noise, not a charge.
        if caps.name("yen").is_none() && desc.is_empty() {
            return None;
        }

        Some(DetailFields {
            description: desc.to_string(),
            stated_amount: Some(caps["amt"].to_string()),
            ..DetailFields::default()
        })
    }
}

/// Strip a leading ordinal marker (`1 `, `2. `, `(3) `) from a label.
fn strip_ordinal(text: &str) -> &str {
    match ORDINAL_MARKER.find(text) {
        Some(m) => text[m.end()..].trim(),
        None => text.trim(),
    }
}
