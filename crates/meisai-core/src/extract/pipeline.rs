//! Extraction pipeline: a single forward pass over ordered input units.

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::config::ExtractConfig;
use crate::models::item::{InputUnit, LineItem, RawMatch, UnitBody};
use crate::table::{ColumnMap, Table};

use super::header::HeaderTracker;
use super::recognizer::PatternRecognizer;
use super::resolver::AmountResolver;

/// Orchestrates recognizer, header tracker and amount resolver over one
/// document.
///
/// The pipeline holds no per-document state; re-running it on identical
/// input yields identical output.
pub struct ExtractPipeline {
    config: ExtractConfig,
    recognizer: PatternRecognizer,
    resolver: AmountResolver,
}

impl ExtractPipeline {
    pub fn new(config: ExtractConfig) -> Self {
        let recognizer = PatternRecognizer::new(&config);
        let resolver = AmountResolver::new(config.tax_rate);
        Self {
            config,
            recognizer,
            resolver,
        }
    }

    /// Extract line items from an ordered sequence of text lines.
    pub fn extract_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<LineItem> {
        let units = lines
            .iter()
            .enumerate()
            .map(|(pos, line)| InputUnit::text(pos, line.as_ref()));
        self.extract_units(units)
    }

    /// Extract line items from a table with a labeled header row.
    ///
    /// Fails with `NoHeaderColumns` when the header lacks the minimum
    /// required columns; that is the only error that aborts a document.
    pub fn extract_table(&self, table: &Table) -> Result<Vec<LineItem>> {
        let map = ColumnMap::detect(&table.header)?;
        debug!(?map, "detected table columns");

        let units = table
            .rows
            .iter()
            .enumerate()
            .map(|(pos, row)| InputUnit::row(pos, map.project(row)));
        Ok(self.extract_units(units))
    }

    /// Core single-pass loop over pre-built input units.
    ///
    /// Per-unit failures are logged and dropped; one bad row never aborts
    /// the rest of the document. Empty input yields empty output.
    pub fn extract_units(&self, units: impl IntoIterator<Item = InputUnit>) -> Vec<LineItem> {
        let mut tracker = HeaderTracker::new(self.config.header_policy);
        let mut items = Vec::new();

        for unit in units {
            let matched = match &unit.body {
                UnitBody::Text(line) => self.recognizer.classify_line(line, unit.pos),
                UnitBody::Row(cells) => self.recognizer.classify_row(cells, unit.pos),
            };

            match matched {
                RawMatch::NoMatch => {}
                RawMatch::Summary => tracker.observe_summary(),
                RawMatch::Header(label) => tracker.observe_header(label),
                RawMatch::Detail(fields) => {
                    let header = tracker.take_for(unit.pos);
                    match self.resolver.resolve(&fields, header.as_ref()) {
                        Ok(item) => items.push(item),
                        Err(err) => {
                            warn!(pos = unit.pos, %err, "dropping unresolvable unit");
                        }
                    }
                }
            }
        }

        debug!(count = items.len(), "extraction pass complete");
        items
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::HeaderPolicy;
    use pretty_assertions::assert_eq;

    fn pipeline() -> ExtractPipeline {
        ExtractPipeline::new(ExtractConfig::default())
    }

    fn items(lines: &[&str]) -> Vec<(String, u64)> {
        pipeline()
            .extract_lines(lines)
            .into_iter()
            .map(|i| (i.description, i.tax_included_amount))
            .collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let result = items(&["1 部材:", "\"ネジ\" ¥100 10 台 ¥1,000", "2 送料", "¥500"]);
        assert_eq!(
            result,
            vec![
                ("部材 ネジ 10台@100".to_string(), 1100),
                ("送料".to_string(), 500),
            ]
        );
    }

    #[test]
    fn test_summary_rows_never_appear_in_output() {
        let result = items(&[
            "小計 ¥17,100",
            "受入検査作業 57台 @300",
            "消費税 ¥1,710",
            "送料 ¥500",
            "合計 ¥18,810",
        ]);
        assert_eq!(
            result,
            vec![
                ("受入検査作業 57台@300".to_string(), 18810),
                ("送料".to_string(), 500),
            ]
        );
    }

    #[test]
    fn test_detail_with_no_preceding_header_has_no_prefix() {
        let result = items(&["保管費用 ¥2,000"]);
        assert_eq!(result, vec![("保管費用".to_string(), 2000)]);
    }

    #[test]
    fn test_header_consumed_after_first_detail_by_default() {
        let result = items(&["1 部材:", "ネジ ¥100", "ワッシャー ¥50"]);
        assert_eq!(
            result,
            vec![
                ("部材 ネジ".to_string(), 100),
                ("ワッシャー".to_string(), 50),
            ]
        );
    }

    #[test]
    fn test_header_persists_under_persist_policy() {
        let config = ExtractConfig {
            header_policy: HeaderPolicy::PersistUntilNext,
            ..ExtractConfig::default()
        };
        let result: Vec<_> = ExtractPipeline::new(config)
            .extract_lines(&["1 部材:", "ネジ ¥100", "ワッシャー ¥50"])
            .into_iter()
            .map(|i| i.description)
            .collect();
        assert_eq!(result, vec!["部材 ネジ", "部材 ワッシャー"]);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let empty: [&str; 0] = [];
        assert!(pipeline().extract_lines(&empty).is_empty());
        assert!(pipeline().extract_lines(&["", "   "]).is_empty());
    }

    #[test]
    fn test_unresolvable_unit_is_dropped_not_fatal() {
        // "@450" tail: recognized as nothing, the rest still extracts.
        let result = items(&["特急対応 @450", "送料 ¥500"]);
        assert_eq!(result, vec![("送料".to_string(), 500)]);
    }

    #[test]
    fn test_idempotence() {
        let lines = ["1 部材:", "\"ネジ\" ¥100 10 台 ¥1,000", "2 送料", "¥500"];
        let p = pipeline();
        assert_eq!(p.extract_lines(&lines), p.extract_lines(&lines));
    }

    #[test]
    fn test_table_extraction_end_to_end() {
        let rows = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let table = Table {
            header: rows(&["品名", "単価(円)", "数量", "金額(円)", "備考"]),
            rows: vec![
                rows(&["品 名", "", "", "", ""]),
                rows(&["1 PCWL-0410:受入検査作業", "", "", "", ""]),
                rows(&["ネジ", "¥100", "10", "¥1,000", ""]),
                rows(&["小計", "", "", "¥1,000", ""]),
                rows(&["送料", "", "", "¥500", "着払"]),
            ],
        };

        let result: Vec<_> = pipeline()
            .extract_table(&table)
            .unwrap()
            .into_iter()
            .map(|i| (i.description, i.tax_included_amount))
            .collect();

        assert_eq!(
            result,
            vec![
                ("PCWL-0410 ネジ 10台@100".to_string(), 1000),
                ("送料 着払".to_string(), 500),
            ]
        );
    }

    #[test]
    fn test_table_without_required_columns_aborts() {
        let table = Table {
            header: vec!["単価".to_string(), "金額".to_string()],
            rows: vec![],
        };
        assert!(matches!(
            pipeline().extract_table(&table),
            Err(crate::error::ExtractError::NoHeaderColumns { .. })
        ));
    }

    #[test]
    fn test_output_preserves_order_and_duplicates() {
        let result = items(&["送料 ¥500", "送料 ¥500"]);
        assert_eq!(
            result,
            vec![("送料".to_string(), 500), ("送料".to_string(), 500)]
        );
    }
}
