//! Table input path: fuzzy column detection and row projection.
//!
//! OCR and table extractors truncate or split column labels ("品 名",
//! "単"), so labels are matched by partial-character containment rather
//! than equality.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, Result};
use crate::extract::normalize::nfkc_fold;
use crate::models::item::RowCells;

/// A table of cells as produced by an external table extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Column labels from the header row.
    pub header: Vec<String>,
    /// Data rows in source order.
    pub rows: Vec<Vec<String>>,
}

/// Roles a column can play in an invoice table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Item name (品名).
    ItemName,
    /// Unit price (単価).
    UnitPrice,
    /// Quantity (数量).
    Quantity,
    /// Stated amount (金額).
    Amount,
    /// Remarks (備考).
    Remarks,
}

impl ColumnRole {
    /// Characters whose presence in a label identifies the role; OCR may
    /// keep only the first character of a label.
    fn marker_chars(self) -> &'static [char] {
        match self {
            Self::ItemName => &['品'],
            Self::UnitPrice => &['単'],
            Self::Quantity => &['数'],
            Self::Amount => &['金'],
            Self::Remarks => &['備'],
        }
    }
}

/// Mapping from column roles to column indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    /// Item name column (required).
    pub item_name: usize,
    /// Unit price column.
    pub unit_price: Option<usize>,
    /// Quantity column.
    pub quantity: Option<usize>,
    /// Stated amount column.
    pub amount: Option<usize>,
    /// Remarks column.
    pub remarks: Option<usize>,
}

impl ColumnMap {
    /// Detect column roles from header labels.
    ///
    /// Minimum required columns: item name, plus either an amount column
    /// or both unit-price and quantity columns. Anything less is a
    /// structural failure for the whole document.
    pub fn detect(header: &[String]) -> Result<Self> {
        let find = |role: ColumnRole| {
            header.iter().position(|label| {
                let folded = nfkc_fold(label);
                role.marker_chars().iter().any(|c| folded.contains(*c))
            })
        };

        let item_name = find(ColumnRole::ItemName);
        let unit_price = find(ColumnRole::UnitPrice);
        let quantity = find(ColumnRole::Quantity);
        let amount = find(ColumnRole::Amount);
        let remarks = find(ColumnRole::Remarks);

        debug!(?item_name, ?unit_price, ?quantity, ?amount, "column detection");

        let missing = || ExtractError::NoHeaderColumns {
            found: header.join(","),
        };

        let item_name = item_name.ok_or_else(missing)?;
        if amount.is_none() && (unit_price.is_none() || quantity.is_none()) {
            return Err(missing());
        }

        Ok(Self {
            item_name,
            unit_price,
            quantity,
            amount,
            remarks,
        })
    }

    /// Project a raw cell row onto column roles.
    pub fn project(&self, row: &[String]) -> RowCells {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        RowCells {
            name: row
                .get(self.item_name)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            unit_price: cell(self.unit_price),
            quantity: cell(self.quantity),
            amount: cell(self.amount),
            remarks: cell(self.remarks),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_exact_labels() {
        let map = ColumnMap::detect(&labels(&["品名", "単価(円)", "数量", "金額(円)", "備考"]))
            .unwrap();
        assert_eq!(map.item_name, 0);
        assert_eq!(map.unit_price, Some(1));
        assert_eq!(map.quantity, Some(2));
        assert_eq!(map.amount, Some(3));
        assert_eq!(map.remarks, Some(4));
    }

    #[test]
    fn test_detect_truncated_labels() {
        // OCR kept only the first character of each label.
        let map = ColumnMap::detect(&labels(&["品 名", "単", "数", "金", "備"])).unwrap();
        assert_eq!(map.item_name, 0);
        assert_eq!(map.amount, Some(3));
    }

    #[test]
    fn test_detect_without_amount_column() {
        // Unit price + quantity is enough to derive amounts.
        let map = ColumnMap::detect(&labels(&["品名", "単価", "数量"])).unwrap();
        assert_eq!(map.amount, None);
        assert_eq!(map.unit_price, Some(1));
    }

    #[test]
    fn test_detect_missing_columns_is_structural_error() {
        assert!(matches!(
            ColumnMap::detect(&labels(&["単価", "金額"])),
            Err(ExtractError::NoHeaderColumns { .. })
        ));
        assert!(matches!(
            ColumnMap::detect(&labels(&["品名", "数量"])),
            Err(ExtractError::NoHeaderColumns { .. })
        ));
        assert!(matches!(
            ColumnMap::detect(&[]),
            Err(ExtractError::NoHeaderColumns { .. })
        ));
    }

    #[test]
    fn test_project_short_row() {
        let map = ColumnMap::detect(&labels(&["品名", "単価", "数量", "金額"])).unwrap();
        let cells = map.project(&labels(&["ネジ", "¥100"]));
        assert_eq!(cells.name, "ネジ");
        assert_eq!(cells.unit_price.as_deref(), Some("¥100"));
        assert_eq!(cells.quantity, None);
        assert_eq!(cells.amount, None);
    }
}
