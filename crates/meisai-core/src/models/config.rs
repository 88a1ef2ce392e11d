//! Configuration for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Configuration supplied once per pipeline invocation.
///
/// Nothing in here is inferred from the document itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Tax rate applied to derived amounts (stated amounts are already
    /// tax-included).
    pub tax_rate: Decimal,

    /// How a group header associates with the detail rows that follow it.
    pub header_policy: HeaderPolicy,

    /// Keywords marking aggregation rows (subtotal/total/tax) that must
    /// never appear in output.
    pub summary_keywords: Vec<String>,

    /// Count-unit words recognized in quantity tokens (e.g. 台).
    pub unit_markers: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(10, 2), // 0.10
            header_policy: HeaderPolicy::default(),
            summary_keywords: [
                "合計", "小計", "総計", "消費税", "内税", "外税", "計", "税",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            unit_markers: ["台", "個", "式"].iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ExtractConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }

    /// The unit marker used when recomposing a description for a row whose
    /// source carried no marker (table rows, `@`-separated text rows).
    pub fn default_unit_marker(&self) -> &str {
        self.unit_markers.first().map(String::as_str).unwrap_or("")
    }
}

/// Whether a group header prefixes exactly one following detail row or
/// persists until the next header supersedes it.
///
/// The observed source formats genuinely diverge here, so the policy is
/// configuration rather than a hardcoded assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// The active header is consumed by the first detail (or summary) row
    /// that follows it.
    ConsumeAfterDetail,
    /// The active header persists until a later header replaces it.
    PersistUntilNext,
}

impl Default for HeaderPolicy {
    fn default() -> Self {
        Self::ConsumeAfterDetail
    }
}
