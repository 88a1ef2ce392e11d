//! Core data model: input units, recognized matches and output line items.

use serde::{Deserialize, Serialize};

/// One atomic piece of source material, ordered by `pos`.
///
/// Produced by an external collaborator (OCR line splitter or table
/// extractor) and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct InputUnit {
    /// Monotonically increasing position token used for ordering.
    pub pos: usize,
    /// The unit payload.
    pub body: UnitBody,
}

impl InputUnit {
    /// Create a text-line unit.
    pub fn text(pos: usize, line: impl Into<String>) -> Self {
        Self {
            pos,
            body: UnitBody::Text(line.into()),
        }
    }

    /// Create a table-row unit.
    pub fn row(pos: usize, cells: RowCells) -> Self {
        Self {
            pos,
            body: UnitBody::Row(cells),
        }
    }
}

/// Payload of an input unit: a raw text line, or a table row whose cells
/// have already been projected onto column roles.
#[derive(Debug, Clone)]
pub enum UnitBody {
    /// A line of text in document reading order.
    Text(String),
    /// A table row with role-projected cells.
    Row(RowCells),
}

/// Cells of one table row, keyed by column role.
///
/// An empty cell and a missing column both surface as `None`.
#[derive(Debug, Clone, Default)]
pub struct RowCells {
    /// Item name cell.
    pub name: String,
    /// Unit price cell.
    pub unit_price: Option<String>,
    /// Quantity cell.
    pub quantity: Option<String>,
    /// Stated amount cell.
    pub amount: Option<String>,
    /// Remarks cell.
    pub remarks: Option<String>,
}

/// A recognized group header.
///
/// Created once per recognized header row and never mutated; stays the
/// active header until superseded (or consumed, depending on policy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLabel {
    /// Canonical group name, trimmed of ordinal marker and punctuation.
    pub name: String,
    /// Position token of the unit the header came from.
    pub pos: usize,
}

/// Result of classifying one input unit against the pattern set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMatch {
    /// The unit matched no pattern and is ignored.
    NoMatch,
    /// A subtotal/total/tax aggregation row, excluded from output.
    Summary,
    /// A group header row.
    Header(HeaderLabel),
    /// An itemized detail row with extracted raw field substrings.
    Detail(DetailFields),
}

/// Raw field substrings extracted from a detail row.
///
/// Fields absent from the matched surface pattern are `None`; the amount
/// resolver is the only place that parses them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    /// Descriptive remainder after field extraction, pre-cleanup.
    pub description: String,
    /// Raw quantity token, possibly fractional.
    pub quantity: Option<String>,
    /// Raw unit price token.
    pub unit_price: Option<String>,
    /// Raw stated amount token (already tax-included in the source).
    pub stated_amount: Option<String>,
    /// Unit marker that matched (e.g. 台), used when recomposing the
    /// description of a derived row.
    pub unit_marker: Option<String>,
}

/// The final normalized output unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description, optionally prefixed with the group header name.
    pub description: String,
    /// Tax-included amount in whole currency units.
    pub tax_included_amount: u64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, tax_included_amount: u64) -> Self {
        Self {
            description: description.into(),
            tax_included_amount,
        }
    }
}
