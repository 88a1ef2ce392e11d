//! Amount resolution: stated amount pass-through or quantity×unit-price
//! derivation with commercial rounding.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{ExtractError, Result};
use crate::models::item::{DetailFields, HeaderLabel, LineItem};

use super::normalize::{clean_description, normalize_decimal, normalize_numeric};

/// Resolves a recognized detail row into a normalized line item.
pub struct AmountResolver {
    tax_rate: Decimal,
}

impl AmountResolver {
    pub fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }

    /// Resolve one detail row.
    ///
    /// A stated amount passes through verbatim (the source already
    /// includes tax). Otherwise the amount is derived as
    /// `qty × unit × (1 + tax)` with round-half-away-from-zero to whole
    /// currency units. Rows with neither are `AmountUnresolved`.
    pub fn resolve(&self, fields: &DetailFields, header: Option<&HeaderLabel>) -> Result<LineItem> {
        let quantity = fields
            .quantity
            .as_deref()
            .map(normalize_decimal)
            .transpose()?;
        let unit_price = fields
            .unit_price
            .as_deref()
            .map(normalize_numeric)
            .transpose()?;
        let stated = fields
            .stated_amount
            .as_deref()
            .map(normalize_numeric)
            .transpose()?;

        let amount = match (stated, quantity, unit_price) {
            (Some(amount), _, _) => amount,
            (None, Some(qty), Some(unit)) => self.derive(qty, unit, fields)?,
            _ => {
                return Err(ExtractError::AmountUnresolved(fields.description.clone()));
            }
        };

        Ok(LineItem {
            description: self.compose_description(fields, header, quantity, unit_price),
            tax_included_amount: amount,
        })
    }

    fn derive(&self, qty: Decimal, unit: u64, fields: &DetailFields) -> Result<u64> {
        let gross = qty * Decimal::from(unit) * (Decimal::ONE + self.tax_rate);

        // Commercial rounding: half away from zero, not banker's.
        gross
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .ok_or_else(|| ExtractError::AmountUnresolved(fields.description.clone()))
    }

    /// `(header name + " ")? + remainder + (" qty<marker>@unit")?`, with
    /// whitespace collapsed.
    fn compose_description(
        &self,
        fields: &DetailFields,
        header: Option<&HeaderLabel>,
        quantity: Option<Decimal>,
        unit_price: Option<u64>,
    ) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(label) = header {
            parts.push(label.name.clone());
        }

        let remainder = clean_description(&fields.description);
        if !remainder.is_empty() {
            parts.push(remainder);
        }

        if let (Some(qty), Some(unit)) = (quantity, unit_price) {
            let marker = fields.unit_marker.as_deref().unwrap_or("");
            parts.push(format!("{}{}@{}", qty.normalize(), marker, unit));
        }

        parts.join(" ")
    }
}
