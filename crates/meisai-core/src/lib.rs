//! Core library for invoice line-item extraction.
//!
//! This crate converts one page of semi-structured invoice material —
//! OCR text lines or an extracted table — into a normalized sequence of
//! (description, tax-included amount) line items:
//! - pattern recognition over an ordered, overlapping pattern set
//! - group-header association with a configurable consume/persist policy
//! - stated-amount pass-through or quantity×unit-price derivation with
//!   commercial rounding
//!
//! Document acquisition (OCR, PDF parsing) and output serialization are
//! the caller's concern; the engine performs no I/O.

pub mod error;
pub mod extract;
pub mod models;
pub mod table;

pub use error::{ExtractError, Result};
pub use extract::{AmountResolver, ExtractPipeline, HeaderTracker, PatternRecognizer};
pub use models::config::{ExtractConfig, HeaderPolicy};
pub use models::item::{DetailFields, HeaderLabel, InputUnit, LineItem, RawMatch, RowCells, UnitBody};
pub use table::{ColumnMap, ColumnRole, Table};
