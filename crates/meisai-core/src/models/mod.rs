//! Data models for line-item extraction.

pub mod config;
pub mod item;

pub use config::{ExtractConfig, HeaderPolicy};
pub use item::{DetailFields, HeaderLabel, InputUnit, LineItem, RawMatch, RowCells, UnitBody};
