//! Line-item extraction engine.
//!
//! Data flow: ordered input units → pattern recognizer (stateless
//! classification) → header tracker (stateful association) → amount
//! resolver → ordered line items.

mod header;
pub mod normalize;
mod patterns;
mod pipeline;
mod recognizer;
mod resolver;

pub use header::HeaderTracker;
pub use pipeline::ExtractPipeline;
pub use recognizer::PatternRecognizer;
pub use resolver::AmountResolver;
