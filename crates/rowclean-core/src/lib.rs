//! rowclean core - CSV row normalization and deduplication engine
//!
//! Takes loosely formatted customer CSV text, scrubs the recognised columns,
//! drops rows whose phone number was already seen, and renders the result.
//!
//! # Architecture
//!
//! ```text
//! CSV text → Parser → Table → Role resolution → Cleaning pipeline → Serializer → CSV text
//!                                                  ↓
//!                                     Sanitizers + Date normalizer
//! ```
//!
//! # Recognised columns
//!
//! `Number`, `Name`, `Gender`, `Points`, `Birthday` and `Anniversary`, matched
//! exactly and case-sensitively. With no `Number` column the first column is
//! used as the phone number and dedup key.
//!
//! # Guarantees
//!
//! - **Stateless**: every call owns its state; calls may run concurrently
//! - **Lossless on ambiguity**: values that cannot be normalized pass through
//! - **Stable**: output header equals input header, row order is preserved
//! - **Idempotent**: cleaning cleaned output changes nothing

pub mod date;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod roles;
pub mod sanitize;
pub mod serializer;

pub use error::{Error, Result};
pub use parser::table::*;
pub use pipeline::{CleanMode, CleanOptions, CleanOutcome, CleanReport};
pub use serializer::serialize;

/// Version of the engine crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse and clean CSV text with the full rule set
///
/// # Errors
/// Returns `EmptyInput` for text with no non-blank lines and `NoHeaders`
/// when the header line names no columns.
pub fn clean(raw: &str) -> Result<Table> {
    clean_with(raw, &CleanOptions::default()).map(|outcome| outcome.table)
}

/// Parse and clean CSV text, returning the run report alongside the table
pub fn clean_with(raw: &str, options: &CleanOptions) -> Result<CleanOutcome> {
    let table = parser::parse(raw)?;
    Ok(pipeline::clean_table(table, options))
}
