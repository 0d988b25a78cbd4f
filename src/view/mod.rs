//! Derived views over the collection.

/// Filtered/sorted projection per the active query parameters.
pub mod filter;
/// Aggregate statistics over the full collection.
pub mod stats;
