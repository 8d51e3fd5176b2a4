//! Descriptive aggregates over a filtered view of listings.

pub mod report;
pub mod stats;
