//! Data layer for the sales dashboard.
//!
//! Discovers and reads the raw daily extracts, normalizes them into
//! [`SalesRecord`]s, persists and reloads the normalized artifact, and runs
//! the aggregation and before/after comparison the dashboard displays.
//!
//! [`SalesRecord`]: sales_core::models::SalesRecord

pub mod aggregator;
pub mod analysis;
pub mod artifact;
pub mod normalizer;
pub mod pipeline;
pub mod reader;

pub use sales_core as core;
