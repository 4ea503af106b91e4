//! Core domain layer for the sales dashboard.
//!
//! Holds the sales record models, the error taxonomy, the validated
//! price/quantity/date parsers used during normalization, presentation
//! formatting helpers and the command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod pricing;
pub mod settings;
pub mod time_utils;
