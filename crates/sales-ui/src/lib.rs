//! Terminal dashboard for the sales pipeline.
//!
//! Provides themes, the header and region picker components, the sales and
//! regional charts, the key-insights panel and the event loop, built on
//! [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod insights_view;
pub mod themes;

pub use sales_core as core;
