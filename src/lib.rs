//! Analytics dashboard rendering.
//!
//! A [`data::DataSource`] supplies a snapshot, [`dashboard::DashboardBuilder`]
//! derives period deltas and heat tiers from it, and an
//! [`io::OutputWriter`] lays the result out as terminal tables, JSON or
//! Markdown.

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod metrics;
pub mod observability;
pub mod validation;

// Re-export commonly used types
pub use crate::config::{DashboardConfig, Section};
pub use crate::dashboard::{DashboardBuilder, DashboardView, KpiCard, KpiId};
pub use crate::data::{
    CohortRow, DashboardData, DataSource, FileDataSource, StaticDataSource, TimeSeriesPoint,
};
pub use crate::errors::{Error, Result, Violation};
pub use crate::io::{create_writer, OutputFormat, OutputWriter};
pub use crate::metrics::{
    classify, period_delta, Classifier, Delta, HeatTier, Palette, TierStyle, TierThresholds,
};
pub use crate::validation::{run_validation, ViolationValidation};
