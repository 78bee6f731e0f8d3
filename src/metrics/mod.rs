//! Derived metrics computed at render time.
//!
//! Everything in here is a pure function over in-memory slices.

pub mod delta;
pub mod retention;
pub mod tiers;

pub use delta::{
    delta_outcome, period_delta, series_delta, series_values, sparse_delta_outcome, Delta,
    DeltaOutcome, SeriesMetric,
};
pub use retention::{classify_row, weekly_average, RetentionCell};
pub use tiers::{
    classify, Classification, Classifier, HeatTier, Palette, Rgb, TierStyle, TierThresholds,
};

/// `part` as a percentage of `total`, absent when `total` is not positive.
pub fn percent_of(part: f64, total: f64) -> Option<f64> {
    if total > 0.0 && part.is_finite() && total.is_finite() {
        Some(part / total * 100.0)
    } else {
        None
    }
}
