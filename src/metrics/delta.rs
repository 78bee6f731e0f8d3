//! Period-over-period delta calculation.
//!
//! A delta compares the last observation of a series against the one before
//! it. Short series and zero baselines never produce NaN or infinite values:
//! they resolve to an absent delta, and [`DeltaOutcome`] records which case
//! applied.

use crate::data::TimeSeriesPoint;
use serde::{Deserialize, Serialize};

/// Percentage change between the last two observations of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Rounded absolute percentage change.
    pub magnitude: u32,
    /// `true` when the last value is greater than or equal to the previous one.
    pub positive: bool,
}

impl Delta {
    /// Signed percentage for display, e.g. `+11%` or `-2%`.
    pub fn signed_label(&self) -> String {
        let sign = if self.positive { '+' } else { '-' };
        format!("{sign}{}%", self.magnitude)
    }
}

/// Why a delta is or is not available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    Available(Delta),
    /// Fewer than two observations.
    InsufficientHistory,
    /// The previous observation is zero.
    ZeroBaseline,
    /// One of the two observations is NaN or infinite.
    NonFinite,
    /// The change is too large to express as a percentage.
    Overflow,
    /// One of the two periods has no defined value, e.g. a per-user ratio
    /// over a period without users.
    Undefined,
}

impl DeltaOutcome {
    pub fn delta(self) -> Option<Delta> {
        match self {
            Self::Available(delta) => Some(delta),
            _ => None,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Available(_) => "available",
            Self::InsufficientHistory => "fewer than two observations",
            Self::ZeroBaseline => "previous observation is zero",
            Self::NonFinite => "observation is not a finite number",
            Self::Overflow => "change is too large to represent",
            Self::Undefined => "observation is undefined for the period",
        }
    }
}

/// Classify the last two values of `values` into a [`DeltaOutcome`].
///
/// A negative baseline is divided by its absolute value so the magnitude
/// stays non-negative.
pub fn delta_outcome(values: &[f64]) -> DeltaOutcome {
    let [.., prev, last] = values else {
        return DeltaOutcome::InsufficientHistory;
    };
    let (prev, last) = (*prev, *last);

    if !prev.is_finite() || !last.is_finite() {
        return DeltaOutcome::NonFinite;
    }
    if prev == 0.0 {
        return DeltaOutcome::ZeroBaseline;
    }

    let ratio = ((last - prev).abs() / prev.abs() * 100.0).round();
    if !ratio.is_finite() || ratio > f64::from(u32::MAX) {
        return DeltaOutcome::Overflow;
    }

    DeltaOutcome::Available(Delta {
        magnitude: ratio as u32,
        positive: last >= prev,
    })
}

/// Like [`delta_outcome`] over a series whose periods may lack a value.
///
/// Only the last two periods count: when either is `None` the outcome is
/// [`DeltaOutcome::Undefined`], never a delta between older periods.
pub fn sparse_delta_outcome(values: &[Option<f64>]) -> DeltaOutcome {
    match values {
        [.., Some(prev), Some(last)] => delta_outcome(&[*prev, *last]),
        [_, _, ..] => DeltaOutcome::Undefined,
        _ => DeltaOutcome::InsufficientHistory,
    }
}

/// Percentage change between the last two values, absent when undefined.
///
/// # Examples
///
/// ```
/// use kpiboard::metrics::period_delta;
///
/// let delta = period_delta(&[8100.0, 9000.0]).unwrap();
/// assert_eq!(delta.magnitude, 11);
/// assert!(delta.positive);
///
/// assert!(period_delta(&[100.0]).is_none());
/// assert!(period_delta(&[0.0, 5.0]).is_none());
/// ```
pub fn period_delta(values: &[f64]) -> Option<Delta> {
    delta_outcome(values).delta()
}

/// Series of the metrics a time series point carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesMetric {
    Dau,
    Mrr,
}

impl SeriesMetric {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dau => "Daily Active Users",
            Self::Mrr => "Monthly Recurring Revenue",
        }
    }

    pub fn value(&self, point: &TimeSeriesPoint) -> f64 {
        match self {
            Self::Dau => point.dau as f64,
            Self::Mrr => point.mrr,
        }
    }
}

/// Extract one metric from a time series as a plain value vector.
pub fn series_values(points: &[TimeSeriesPoint], metric: SeriesMetric) -> Vec<f64> {
    points.iter().map(|p| metric.value(p)).collect()
}

/// Delta outcome of one metric across a time series.
pub fn series_delta(points: &[TimeSeriesPoint], metric: SeriesMetric) -> DeltaOutcome {
    // Only the tail matters.
    let tail = &points[points.len().saturating_sub(2)..];
    delta_outcome(&series_values(tail, metric))
}
