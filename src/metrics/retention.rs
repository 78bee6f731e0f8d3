//! Cohort retention helpers.
//!
//! An unobserved week is `None` and is never classified. An observed `0.0`
//! is real zero retention and lands in the coolest tier.

use super::tiers::{Classification, Classifier};
use crate::data::{CohortRow, COHORT_WEEKS};
use serde::Serialize;

/// One heatmap cell of a cohort row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RetentionCell {
    pub week: usize,
    pub value: Option<f64>,
    pub classification: Option<Classification>,
}

/// Classify every observed week of `row`.
pub fn classify_row(row: &CohortRow, classifier: &Classifier) -> Vec<RetentionCell> {
    row.weekly_retention
        .iter()
        .enumerate()
        .map(|(week, value)| RetentionCell {
            week,
            value: *value,
            classification: value.map(|v| classifier.classify(v)),
        })
        .collect()
}

/// Mean retention per week across cohorts, counting only observed weeks.
pub fn weekly_average(rows: &[CohortRow]) -> [Option<f64>; COHORT_WEEKS] {
    let mut averages = [None; COHORT_WEEKS];
    for (week, slot) in averages.iter_mut().enumerate() {
        let observed: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.weekly_retention[week])
            .collect();
        if !observed.is_empty() {
            *slot = Some(observed.iter().sum::<f64>() / observed.len() as f64);
        }
    }
    averages
}
