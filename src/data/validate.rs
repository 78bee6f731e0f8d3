//! Snapshot validation with error accumulation.
//!
//! Every violation is collected in one pass so a user fixing a snapshot file
//! sees all problems at once instead of one per run.

use super::model::*;
use crate::errors::Violation;
use crate::validation::{combine_validations, from_violations, ViolationValidation};
use std::collections::HashSet;
use tracing::warn;

/// Allowed drift of the payment share total away from 100%.
pub const SHARE_TOTAL_TOLERANCE: f64 = 0.5;

/// Validate a snapshot, accumulating the violations of every table.
pub fn validate_snapshot(data: &DashboardData) -> ViolationValidation<()> {
    combine_validations([
        validate_time_series(&data.time_series),
        validate_cohorts(&data.cohorts),
        validate_queries(&data.queries),
        validate_regions(&data.regions),
        validate_payment_methods(&data.payment_methods),
    ])
}

fn is_percentage(value: f64) -> bool {
    (0.0..=100.0).contains(&value)
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn validate_time_series(points: &[TimeSeriesPoint]) -> ViolationValidation<()> {
    let mut violations = Vec::new();
    let mut seen = HashSet::new();
    for (i, point) in points.iter().enumerate() {
        if point.date.trim().is_empty() {
            violations.push(Violation::new(
                format!("time_series[{i}].date"),
                "date label is empty",
            ));
        } else if !seen.insert(point.date.as_str()) {
            violations.push(Violation::new(
                format!("time_series[{i}].date"),
                format!("duplicate date '{}'", point.date),
            ));
        }
        if !is_non_negative(point.mrr) {
            violations.push(Violation::new(
                format!("time_series[{i}].mrr"),
                format!("must be a non-negative amount, got {}", point.mrr),
            ));
        }
    }

    from_violations(violations)
}

fn validate_cohorts(rows: &[CohortRow]) -> ViolationValidation<()> {
    let mut violations = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if row.cohort.trim().is_empty() {
            violations.push(Violation::new(
                format!("cohorts[{i}].cohort"),
                "cohort label is empty",
            ));
        }

        let mut first_gap = None;
        for (week, value) in row.weekly_retention.iter().enumerate() {
            match (value, first_gap) {
                (None, None) => first_gap = Some(week),
                (Some(v), _) if !is_percentage(*v) => violations.push(Violation::new(
                    format!("cohorts[{i}].weekly_retention[{week}]"),
                    format!("retention must lie in [0, 100], got {v}"),
                )),
                (Some(_), Some(gap)) => violations.push(Violation::new(
                    format!("cohorts[{i}].weekly_retention[{week}]"),
                    format!("observed week follows unobserved week {gap}"),
                )),
                _ => {}
            }
        }
    }

    from_violations(violations)
}

fn validate_queries(queries: &[QueryStat]) -> ViolationValidation<()> {
    let mut violations = Vec::new();
    for (i, query) in queries.iter().enumerate() {
        if !is_non_negative(query.avg_latency_ms) {
            violations.push(Violation::new(
                format!("queries[{i}].avg_latency_ms"),
                format!("must be non-negative, got {}", query.avg_latency_ms),
            ));
        }
        if !is_percentage(query.error_rate) {
            violations.push(Violation::new(
                format!("queries[{i}].error_rate"),
                format!("must lie in [0, 100], got {}", query.error_rate),
            ));
        }
    }

    from_violations(violations)
}

fn validate_regions(regions: &[RegionalRevenue]) -> ViolationValidation<()> {
    let mut violations = Vec::new();
    for (i, region) in regions.iter().enumerate() {
        if !is_non_negative(region.revenue) {
            violations.push(Violation::new(
                format!("regions[{i}].revenue"),
                format!("must be a non-negative amount, got {}", region.revenue),
            ));
        }
        if !region.growth.is_finite() {
            violations.push(Violation::new(
                format!("regions[{i}].growth"),
                "must be a finite percentage",
            ));
        }
    }

    from_violations(violations)
}

fn validate_payment_methods(methods: &[PaymentMethodShare]) -> ViolationValidation<()> {
    let mut violations = Vec::new();
    let mut all_valid = true;
    for (i, method) in methods.iter().enumerate() {
        if !is_percentage(method.share) {
            all_valid = false;
            violations.push(Violation::new(
                format!("payment_methods[{i}].share"),
                format!("must lie in [0, 100], got {}", method.share),
            ));
        }
    }

    // Rounding in upstream exports leaves small drift, so this only warns.
    if all_valid && !methods.is_empty() {
        let total: f64 = methods.iter().map(|m| m.share).sum();
        if (total - 100.0).abs() > SHARE_TOTAL_TOLERANCE {
            warn!(total, "Payment method shares do not sum to 100%");
        }
    }

    from_violations(violations)
}
