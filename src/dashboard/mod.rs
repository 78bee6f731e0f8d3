//! Turns a snapshot and configuration into a [`DashboardView`].

pub mod view;

pub use view::{
    DashboardView, HeatmapRow, JobSummary, JobsPanel, KpiCard, KpiId, LegendEntry, RegionRow,
    RetentionHeatmap, TagRow, TrendRow,
};

use crate::config::{DashboardConfig, DisplayConfig, Section};
use crate::data::{DashboardData, JobState, JobStatus, TimeSeriesPoint, COHORT_WEEKS};
use crate::formatting::{format_count, format_currency};
use crate::metrics::{
    classify_row, percent_of, series_delta, sparse_delta_outcome, weekly_average, Classifier,
    DeltaOutcome, HeatTier, RetentionCell, SeriesMetric, TierThresholds,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Builds views with a fixed classifier and display configuration.
#[derive(Debug, Clone)]
pub struct DashboardBuilder {
    classifier: Classifier,
    display: DisplayConfig,
    source: String,
}

impl DashboardBuilder {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            classifier: config.classifier(),
            display: config.display(),
            source: "unknown".to_string(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Restrict and reorder sections, overriding the configured list.
    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        if !sections.is_empty() {
            self.display.sections = sections;
        }
        self
    }

    pub fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.classifier = Classifier::new(thresholds, *self.classifier.palette());
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn build(&self, data: &DashboardData) -> DashboardView {
        self.build_at(data, Utc::now())
    }

    pub fn build_at(&self, data: &DashboardData, generated_at: DateTime<Utc>) -> DashboardView {
        let wants = |section: Section| self.display.sections.contains(&section);

        let view = DashboardView {
            generated_at,
            source: self.source.clone(),
            currency_symbol: self.display.currency_symbol.clone(),
            sections: self.display.sections.clone(),
            kpis: wants(Section::Kpis).then(|| self.kpi_cards(data)),
            trend: wants(Section::Trend).then(|| self.trend_rows(&data.time_series)),
            retention: wants(Section::Retention).then(|| self.retention_heatmap(data)),
            queries: wants(Section::Queries).then(|| data.queries.clone()),
            tags: wants(Section::Tags).then(|| tag_rows(data)),
            regions: wants(Section::Regions).then(|| region_rows(data)),
            payments: wants(Section::Payments).then(|| data.payment_methods.clone()),
            jobs: wants(Section::Jobs).then(|| jobs_panel(&data.jobs)),
        };

        info!(
            source = %self.source,
            sections = view.sections.len(),
            "Built dashboard view"
        );
        view
    }

    fn kpi_cards(&self, data: &DashboardData) -> Vec<KpiCard> {
        let series = &data.time_series;
        let latest = data.latest_point();
        let symbol = &self.display.currency_symbol;

        let dau = latest.map(|p| p.dau);
        let mrr = latest.map(|p| p.mrr);
        let calls: u64 = data.queries.iter().map(|q| q.calls).sum();

        // Periods without users have no revenue per user
        let arpu_series: Vec<Option<f64>> = series.iter().map(revenue_per_user).collect();
        let arpu = arpu_series.last().copied().flatten();

        vec![
            kpi_card(
                KpiId::DailyActiveUsers,
                SeriesMetric::Dau.label(),
                dau.map(|v| (v as f64, format_count(v))),
                series_delta(series, SeriesMetric::Dau),
            ),
            kpi_card(
                KpiId::MonthlyRecurringRevenue,
                SeriesMetric::Mrr.label(),
                mrr.map(|v| (v, format_currency(v, symbol))),
                series_delta(series, SeriesMetric::Mrr),
            ),
            kpi_card(
                KpiId::RevenuePerUser,
                "Revenue per User",
                arpu.map(|v| (v, format!("{symbol}{v:.2}"))),
                sparse_delta_outcome(&arpu_series),
            ),
            kpi_card(
                KpiId::QueryVolume,
                "Query Volume",
                Some((calls as f64, format_count(calls))),
                DeltaOutcome::InsufficientHistory,
            ),
        ]
    }

    fn trend_rows(&self, points: &[TimeSeriesPoint]) -> Vec<TrendRow> {
        let width = self.display.chart_width;
        let max_dau = points.iter().map(|p| p.dau as f64).fold(0.0, f64::max);
        let max_mrr = points.iter().map(|p| p.mrr).fold(0.0, f64::max);

        points
            .iter()
            .map(|p| TrendRow {
                date: p.date.clone(),
                dau: p.dau,
                mrr: p.mrr,
                dau_bar: bar_length(p.dau as f64, max_dau, width),
                mrr_bar: bar_length(p.mrr, max_mrr, width),
            })
            .collect()
    }

    fn retention_heatmap(&self, data: &DashboardData) -> RetentionHeatmap {
        let rows = data
            .cohorts
            .iter()
            .map(|row| HeatmapRow {
                label: row.cohort.clone(),
                cells: classify_row(row, &self.classifier),
            })
            .collect();

        let average_cells = weekly_average(&data.cohorts)
            .iter()
            .enumerate()
            .map(|(week, value)| RetentionCell {
                week,
                value: *value,
                classification: value.map(|v| self.classifier.classify(v)),
            })
            .collect();

        RetentionHeatmap {
            weeks: COHORT_WEEKS,
            rows,
            average: HeatmapRow {
                label: "Average".to_string(),
                cells: average_cells,
            },
            legend: legend(&self.classifier),
        }
    }
}

/// Card for `label`; `current` pairs the latest value with its display text.
fn kpi_card(
    id: KpiId,
    label: &str,
    current: Option<(f64, String)>,
    outcome: DeltaOutcome,
) -> KpiCard {
    let (value, display) = match current {
        Some((value, display)) => (Some(value), display),
        None => (None, "n/a".to_string()),
    };
    let delta_unavailable = match outcome {
        DeltaOutcome::Available(_) => None,
        other => {
            debug!(kpi = label, reason = other.reason(), "Delta unavailable");
            Some(other.reason().to_string())
        }
    };
    KpiCard {
        id,
        label: label.to_string(),
        value,
        display,
        delta: outcome.delta(),
        delta_unavailable,
    }
}

fn revenue_per_user(point: &TimeSeriesPoint) -> Option<f64> {
    (point.dau > 0).then(|| point.mrr / point.dau as f64)
}

/// Length of a bar for `value` when `max` fills `width` characters.
fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

fn legend(classifier: &Classifier) -> Vec<LegendEntry> {
    let t = classifier.thresholds();
    HeatTier::ALL
        .iter()
        .map(|&tier| {
            let range = match tier {
                HeatTier::Tier1 => format!("< {}", t.tier2),
                HeatTier::Tier2 => format!("{}-{}", t.tier2, t.tier3),
                HeatTier::Tier3 => format!("{}-{}", t.tier3, t.tier4),
                HeatTier::Tier4 => format!(">= {}", t.tier4),
            };
            LegendEntry {
                tier,
                range,
                style: classifier.palette().style(tier),
            }
        })
        .collect()
}

fn tag_rows(data: &DashboardData) -> Vec<TagRow> {
    let total: u64 = data.tags.iter().map(|t| t.count).sum();
    let mut rows: Vec<TagRow> = data
        .tags
        .iter()
        .map(|t| TagRow {
            tag: t.tag.clone(),
            count: t.count,
            share: percent_of(t.count as f64, total as f64),
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

fn region_rows(data: &DashboardData) -> Vec<RegionRow> {
    let total: f64 = data.regions.iter().map(|r| r.revenue).sum();
    data.regions
        .iter()
        .map(|r| RegionRow {
            region: r.region.clone(),
            revenue: r.revenue,
            share: percent_of(r.revenue, total),
            growth: r.growth,
        })
        .collect()
}

fn jobs_panel(jobs: &[JobStatus]) -> JobsPanel {
    let summary = jobs
        .iter()
        .fold(JobSummary::default(), |mut summary, job| {
            match job.state {
                JobState::Succeeded => summary.succeeded += 1,
                JobState::Running => summary.running += 1,
                JobState::Failed => summary.failed += 1,
                JobState::Queued => summary.queued += 1,
            }
            summary
        });
    JobsPanel {
        summary,
        jobs: jobs.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_snapshot;
    use crate::metrics::Delta;
    use pretty_assertions::assert_eq;

    fn build(config: &DashboardConfig) -> DashboardView {
        DashboardBuilder::new(config)
            .with_source("test")
            .build(&builtin_snapshot())
    }

    #[test]
    fn dau_card_carries_latest_value_and_delta() {
        let view = build(&DashboardConfig::default());
        let dau = view.kpi(KpiId::DailyActiveUsers).unwrap();
        assert_eq!(dau.value, Some(9000.0));
        assert_eq!(dau.display, "9,000");
        assert_eq!(
            dau.delta,
            Some(Delta {
                magnitude: 11,
                positive: true
            })
        );
        assert!(dau.delta_unavailable.is_none());
    }

    #[test]
    fn mrr_card_uses_currency_format() {
        let view = build(&DashboardConfig::default());
        let mrr = view.kpi(KpiId::MonthlyRecurringRevenue).unwrap();
        assert_eq!(mrr.display, "$46,900");
        // 43,600 -> 46,900
        assert_eq!(mrr.delta.unwrap().magnitude, 8);
    }

    #[test]
    fn query_volume_has_no_history() {
        let view = build(&DashboardConfig::default());
        let card = view.kpi(KpiId::QueryVolume).unwrap();
        assert!(card.delta.is_none());
        assert_eq!(
            card.delta_unavailable.as_deref(),
            Some("fewer than two observations")
        );
    }

    #[test]
    fn single_point_series_has_no_delta() {
        let mut data = builtin_snapshot();
        data.time_series.truncate(1);
        let view = DashboardBuilder::new(&DashboardConfig::default()).build(&data);
        assert!(view.kpi(KpiId::DailyActiveUsers).unwrap().delta.is_none());
    }

    #[test]
    fn zero_previous_dau_has_no_delta() {
        let mut data = builtin_snapshot();
        let n = data.time_series.len();
        data.time_series[n - 2].dau = 0;
        let view = DashboardBuilder::new(&DashboardConfig::default()).build(&data);
        let card = view.kpi(KpiId::DailyActiveUsers).unwrap();
        assert!(card.delta.is_none());
        assert_eq!(
            card.delta_unavailable.as_deref(),
            Some("previous observation is zero")
        );
    }

    #[test]
    fn revenue_per_user_without_latest_users_is_absent() {
        let mut data = builtin_snapshot();
        let n = data.time_series.len();
        data.time_series[n - 1].dau = 0;
        let view = DashboardBuilder::new(&DashboardConfig::default()).build(&data);

        let card = view.kpi(KpiId::RevenuePerUser).unwrap();
        assert_eq!(card.value, None);
        assert_eq!(card.display, "n/a");
        assert!(card.delta.is_none());
        assert_eq!(
            card.delta_unavailable.as_deref(),
            Some("observation is undefined for the period")
        );
    }

    #[test]
    fn revenue_per_user_compares_last_two_periods() {
        let view = build(&DashboardConfig::default());
        let card = view.kpi(KpiId::RevenuePerUser).unwrap();
        // 43,600 / 8,100 = 5.383 -> 46,900 / 9,000 = 5.211
        assert_eq!(card.display, "$5.21");
        let delta = card.delta.unwrap();
        assert_eq!((delta.magnitude, delta.positive), (3, false));
    }

    #[test]
    fn empty_snapshot_builds() {
        let view =
            DashboardBuilder::new(&DashboardConfig::default()).build(&DashboardData::default());
        let dau = view.kpi(KpiId::DailyActiveUsers).unwrap();
        assert_eq!(dau.value, None);
        assert_eq!(dau.display, "n/a");
        assert!(dau.delta.is_none());
        assert!(view.trend.unwrap().is_empty());
        assert!(view.retention.unwrap().rows.is_empty());
    }

    #[test]
    fn heatmap_leaves_unobserved_weeks_unclassified() {
        let view = build(&DashboardConfig::default());
        let heatmap = view.retention.unwrap();
        let newest = heatmap.rows.last().unwrap();
        assert_eq!(newest.cells[0].classification.unwrap().tier, HeatTier::Tier4);
        assert!(newest.cells[1..].iter().all(|c| c.classification.is_none()));

        let oldest = &heatmap.rows[0];
        let tiers: Vec<HeatTier> = oldest
            .cells
            .iter()
            .map(|c| c.classification.unwrap().tier)
            .collect();
        assert_eq!(
            tiers,
            vec![
                HeatTier::Tier4,
                HeatTier::Tier4,
                HeatTier::Tier3,
                HeatTier::Tier3,
                HeatTier::Tier3,
                HeatTier::Tier3,
                HeatTier::Tier3,
                HeatTier::Tier2,
            ]
        );
    }

    #[test]
    fn legend_describes_configured_cutoffs() {
        let view = build(&DashboardConfig::default());
        let ranges: Vec<String> = view
            .retention
            .unwrap()
            .legend
            .into_iter()
            .map(|e| e.range)
            .collect();
        assert_eq!(ranges, vec!["< 15", "15-30", "30-50", ">= 50"]);
    }

    #[test]
    fn threshold_override_reclassifies_cells() {
        let view = DashboardBuilder::new(&DashboardConfig::default())
            .with_thresholds(TierThresholds::lenient())
            .build(&builtin_snapshot());
        let oldest = &view.retention.unwrap().rows[0];
        // 29.1 is tier 3 under lenient cutoffs
        assert_eq!(oldest.cells[7].classification.unwrap().tier, HeatTier::Tier3);
    }

    #[test]
    fn section_selection_drops_other_sections() {
        let view = DashboardBuilder::new(&DashboardConfig::default())
            .with_sections(vec![Section::Jobs, Section::Kpis])
            .build(&builtin_snapshot());
        assert_eq!(view.sections, vec![Section::Jobs, Section::Kpis]);
        assert!(view.kpis.is_some());
        assert!(view.jobs.is_some());
        assert!(view.trend.is_none());
        assert!(view.retention.is_none());
    }

    #[test]
    fn trend_bars_scale_to_chart_width() {
        let view = build(&DashboardConfig::default());
        let trend = view.trend.unwrap();
        assert_eq!(trend.last().unwrap().dau_bar, 40);
        assert_eq!(trend.last().unwrap().mrr_bar, 40);
        // 4200 / 9000 * 40 = 18.67
        assert_eq!(trend[0].dau_bar, 19);
    }

    #[test]
    fn tags_sorted_with_shares() {
        let view = build(&DashboardConfig::default());
        let tags = view.tags.unwrap();
        assert_eq!(tags[0].tag, "onboarding");
        let total: f64 = tags.iter().filter_map(|t| t.share).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn job_summary_counts_states() {
        let view = build(&DashboardConfig::default());
        assert_eq!(
            view.jobs.unwrap().summary,
            JobSummary {
                succeeded: 1,
                running: 1,
                failed: 1,
                queued: 1
            }
        );
    }

    #[test]
    fn bar_length_handles_degenerate_input() {
        assert_eq!(bar_length(5.0, 0.0, 40), 0);
        assert_eq!(bar_length(-1.0, 10.0, 40), 0);
        assert_eq!(bar_length(5.0, 10.0, 0), 0);
        assert_eq!(bar_length(5.0, 10.0, 40), 20);
    }
}
