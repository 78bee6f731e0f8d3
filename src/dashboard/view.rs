//! Rendering-ready dashboard values.
//!
//! A view is fully computed: writers only lay it out. Sections that were not
//! requested are `None` and are skipped in JSON output.

use crate::config::Section;
use crate::data::{JobStatus, PaymentMethodShare, QueryStat};
use crate::metrics::{Delta, HeatTier, RetentionCell, TierStyle};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiId {
    DailyActiveUsers,
    MonthlyRecurringRevenue,
    RevenuePerUser,
    QueryVolume,
}

/// Headline number with its period-over-period change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub id: KpiId,
    pub label: String,
    /// Latest value, absent when the snapshot cannot define one
    pub value: Option<f64>,
    /// `value` formatted for display, `n/a` when absent
    pub display: String,
    pub delta: Option<Delta>,
    /// Why `delta` is absent, when it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_unavailable: Option<String>,
}

/// One period of the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendRow {
    pub date: String,
    pub dau: u64,
    pub mrr: f64,
    /// Bar lengths scaled to the configured chart width
    pub dau_bar: usize,
    pub mrr_bar: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub label: String,
    pub cells: Vec<RetentionCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub tier: HeatTier,
    /// Value range covered by the tier, e.g. `15-30`
    pub range: String,
    pub style: TierStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetentionHeatmap {
    pub weeks: usize,
    pub rows: Vec<HeatmapRow>,
    /// Mean of observed values per week
    pub average: HeatmapRow,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRow {
    pub tag: String,
    pub count: u64,
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionRow {
    pub region: String,
    pub revenue: f64,
    pub share: Option<f64>,
    pub growth: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub succeeded: usize,
    pub running: usize,
    pub failed: usize,
    pub queued: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobsPanel {
    pub summary: JobSummary,
    pub jobs: Vec<JobStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub currency_symbol: String,
    /// Sections in render order
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kpis: Option<Vec<KpiCard>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Vec<TrendRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention: Option<RetentionHeatmap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<QueryStat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<RegionRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<PaymentMethodShare>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<JobsPanel>,
}

impl DashboardView {
    pub fn kpi(&self, id: KpiId) -> Option<&KpiCard> {
        self.kpis.as_ref()?.iter().find(|card| card.id == id)
    }
}
