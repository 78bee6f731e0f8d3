//! Record types of a dashboard snapshot.
//!
//! Every record is flat and immutable once loaded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weeks tracked per cohort row.
pub const COHORT_WEEKS: usize = 8;

/// One chronological observation of usage and revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub dau: u64,
    pub mrr: f64,
}

/// Weekly retention of one signup cohort.
///
/// Week 0 is the signup week. `None` marks a week that has not happened yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortRow {
    pub cohort: String,
    pub weekly_retention: [Option<f64>; COHORT_WEEKS],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryStat {
    pub query: String,
    pub calls: u64,
    pub avg_latency_ms: f64,
    /// Percentage of failed calls.
    pub error_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalRevenue {
    pub region: String,
    pub revenue: f64,
    /// Period-over-period change in percent; negative when shrinking.
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodShare {
    pub method: String,
    /// Share of transactions in percent.
    pub share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Succeeded,
    Running,
    Failed,
    Queued,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Succeeded => "succeeded",
            Self::Running => "running",
            Self::Failed => "failed",
            Self::Queued => "queued",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub name: String,
    pub state: JobState,
    pub duration_secs: u64,
    pub last_run: String,
}

/// A complete set of dashboard inputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub time_series: Vec<TimeSeriesPoint>,
    #[serde(default)]
    pub cohorts: Vec<CohortRow>,
    #[serde(default)]
    pub queries: Vec<QueryStat>,
    #[serde(default)]
    pub tags: Vec<TagCount>,
    #[serde(default)]
    pub regions: Vec<RegionalRevenue>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethodShare>,
    #[serde(default)]
    pub jobs: Vec<JobStatus>,
}

impl DashboardData {
    pub fn latest_point(&self) -> Option<&TimeSeriesPoint> {
        self.time_series.last()
    }
}
