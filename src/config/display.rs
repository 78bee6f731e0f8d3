use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One renderable block of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// KPI cards with period deltas
    Kpis,
    /// DAU and MRR trend chart
    Trend,
    /// Cohort retention heatmap
    Retention,
    /// Query statistics table
    Queries,
    /// Tag counts
    Tags,
    /// Revenue by region
    Regions,
    /// Payment method shares
    Payments,
    /// Background job statuses
    Jobs,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Self::Kpis,
        Self::Trend,
        Self::Retention,
        Self::Queries,
        Self::Tags,
        Self::Regions,
        Self::Payments,
        Self::Jobs,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Kpis => "Key Metrics",
            Self::Trend => "Trend",
            Self::Retention => "Cohort Retention",
            Self::Queries => "Top Queries",
            Self::Tags => "Tags",
            Self::Regions => "Revenue by Region",
            Self::Payments => "Payment Methods",
            Self::Jobs => "Jobs",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Display configuration for rendered output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Sections to render, in order (default: all)
    #[serde(default = "default_sections")]
    pub sections: Vec<Section>,

    /// Currency symbol prefixed to revenue figures (default: "$")
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Width in characters of the longest trend bar (default: 40)
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            currency_symbol: default_currency_symbol(),
            chart_width: default_chart_width(),
        }
    }
}

fn default_sections() -> Vec<Section> {
    Section::ALL.to_vec()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_chart_width() -> usize {
    40
}
