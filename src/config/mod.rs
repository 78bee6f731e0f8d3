//! Configuration loaded from `.kpiboard.toml`.
//!
//! Every section is optional; missing values fall back to built-in defaults.

pub mod core;
pub mod display;
pub mod loader;

pub use self::core::{DashboardConfig, OutputConfig};
pub use display::{DisplayConfig, Section};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, resolve_config, CONFIG_FILE_NAME,
};

use crate::metrics::TierThresholds;
use clap::ValueEnum;

/// Named threshold sets selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThresholdPreset {
    /// Higher cutoffs; only strong retention reaches the hot tiers
    Strict,
    /// Default 15/30/50 cutoffs
    Balanced,
    /// Lower cutoffs for products with naturally low retention
    Lenient,
}

impl ThresholdPreset {
    pub fn thresholds(&self) -> TierThresholds {
        match self {
            Self::Strict => TierThresholds::strict(),
            Self::Balanced => TierThresholds::balanced(),
            Self::Lenient => TierThresholds::lenient(),
        }
    }
}

/// Contents written by `kpiboard init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r##"# kpiboard configuration

[thresholds]
# Inclusive lower bounds of tiers 2-4; anything below tier2 is tier 1.
tier2 = 15.0
tier3 = 30.0
tier4 = 50.0

[palette.tier1]
background = "#eff6ff"
foreground = "#1e3a8a"

[palette.tier2]
background = "#bfdbfe"
foreground = "#1e3a8a"

[palette.tier3]
background = "#60a5fa"
foreground = "#ffffff"

[palette.tier4]
background = "#2563eb"
foreground = "#ffffff"

[display]
sections = ["kpis", "trend", "retention", "queries", "tags", "regions", "payments", "jobs"]
currency_symbol = "$"
chart_width = 40

[output]
default_format = "terminal"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Palette;

    #[test]
    fn template_matches_defaults() {
        let config = parse_and_validate_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.thresholds(), TierThresholds::default());
        assert_eq!(config.palette(), Palette::default());
        assert_eq!(config.display(), DisplayConfig::default());
    }

    #[test]
    fn presets_map_to_thresholds() {
        assert_eq!(
            ThresholdPreset::Balanced.thresholds(),
            TierThresholds::default()
        );
        assert!(ThresholdPreset::Strict.thresholds().tier4 > TierThresholds::default().tier4);
    }
}
