use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::display::DisplayConfig;
use crate::errors::Violation;
use crate::io::OutputFormat;
use crate::metrics::{Classifier, Palette, TierThresholds};
use crate::validation::{
    combine_validations, from_violations, violation_failure, ViolationValidation,
};
use stillwater::Validation;

/// Root configuration structure for kpiboard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DashboardConfig {
    /// Heat tier cutoffs
    #[serde(default)]
    pub thresholds: Option<TierThresholds>,

    /// Background/foreground pair per heat tier
    #[serde(default)]
    pub palette: Option<Palette>,

    /// Display configuration for rendered output
    #[serde(default)]
    pub display: Option<DisplayConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl DashboardConfig {
    pub fn thresholds(&self) -> TierThresholds {
        self.thresholds.unwrap_or_default()
    }

    pub fn palette(&self) -> Palette {
        self.palette.unwrap_or_default()
    }

    pub fn display(&self) -> DisplayConfig {
        self.display.clone().unwrap_or_default()
    }

    /// Classifier built from the configured cutoffs and palette.
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.thresholds(), self.palette())
    }

    /// Validate the whole config, accumulating all violations.
    pub fn validate(&self) -> ViolationValidation<()> {
        combine_validations([
            self.thresholds().validate(),
            self.display
                .as_ref()
                .map_or(Validation::Success(()), validate_display),
            self.output
                .as_ref()
                .map_or(Validation::Success(()), validate_output),
        ])
    }
}

fn validate_display(display: &DisplayConfig) -> ViolationValidation<()> {
    let mut violations = Vec::new();
    if display.chart_width == 0 {
        violations.push(Violation::new(
            "display.chart_width",
            "must be greater than zero",
        ));
    }
    let mut seen = HashSet::new();
    for section in &display.sections {
        if !seen.insert(section) {
            violations.push(Violation::new(
                "display.sections",
                format!("section '{section}' listed more than once"),
            ));
        }
    }
    from_violations(violations)
}

fn validate_output(output: &OutputConfig) -> ViolationValidation<()> {
    match output.default_format.as_deref() {
        Some(format) if OutputFormat::parse(format).is_none() => {
            violation_failure(Violation::new(
                "output.default_format",
                format!("unknown format '{format}' (expected terminal, json, or markdown)"),
            ))
        }
        _ => Validation::Success(()),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
