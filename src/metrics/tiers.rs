//! Threshold classification of percentages into heat tiers.
//!
//! Cutoffs are inclusive lower bounds: a value exactly on a cutoff belongs to
//! the higher tier. Anything below the lowest cutoff, including negative
//! values and NaN, lands in [`HeatTier::Tier1`].

use crate::errors::Violation;
use crate::validation::{from_violations, ViolationValidation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of four discrete heat buckets, coolest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatTier {
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl HeatTier {
    pub const ALL: [HeatTier; 4] = [Self::Tier1, Self::Tier2, Self::Tier3, Self::Tier4];

    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Tier1 => "T1",
            Self::Tier2 => "T2",
            Self::Tier3 => "T3",
            Self::Tier4 => "T4",
        }
    }
}

/// Inclusive lower bounds for tiers 2 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    #[serde(default = "default_tier2")]
    pub tier2: f64,
    #[serde(default = "default_tier3")]
    pub tier3: f64,
    #[serde(default = "default_tier4")]
    pub tier4: f64,
}

fn default_tier2() -> f64 {
    15.0
}

fn default_tier3() -> f64 {
    30.0
}

fn default_tier4() -> f64 {
    50.0
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            tier2: default_tier2(),
            tier3: default_tier3(),
            tier4: default_tier4(),
        }
    }
}

impl TierThresholds {
    /// Higher cutoffs, fewer cells reach the hot tiers
    pub fn strict() -> Self {
        Self {
            tier2: 20.0,
            tier3: 40.0,
            tier4: 60.0,
        }
    }

    /// Default cutoffs
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Lower cutoffs, for products with naturally low retention
    pub fn lenient() -> Self {
        Self {
            tier2: 10.0,
            tier3: 20.0,
            tier4: 35.0,
        }
    }

    /// Check that all cutoffs are finite and strictly ascending.
    pub fn validate(&self) -> ViolationValidation<()> {
        let mut violations = Vec::new();
        for (name, value) in [
            ("tier2", self.tier2),
            ("tier3", self.tier3),
            ("tier4", self.tier4),
        ] {
            if !value.is_finite() {
                violations.push(Violation::new(
                    format!("thresholds.{name}"),
                    "must be a finite number",
                ));
            }
        }
        if violations.is_empty() {
            if self.tier2 >= self.tier3 {
                violations.push(Violation::new(
                    "thresholds.tier3",
                    format!("must be greater than tier2 ({})", self.tier2),
                ));
            }
            if self.tier3 >= self.tier4 {
                violations.push(Violation::new(
                    "thresholds.tier4",
                    format!("must be greater than tier3 ({})", self.tier3),
                ));
            }
        }

        from_violations(violations)
    }

    /// Classify `value` into a tier.
    pub fn classify(&self, value: f64) -> HeatTier {
        if value >= self.tier4 {
            HeatTier::Tier4
        } else if value >= self.tier3 {
            HeatTier::Tier3
        } else if value >= self.tier2 {
            HeatTier::Tier2
        } else {
            HeatTier::Tier1
        }
    }
}

/// Classify `value` with the default 15/30/50 cutoffs.
///
/// # Examples
///
/// ```
/// use kpiboard::metrics::{classify, HeatTier};
///
/// assert_eq!(classify(50.0), HeatTier::Tier4);
/// assert_eq!(classify(29.0), HeatTier::Tier2);
/// assert_eq!(classify(0.0), HeatTier::Tier1);
/// ```
pub fn classify(value: f64) -> HeatTier {
    TierThresholds::default().classify(value)
}

/// A 24-bit color, written as `#rrggbb` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{s}' must start with '#'"))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("color '{s}' must have six hex digits"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("color '{s}': {e}"))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Background and foreground color pair for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierStyle {
    pub background: Rgb,
    pub foreground: Rgb,
}

impl TierStyle {
    pub const fn new(background: Rgb, foreground: Rgb) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

/// Fixed style pair per tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "Palette::default_tier1")]
    pub tier1: TierStyle,
    #[serde(default = "Palette::default_tier2")]
    pub tier2: TierStyle,
    #[serde(default = "Palette::default_tier3")]
    pub tier3: TierStyle,
    #[serde(default = "Palette::default_tier4")]
    pub tier4: TierStyle,
}

const DARK_TEXT: Rgb = Rgb::new(0x1e, 0x3a, 0x8a);
const LIGHT_TEXT: Rgb = Rgb::new(0xff, 0xff, 0xff);

impl Palette {
    fn default_tier1() -> TierStyle {
        TierStyle::new(Rgb::new(0xef, 0xf6, 0xff), DARK_TEXT)
    }

    fn default_tier2() -> TierStyle {
        TierStyle::new(Rgb::new(0xbf, 0xdb, 0xfe), DARK_TEXT)
    }

    fn default_tier3() -> TierStyle {
        TierStyle::new(Rgb::new(0x60, 0xa5, 0xfa), LIGHT_TEXT)
    }

    fn default_tier4() -> TierStyle {
        TierStyle::new(Rgb::new(0x25, 0x63, 0xeb), LIGHT_TEXT)
    }

    pub fn style(&self, tier: HeatTier) -> TierStyle {
        match tier {
            HeatTier::Tier1 => self.tier1,
            HeatTier::Tier2 => self.tier2,
            HeatTier::Tier3 => self.tier3,
            HeatTier::Tier4 => self.tier4,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            tier1: Self::default_tier1(),
            tier2: Self::default_tier2(),
            tier3: Self::default_tier3(),
            tier4: Self::default_tier4(),
        }
    }
}

/// Tier and style assigned to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub tier: HeatTier,
    pub style: TierStyle,
}

/// Threshold classifier bound to a set of cutoffs and a palette.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: TierThresholds,
    palette: Palette,
}

impl Classifier {
    pub fn new(thresholds: TierThresholds, palette: Palette) -> Self {
        Self {
            thresholds,
            palette,
        }
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn tier(&self, value: f64) -> HeatTier {
        self.thresholds.classify(value)
    }

    pub fn classify(&self, value: f64) -> Classification {
        let tier = self.tier(value);
        Classification {
            tier,
            style: self.palette.style(tier),
        }
    }
}
