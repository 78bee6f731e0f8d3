use crate::config::{Section, ThresholdPreset};
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kpiboard")]
#[command(about = "Analytics dashboard renderer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the dashboard
    Render {
        /// JSON snapshot to render (defaults to built-in sample data)
        #[arg(short, long, env = "KPIBOARD_DATA")]
        data: Option<PathBuf>,

        /// Output format (defaults to the config's default_format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sections to render, in order (comma-separated)
        #[arg(long = "section", value_enum, value_delimiter = ',')]
        sections: Vec<Section>,

        /// Configuration file (defaults to discovering .kpiboard.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Heat tier threshold preset, overriding the config file
        #[arg(long = "threshold-preset", value_enum)]
        threshold_preset: Option<ThresholdPreset>,

        /// Plain output: no colors, no emoji
        #[arg(long)]
        plain: bool,

        /// Increase log verbosity (-v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Check a snapshot against the data model invariants
    Check {
        /// JSON snapshot to check (defaults to built-in sample data)
        #[arg(short, long, env = "KPIBOARD_DATA")]
        data: Option<PathBuf>,

        /// Increase log verbosity (-v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Render { verbosity, .. } | Self::Check { verbosity, .. } => *verbosity,
            Self::Init { .. } => 0,
        }
    }
}
