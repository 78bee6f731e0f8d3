use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::core::DashboardConfig;
use crate::errors::{Error, Result};
use crate::validation::run_validation;

pub const CONFIG_FILE_NAME: &str = ".kpiboard.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DashboardConfig> {
    let config = toml::from_str::<DashboardConfig>(contents)?;
    run_validation(config.validate())?;
    Ok(config)
}

/// Load a config file the user named explicitly; any failure is an error.
pub fn load_config_from(path: &Path) -> Result<DashboardConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::file_system(path, e))?;
    let config = parse_and_validate_config(&contents)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading a discovered config; a broken file falls back to defaults.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<DashboardConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover a config file starting at `start` and walking up.
pub fn discover_config(start: PathBuf) -> DashboardConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DashboardConfig::default()
        })
}

/// Discover a config file from the current directory.
pub fn load_config() -> DashboardConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            DashboardConfig::default()
        }
    }
}

/// Explicit path when given, discovery otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<DashboardConfig> {
    match explicit {
        Some(path) => load_config_from(path),
        None => Ok(load_config()),
    }
}
