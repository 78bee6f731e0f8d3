//! Data providers feeding the dashboard.

use super::builtin::builtin_snapshot;
use super::model::DashboardData;
use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Anything that can produce a dashboard snapshot.
pub trait DataSource {
    /// Short human-readable origin, shown in report headers.
    fn describe(&self) -> String;

    fn load(&self) -> Result<DashboardData>;
}

/// Built-in mock tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataSource;

impl DataSource for StaticDataSource {
    fn describe(&self) -> String {
        "built-in sample data".to_string()
    }

    fn load(&self) -> Result<DashboardData> {
        Ok(builtin_snapshot())
    }
}

/// JSON snapshot on disk with the same shape as [`DashboardData`].
#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileDataSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<DashboardData> {
        let contents =
            fs::read_to_string(&self.path).map_err(|e| Error::file_system(&self.path, e))?;
        let data: DashboardData = serde_json::from_str(&contents)?;
        debug!(
            path = %self.path.display(),
            points = data.time_series.len(),
            cohorts = data.cohorts.len(),
            "Loaded snapshot"
        );
        Ok(data)
    }
}

/// Pick the file source when a path is given, the built-in data otherwise.
pub fn source_for(path: Option<&Path>) -> Box<dyn DataSource> {
    match path {
        Some(path) => Box::new(FileDataSource::new(path)),
        None => Box::new(StaticDataSource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn static_source_returns_builtin_snapshot() {
        let data = StaticDataSource.load().unwrap();
        assert_eq!(data, builtin_snapshot());
    }

    #[test]
    fn file_source_round_trips_builtin_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&builtin_snapshot()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = FileDataSource::new(file.path()).load().unwrap();
        assert_eq!(loaded, builtin_snapshot());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FileDataSource::new("/definitely/not/here.json")
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        let err = FileDataSource::new(file.path()).load().unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn source_for_selects_by_path() {
        assert_eq!(source_for(None).describe(), "built-in sample data");
        assert_eq!(
            source_for(Some(Path::new("snap.json"))).describe(),
            "snap.json"
        );
    }
}
