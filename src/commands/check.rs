use crate::data::{source_for, validate_snapshot, DataSource};
use crate::errors::{Result, Violation};
use crate::observability::{set_phase, set_source, RenderPhase};
use crate::validation::into_violations;
use std::path::Path;
use tracing::info;

/// Outcome of checking one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub source: String,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Load a snapshot and collect every invariant violation in it.
pub fn check_snapshot(data: Option<&Path>) -> Result<CheckReport> {
    check_source(source_for(data).as_ref())
}

pub fn check_source(source: &dyn DataSource) -> Result<CheckReport> {
    let _source = set_source(source.describe());
    let data = {
        let _phase = set_phase(RenderPhase::DataLoading);
        source.load()?
    };

    let _phase = set_phase(RenderPhase::Validation);
    let violations = into_violations(validate_snapshot(&data));
    info!(
        source = %source.describe(),
        violations = violations.len(),
        "Checked snapshot"
    );
    Ok(CheckReport {
        source: source.describe(),
        violations,
    })
}
