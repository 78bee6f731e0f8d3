//! Dashboard inputs: record types, providers, and invariant checks.

pub mod builtin;
pub mod model;
pub mod source;
pub mod validate;

pub use builtin::builtin_snapshot;
pub use model::{
    CohortRow, DashboardData, JobState, JobStatus, PaymentMethodShare, QueryStat,
    RegionalRevenue, TagCount, TimeSeriesPoint, COHORT_WEEKS,
};
pub use source::{source_for, DataSource, FileDataSource, StaticDataSource};
pub use validate::validate_snapshot;
