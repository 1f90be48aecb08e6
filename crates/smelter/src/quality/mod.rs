//! Data quality assessment: issue detection, duplicates, completeness,
//! distributions, and the derived report texts.

mod assessor;
mod metrics;
mod report;

pub use assessor::QualityAssessor;
pub use metrics::{Distribution, DuplicateCounts, QualityMetrics, QualityReport, StatusCounts};
pub use report::{build_insights, build_report};
