//! Pipeline orchestration: stage state machine, deterministic fallbacks,
//! dashboard configuration, and the multi-file driver.

mod dashboard;
pub mod fallback;
mod orchestrator;
mod run;

pub use dashboard::{parse_chart_config, ChartSpec, DashboardConfig};
pub use orchestrator::{artifact_key, basename_of, FileOutcome, FileReport, Pipeline, PipelineConfig};
pub use run::{PipelineRun, Stage, StageGroup, StageSelection, StageState, StageStatus};
