//! Aggregate quality metrics serialized to `quality_metrics.json`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::ColumnProfile;

/// Row status tallies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Rows with no detected issues.
    #[serde(rename = "OK")]
    pub ok: usize,
    /// Rows with at least one detected issue.
    #[serde(rename = "REVIEW")]
    pub review: usize,
}

/// Duplicate tallies from the two independent duplicate checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuplicateCounts {
    /// Repeats of the identifier column's value, counted after the first
    /// occurrence.
    pub duplicate_id_rows: usize,
    /// Repeats of the composite profile key, counted after the first
    /// occurrence.
    pub duplicate_profile_rows: usize,
}

/// Top-5 value distributions for location-like columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Distribution {
    pub top_countries: IndexMap<String, usize>,
    pub top_states: IndexMap<String, usize>,
    pub top_cities: IndexMap<String, usize>,
}

/// The nested metrics mapping produced by one quality assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Total data rows in the table.
    pub total_rows: usize,
    /// OK/REVIEW tallies.
    pub status_counts: StatusCounts,
    /// Issue kind → occurrence count, in first-seen order.
    pub issue_counts: IndexMap<String, usize>,
    /// Per column: `<name>_present` count and `<name>_present_pct` rounded
    /// percentage.
    pub completeness_standardized: IndexMap<String, u64>,
    /// Duplicate tallies.
    pub duplicates: DuplicateCounts,
    /// Location distributions.
    pub distribution: Distribution,
    /// When the assessment ran.
    pub generated_at: DateTime<Utc>,
}

impl QualityMetrics {
    /// Rounded completeness percentage, e.g. `present=3, total=4` → 75.
    pub fn percentage(present: usize, total: usize) -> u64 {
        if total == 0 {
            0
        } else {
            ((present as f64 / total as f64) * 100.0).round() as u64
        }
    }
}

/// Everything one assessment produces: metrics plus the two derived texts
/// and the column profiles used. Created once per table, immutable.
#[derive(Debug, Clone)]
pub struct QualityReport {
    /// Aggregate metrics.
    pub metrics: QualityMetrics,
    /// Terse one-paragraph report.
    pub report: String,
    /// Longer insights text with per-required-field completeness.
    pub insights: String,
    /// Column profiles the assessment was computed against.
    pub profiles: Vec<ColumnProfile>,
}
