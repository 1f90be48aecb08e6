//! Row-by-row quality assessment: issue detection, duplicate detection,
//! completeness and distribution metrics.

use std::collections::HashSet;

use chrono::Utc;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::inference::dates;
use crate::input::DataTable;
use crate::schema::{ColumnProfile, ColumnType};
use crate::text::{digits_only, normalize};

use super::metrics::{Distribution, DuplicateCounts, QualityMetrics, QualityReport, StatusCounts};
use super::report;

/// Name pattern that makes a column required independent of its type.
static REQUIRED_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)name|country|state|city").unwrap());

/// Strict email shape used for format re-validation.
static EMAIL_STRICT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// How many distribution buckets are reported per location column.
const TOP_VALUES: usize = 5;

/// The issue key shared by both duplicate checks.
const DUPLICATE_ISSUE: &str = "duplicate-profile";

/// Computes a [`QualityReport`] for a table and its column profiles.
pub struct QualityAssessor;

impl QualityAssessor {
    /// Create a new assessor.
    pub fn new() -> Self {
        Self
    }

    /// A column is required when its inferred type is contact-like (email,
    /// phone, date) or its name matches the required-name pattern.
    pub fn required_fields(profiles: &[ColumnProfile]) -> Vec<String> {
        profiles
            .iter()
            .filter(|p| p.inferred_type.is_contact_like() || REQUIRED_NAME.is_match(&p.name))
            .map(|p| p.name.clone())
            .collect()
    }

    /// Assess a table. Findings are tallied as metrics, never raised as
    /// errors.
    pub fn assess(&self, table: &DataTable, profiles: &[ColumnProfile]) -> QualityReport {
        let required_fields = Self::required_fields(profiles);
        let duplicate_key = table.find_column("id").map(str::to_string);

        let mut status_counts = StatusCounts::default();
        let mut issue_counts: IndexMap<String, usize> = IndexMap::new();
        let mut duplicates = DuplicateCounts::default();
        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut seen_profiles: HashSet<String> = HashSet::new();

        for row in &table.rows {
            let mut row_issues: Vec<String> = Vec::new();

            for field in &required_fields {
                if row.get(field).map(|v| v.is_empty()).unwrap_or(true) {
                    row_issues.push(format!("missing-{field}"));
                }
            }

            for profile in profiles {
                let value = match row.get(&profile.name) {
                    Some(v) if !v.is_empty() => v,
                    _ => continue,
                };
                match profile.inferred_type {
                    ColumnType::Email if !EMAIL_STRICT.is_match(value) => {
                        row_issues.push("email".to_string());
                    }
                    ColumnType::Phone if digits_only(value).len() < 7 => {
                        row_issues.push("phone".to_string());
                    }
                    ColumnType::Date if !dates::is_date(value) => {
                        row_issues.push("date".to_string());
                    }
                    _ => {}
                }
            }

            if let Some(key_column) = &duplicate_key {
                if let Some(key_value) = row.get(key_column).filter(|v| !v.is_empty()) {
                    if !seen_ids.insert(key_value.clone()) {
                        duplicates.duplicate_id_rows += 1;
                        row_issues.push(DUPLICATE_ISSUE.to_string());
                    }
                }
            }

            let profile_parts = [
                normalize(row.get("first_name").map(String::as_str).unwrap_or("")),
                normalize(row.get("last_name").map(String::as_str).unwrap_or("")),
                normalize(row.get("email").map(String::as_str).unwrap_or("")),
                digits_only(row.get("phone").map(String::as_str).unwrap_or("")),
                normalize(row.get("country").map(String::as_str).unwrap_or("")),
            ];
            if profile_parts.iter().any(|part| !part.is_empty()) {
                let profile_key = profile_parts.join("|");
                if !seen_profiles.insert(profile_key) {
                    duplicates.duplicate_profile_rows += 1;
                    row_issues.push(DUPLICATE_ISSUE.to_string());
                }
            }

            if row_issues.is_empty() {
                status_counts.ok += 1;
            } else {
                status_counts.review += 1;
                for issue in row_issues {
                    *issue_counts.entry(issue).or_insert(0) += 1;
                }
            }
        }

        let total_rows = table.row_count();
        let mut completeness: IndexMap<String, u64> = IndexMap::new();
        for header in &table.headers {
            let present = table.column_values(header).filter(|v| !v.is_empty()).count();
            completeness.insert(format!("{header}_present"), present as u64);
            completeness.insert(
                format!("{header}_present_pct"),
                QualityMetrics::percentage(present, total_rows),
            );
        }

        let distribution = Distribution {
            top_countries: top_value_counts(table, "country"),
            top_states: top_value_counts(table, "state"),
            top_cities: top_value_counts(table, "city"),
        };

        let metrics = QualityMetrics {
            total_rows,
            status_counts,
            issue_counts,
            completeness_standardized: completeness,
            duplicates,
            distribution,
            generated_at: Utc::now(),
        };

        let report = report::build_report(&metrics);
        let insights = report::build_insights(&metrics, &required_fields);

        QualityReport {
            metrics,
            report,
            insights,
            profiles: profiles.to_vec(),
        }
    }
}

impl Default for QualityAssessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Top-5 value counts for the first column whose name contains `keyword`.
///
/// Empty cells are bucketed as `Unknown`. The ranking is a stable sort by
/// descending count, so ties keep first-seen order.
fn top_value_counts(table: &DataTable, keyword: &str) -> IndexMap<String, usize> {
    let Some(column) = table.find_column(keyword) else {
        return IndexMap::new();
    };

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in table.column_values(column) {
        let bucket = if value.is_empty() { "Unknown" } else { value };
        *counts.entry(bucket.to_string()).or_insert(0) += 1;
    }

    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.into_iter().take(TOP_VALUES).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::TypeInferencer;
    use crate::input::Parser;

    fn assess(csv: &str) -> QualityReport {
        let table = Parser::new().parse(csv);
        let profiles = TypeInferencer::new().infer(&table);
        QualityAssessor::new().assess(&table, &profiles)
    }

    #[test]
    fn test_ok_and_review_counts() {
        // The second value keeps its `@` so the column stays email-typed,
        // but fails the strict dotted-domain shape.
        let report = assess("name,email\nA,a@x.com\nB,bad@email\n");
        assert_eq!(report.metrics.status_counts.ok, 1);
        assert_eq!(report.metrics.status_counts.review, 1);
        assert_eq!(report.metrics.issue_counts.get("email"), Some(&1));
    }

    #[test]
    fn test_sample_outlier_demotes_column_and_mutes_format_check() {
        // A non-@ value in the sample window demotes the whole column to
        // string, so no email format issue can fire for it.
        let report = assess("name,email\nA,a@x.com\nB,bad-email\n");
        assert_eq!(report.metrics.status_counts.ok, 2);
        assert_eq!(report.metrics.status_counts.review, 0);
        assert!(report.metrics.issue_counts.get("email").is_none());
    }

    #[test]
    fn test_missing_required_field() {
        let report = assess("name,city\nA,Paris\n,Lyon\n");
        assert_eq!(report.metrics.issue_counts.get("missing-name"), Some(&1));
        assert_eq!(report.metrics.status_counts.review, 1);
    }

    #[test]
    fn test_duplicate_identifier() {
        let report = assess("id,name\n1,A\n1,B\n1,C\n");
        assert_eq!(report.metrics.duplicates.duplicate_id_rows, 2);
        assert_eq!(report.metrics.issue_counts.get("duplicate-profile"), Some(&2));
    }

    #[test]
    fn test_duplicate_profile_key() {
        let csv = "first_name,last_name,email,phone,country\n\
                   Ann, Lee ,ANN@x.com,555-123-4567,US\n\
                   ann,lee,ann@x.com,5551234567,us\n";
        let report = assess(csv);
        assert_eq!(report.metrics.duplicates.duplicate_profile_rows, 1);
    }

    #[test]
    fn test_profile_check_skipped_when_all_parts_empty() {
        let report = assess("a,b\n1,2\n3,4\n");
        assert_eq!(report.metrics.duplicates.duplicate_profile_rows, 0);
    }

    #[test]
    fn test_completeness_counts_and_pct() {
        let report = assess("name\nA\nB\n\nC\n");
        let completeness = &report.metrics.completeness_standardized;
        assert_eq!(completeness.get("name_present"), Some(&3));
        assert_eq!(completeness.get("name_present_pct"), Some(&75));
    }

    #[test]
    fn test_top_values_unknown_bucket_and_order() {
        let report = assess("country\nUS\nUS\nFR\n\nFR\nUS\nDE\nBE\nNL\n");
        let top = &report.metrics.distribution.top_countries;
        let keys: Vec<&String> = top.keys().collect();
        assert_eq!(keys[0], "US");
        assert_eq!(keys[1], "FR");
        assert!(top.contains_key("Unknown"));
        assert_eq!(top.len(), 5);
    }

    #[test]
    fn test_format_issues_counted_per_occurrence() {
        // Two email-typed columns, both invalid in the same row.
        let csv = "email,backup_email\na@x.com,b@y.com\nbad@,worse@\n";
        let report = assess(csv);
        assert_eq!(report.metrics.issue_counts.get("email"), Some(&2));
        assert_eq!(report.metrics.status_counts.review, 1);
    }

    #[test]
    fn test_report_texts_nonempty() {
        let report = assess("name,email\nA,a@x.com\n");
        assert!(report.report.contains("Total records processed: 1"));
        assert!(report.insights.contains("Completeness Metrics"));
    }
}
