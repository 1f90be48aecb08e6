//! Report texts derived from quality metrics.

use super::metrics::QualityMetrics;

/// Terse one-paragraph report used as the deterministic quality narrative.
pub fn build_report(metrics: &QualityMetrics) -> String {
    let issues = metrics
        .issue_counts
        .iter()
        .map(|(key, count)| format!("- {key}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Data Quality Report\n\n\
         Total records processed: {}\n\
         Records ready for use (OK): {}\n\
         Records needing review (REVIEW): {}\n\
         Duplicate identifier rows: {}\n\
         Potential duplicate profiles: {}\n\n\
         Top issues:\n{}\n",
        metrics.total_rows,
        metrics.status_counts.ok,
        metrics.status_counts.review,
        metrics.duplicates.duplicate_id_rows,
        metrics.duplicates.duplicate_profile_rows,
        issues,
    )
}

/// Longer insights text: the record summary plus completeness percentage
/// per required field, read back from the completeness map.
pub fn build_insights(metrics: &QualityMetrics, required_fields: &[String]) -> String {
    let completeness = required_fields
        .iter()
        .map(|field| {
            let present = metrics
                .completeness_standardized
                .get(&format!("{field}_present"))
                .copied()
                .unwrap_or(0);
            let pct = metrics
                .completeness_standardized
                .get(&format!("{field}_present_pct"))
                .copied()
                .unwrap_or(0);
            format!("- {field}: {present}/{} ({pct}.00%)", metrics.total_rows)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n▶ Overall Record Summary\n\
         - Total records processed: {}\n\
         - Records ready for use (OK): {}\n\
         - Records needing review (REVIEW): {}\n\
         - Duplicate identifier rows: {}\n\
         - Potential duplicate profiles: {}\n\n\
         ▶ Completeness Metrics (Mandatory Fields)\n{}\n",
        metrics.total_rows,
        metrics.status_counts.ok,
        metrics.status_counts.review,
        metrics.duplicates.duplicate_id_rows,
        metrics.duplicates.duplicate_profile_rows,
        completeness,
    )
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use indexmap::IndexMap;

    use super::*;
    use crate::quality::metrics::{Distribution, DuplicateCounts, StatusCounts};

    fn metrics() -> QualityMetrics {
        let mut issue_counts = IndexMap::new();
        issue_counts.insert("email".to_string(), 2);
        let mut completeness = IndexMap::new();
        completeness.insert("name_present".to_string(), 3);
        completeness.insert("name_present_pct".to_string(), 75);
        QualityMetrics {
            total_rows: 4,
            status_counts: StatusCounts { ok: 2, review: 2 },
            issue_counts,
            completeness_standardized: completeness,
            duplicates: DuplicateCounts::default(),
            distribution: Distribution::default(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_lists_issues() {
        let text = build_report(&metrics());
        assert!(text.starts_with("Data Quality Report"));
        assert!(text.contains("- email: 2"));
        assert!(text.contains("Records needing review (REVIEW): 2"));
    }

    #[test]
    fn test_insights_completeness_line() {
        let text = build_insights(&metrics(), &["name".to_string()]);
        assert!(text.contains("- name: 3/4 (75.00%)"));
    }
}
