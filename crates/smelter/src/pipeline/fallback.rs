//! Deterministic builders used when the generation service is absent or
//! fails. These are the default implementations of the generated
//! artifacts; service output simply replaces them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::DataTable;
use crate::quality::QualityMetrics;
use crate::schema::{ColumnProfile, ColumnType};

/// Name pattern marking a column required in the metadata listing.
static REQUIRED_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)name|email|phone|country|state|city|date").unwrap());

/// How many issue kinds the insights preview lists.
const PREVIEW_ISSUES: usize = 5;

/// Plain-YAML schema listing for `metadata.yaml`.
pub fn metadata_yaml(table: &DataTable, profiles: &[ColumnProfile]) -> String {
    let mut lines = vec!["schema:".to_string()];
    for profile in profiles {
        let example = table
            .rows
            .iter()
            .find_map(|row| row.get(&profile.name).filter(|v| !v.is_empty()))
            .map(String::as_str)
            .unwrap_or("");
        lines.push(format!("  - name: {}", profile.name));
        lines.push(format!("    type: {}", profile.inferred_type.label()));
        lines.push(format!("    required: {}", REQUIRED_NAME.is_match(&profile.name)));
        lines.push(format!("    example: \"{example}\""));
    }
    lines.join("\n")
}

/// Plain-YAML transform listing for `rules.yaml`.
pub fn rules_yaml(profiles: &[ColumnProfile]) -> String {
    let mut lines = vec!["rules:".to_string()];
    for profile in profiles {
        lines.push(format!("  - column: {}", profile.name));
        let transform = match profile.inferred_type {
            ColumnType::Email => "lowercase",
            ColumnType::Phone => "digits_only",
            ColumnType::Date => "iso_date",
            ColumnType::String => "trim",
            ColumnType::Number => "numeric",
        };
        lines.push(format!("    transform: {transform}"));
    }
    lines.join("\n")
}

/// Preview insights written when no generation credentials are configured.
pub fn ai_insights_preview(metrics: &QualityMetrics) -> String {
    let top_issues = metrics
        .issue_counts
        .keys()
        .take(PREVIEW_ISSUES)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let top_issues = if top_issues.is_empty() {
        "None".to_string()
    } else {
        top_issues
    };

    format!(
        "# AI Insights (Preview)\n\n\
         - Total records: {}\n\
         - OK: {}\n\
         - Review: {}\n\
         - Top issues: {}\n\n\
         Add a Hugging Face token to generate full AI insights.",
        metrics.total_rows, metrics.status_counts.ok, metrics.status_counts.review, top_issues,
    )
}

/// Clearly marked fallback written when the generation call fails.
pub fn ai_insights_failure(reason: &str) -> String {
    format!(
        "# AI Insights (Fallback)\n\n\
         AI request failed ({reason}). Update token or model and retry."
    )
}
