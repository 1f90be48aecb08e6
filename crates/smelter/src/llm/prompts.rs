//! Prompt builders for the generation service.

use crate::error::Result;
use crate::input::Record;
use crate::quality::QualityMetrics;
use crate::schema::ColumnProfile;

use super::provider::ChatMessage;

/// Response budget for the long-form insights report.
pub const AI_INSIGHTS_MAX_TOKENS: usize = 1600;

const ASSISTANT_SYSTEM: &str = "You are a data quality automation assistant.";
const CONSULTANT_SYSTEM: &str = "You are a principal data quality and governance consultant.";
const ARCHITECT_SYSTEM: &str = "You are a data quality analytics architect.";

/// Prompt for the quality narrative (`quality_info.txt`).
pub fn quality_info(metrics: &QualityMetrics) -> Result<Vec<ChatMessage>> {
    let prompt = [
        "Generate a concise data quality report in plain text.".to_string(),
        format!("Metrics: {}", serde_json::to_string(metrics)?),
    ]
    .join("\n");

    Ok(vec![ChatMessage::system(ASSISTANT_SYSTEM), ChatMessage::user(prompt)])
}

/// Prompt for `metadata.yaml`, fed the raw headers and leading rows.
pub fn metadata(headers: &[String], sample_rows: &[Record], quality_info: &str) -> Result<Vec<ChatMessage>> {
    let prompt = [
        "Generate metadata.yaml with schema, types, required fields, and examples.".to_string(),
        format!("Headers: {}", serde_json::to_string(headers)?),
        format!("Sample rows: {}", serde_json::to_string(sample_rows)?),
        format!("Quality report: {quality_info}"),
    ]
    .join("\n");

    Ok(vec![ChatMessage::system(ASSISTANT_SYSTEM), ChatMessage::user(prompt)])
}

/// Prompt for `rules.yaml`.
pub fn rules(profiles: &[ColumnProfile], quality_info: &str, metadata_yaml: &str) -> Result<Vec<ChatMessage>> {
    let prompt = [
        "Generate rules.yaml for standardization transforms per column.".to_string(),
        format!("Inferred: {}", serde_json::to_string(profiles)?),
        format!("Quality report: {quality_info}"),
        format!("Metadata: {metadata_yaml}"),
    ]
    .join("\n");

    Ok(vec![ChatMessage::system(ASSISTANT_SYSTEM), ChatMessage::user(prompt)])
}

/// Prompt for the long-form `ai_insights.md` report.
pub fn ai_insights(metrics: &QualityMetrics, sample_rows: &[Record]) -> Result<Vec<ChatMessage>> {
    let issue_rows: Vec<&Record> = sample_rows
        .iter()
        .filter(|row| {
            row.get("status")
                .map(|status| !status.eq_ignore_ascii_case("OK"))
                .unwrap_or(false)
        })
        .collect();
    let issue_lines = json_lines(&issue_rows)?;
    let sample_lines = json_lines(&sample_rows.iter().collect::<Vec<_>>())?;

    let prompt = [
        "You are a principal data quality and data governance consultant.".to_string(),
        "Write a rich, business-first, board-ready report with enterprise rigor.".to_string(),
        "Be specific and quantified using the provided metrics only.".to_string(),
        "Do not invent revenue or financial numbers.".to_string(),
        "Structure the report with these exact sections and professional layouts:".to_string(),
        "(1) Executive Summary (3 bullets),".to_string(),
        "(2) Data Quality Health Score (formula + computed score),".to_string(),
        "(3) Business Impact Analysis (sales, marketing, ops, risk),".to_string(),
        "(4) Key Risks & Root Causes (ranked),".to_string(),
        "(5) 90-Day Roadmap (milestones + owners),".to_string(),
        "(6) Governance & Controls (policies, SLAs, monitoring),".to_string(),
        "(7) KPI Targets (baseline + target dates),".to_string(),
        "(8) Architecture & Automation opportunities,".to_string(),
        "(9) Data Stewardship Actions (RACI, cadence).".to_string(),
        "Use concise bullets, short paragraphs, and sub-bullets.".to_string(),
        "Use the standardized dataset only.".to_string(),
        "Use the sample issue rows for examples.".to_string(),
        format!("Metrics: {}", serde_json::to_string_pretty(metrics)?),
        format!(
            "Sample issue rows (standardized):\n{}",
            if issue_lines.is_empty() { "None".to_string() } else { issue_lines }
        ),
        format!("Sample standardized rows:\n{sample_lines}"),
    ]
    .join("\n\n");

    Ok(vec![ChatMessage::system(CONSULTANT_SYSTEM), ChatMessage::user(prompt)])
}

/// Prompt for `dashboard_config.json` chart selection.
pub fn dashboard_config(
    headers: &[String],
    profiles: &[ColumnProfile],
    metrics: &QualityMetrics,
    sample_rows: &[Record],
) -> Result<Vec<ChatMessage>> {
    let sample_lines = json_lines(&sample_rows.iter().collect::<Vec<_>>())?;

    let prompt = [
        "You are a data quality analytics architect.".to_string(),
        "Choose up to 3 most meaningful charts for a data quality dashboard based on the dataset.".to_string(),
        "Return ONLY valid JSON with this schema:".to_string(),
        "{ \"charts\": [ { \"title\": string, \"subtitle\": string, \"type\": \"bar\"|\"pie\"|\"line\", \
         \"labels\": string[], \"values\": number[], \"colors\": string[] (optional), \
         \"tickAngle\": number (optional) } ] }"
            .to_string(),
        "Rules:".to_string(),
        "- Use labels/values arrays of equal length.".to_string(),
        "- Use only provided metrics, headers, inferred types, and sample rows.".to_string(),
        "- Prefer categorical distributions and quality risk breakdowns.".to_string(),
        format!("Headers: {}", serde_json::to_string(headers)?),
        format!("Inferred: {}", serde_json::to_string(profiles)?),
        format!("Metrics: {}", serde_json::to_string(metrics)?),
        format!("Sample rows: {sample_lines}"),
    ]
    .join("\n");

    Ok(vec![ChatMessage::system(ARCHITECT_SYSTEM), ChatMessage::user(prompt)])
}

fn json_lines(rows: &[&Record]) -> Result<String> {
    let lines: Vec<String> = rows
        .iter()
        .map(|row| serde_json::to_string(row))
        .collect::<std::result::Result<_, _>>()?;
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use indexmap::IndexMap;

    use super::*;
    use crate::quality::{Distribution, DuplicateCounts, StatusCounts};

    fn metrics() -> QualityMetrics {
        QualityMetrics {
            total_rows: 2,
            status_counts: StatusCounts { ok: 1, review: 1 },
            issue_counts: IndexMap::new(),
            completeness_standardized: IndexMap::new(),
            duplicates: DuplicateCounts::default(),
            distribution: Distribution::default(),
            generated_at: Utc::now(),
        }
    }

    fn row(status: &str) -> Record {
        let mut record = Record::new();
        record.insert("status".to_string(), status.to_string());
        record
    }

    #[test]
    fn test_quality_info_prompt_shape() {
        let messages = quality_info(&metrics()).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[1].content.contains("Metrics:"));
    }

    #[test]
    fn test_ai_insights_filters_issue_rows() {
        let rows = vec![row("OK"), row("REVIEW")];
        let messages = ai_insights(&metrics(), &rows).unwrap();
        let body = &messages[1].content;
        assert!(body.contains("Sample issue rows"));
        assert!(body.contains("REVIEW"));
        assert!(body.contains("(9) Data Stewardship Actions"));
    }

    #[test]
    fn test_ai_insights_no_issue_rows_says_none() {
        let rows = vec![row("OK")];
        let messages = ai_insights(&metrics(), &rows).unwrap();
        assert!(messages[1].content.contains("Sample issue rows (standardized):\nNone"));
    }
}
