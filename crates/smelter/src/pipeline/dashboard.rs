//! Dashboard chart configuration exchanged with the generation service.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One chart in the dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// `bar`, `pie`, or `line`.
    #[serde(rename = "type")]
    pub chart_type: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(rename = "tickAngle", skip_serializing_if = "Option::is_none")]
    pub tick_angle: Option<f64>,
}

/// Chart list consumed by the dashboard. Defaults to no charts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub charts: Vec<ChartSpec>,
}

impl DashboardConfig {
    /// Pretty-printed JSON for the `dashboard_config.json` artifact.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Parse a generation response into a chart configuration.
///
/// Fenced-code markers are stripped and the remainder parsed as JSON;
/// anything unparsable degrades to an empty chart list.
pub fn parse_chart_config(raw: &str) -> DashboardConfig {
    let cleaned = strip_fences(raw);
    serde_json::from_str(cleaned).unwrap_or_default()
}

/// Extract the payload from a possibly fenced response.
fn strip_fences(raw: &str) -> &str {
    if let Some(rest) = raw.split("```json").nth(1) {
        rest.split("```").next().unwrap_or(raw).trim()
    } else if raw.contains("```") {
        raw.split("```").nth(1).unwrap_or(raw).trim()
    } else {
        raw.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let raw = r#"{"charts":[{"title":"Status","subtitle":"OK vs REVIEW","type":"pie","labels":["OK","REVIEW"],"values":[8,2]}]}"#;
        let config = parse_chart_config(raw);
        assert_eq!(config.charts.len(), 1);
        assert_eq!(config.charts[0].chart_type, "pie");
        assert_eq!(config.charts[0].values, vec![8.0, 2.0]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"charts\":[]}\n```";
        let config = parse_chart_config(raw);
        assert!(config.charts.is_empty());
    }

    #[test]
    fn test_parse_generic_fence() {
        let raw = "```\n{\"charts\":[]}\n```";
        assert!(parse_chart_config(raw).charts.is_empty());
    }

    #[test]
    fn test_malformed_degrades_to_empty() {
        let config = parse_chart_config("sorry, I cannot help with that");
        assert!(config.charts.is_empty());
    }

    #[test]
    fn test_optional_fields_roundtrip() {
        let raw = r##"{"charts":[{"title":"T","subtitle":"S","type":"bar","labels":["a"],"values":[1],"colors":["#fff"],"tickAngle":45}]}"##;
        let config = parse_chart_config(raw);
        assert_eq!(config.charts[0].tick_angle, Some(45.0));
        let json = config.to_pretty_json().unwrap();
        assert!(json.contains("tickAngle"));
    }

    #[test]
    fn test_default_is_empty_chart_list() {
        let json = DashboardConfig::default().to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["charts"].as_array().unwrap().len(), 0);
    }
}
