//! Per-column transforms and row relabeling.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::inference::dates;
use crate::input::{DataTable, Record};
use crate::schema::{ColumnProfile, ColumnType};
use crate::text::{digits_only, title_case};

use super::serialize;

/// Name pattern deciding which columns drive the standardized row's
/// `status`/`issue` labels. Deliberately different from the quality
/// assessor's required-field rule: it is purely name-based and also
/// matches `email`, `phone`, and `date` in the column name.
static LABEL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)name|email|phone|country|state|city|date").unwrap());

/// String columns with location-like names get title-cased.
static LOCATION_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)city|country|state").unwrap());

/// How many standardized rows are sampled for generation prompts.
const SAMPLE_ROWS: usize = 10;

/// Result of standardizing one table.
#[derive(Debug, Clone)]
pub struct StandardizedData {
    /// Standardized rows, each with `status` and `issue` leading the
    /// original columns.
    pub rows: Vec<Record>,
    /// Serialized CSV body (`status, issue, <original headers>`).
    pub csv: String,
    /// First rows, kept for generation prompts.
    pub sample_rows: Vec<Record>,
}

/// Applies per-type transforms and recomputes row status labels.
pub struct Standardizer;

impl Standardizer {
    /// Create a new standardizer.
    pub fn new() -> Self {
        Self
    }

    /// Standardize every row of a table.
    ///
    /// Transforms are stable: running the output through the same transform
    /// set changes nothing.
    pub fn standardize(&self, table: &DataTable, profiles: &[ColumnProfile]) -> Result<StandardizedData> {
        let rows: Vec<Record> = table.rows.iter().map(|row| self.standardize_row(row, table, profiles)).collect();

        let mut columns: Vec<String> = Vec::with_capacity(table.headers.len() + 2);
        columns.push("status".to_string());
        columns.push("issue".to_string());
        columns.extend(table.headers.iter().cloned());

        let csv = serialize::to_csv(&columns, &rows)?;
        let sample_rows = rows.iter().take(SAMPLE_ROWS).cloned().collect();

        Ok(StandardizedData { rows, csv, sample_rows })
    }

    fn standardize_row(&self, row: &Record, table: &DataTable, profiles: &[ColumnProfile]) -> Record {
        let mut cells = Record::with_capacity(table.headers.len() + 2);

        for header in &table.headers {
            let raw = row.get(header).map(String::as_str).unwrap_or("");
            let column_type = profiles
                .iter()
                .find(|p| &p.name == header)
                .map(|p| p.inferred_type)
                .unwrap_or_default();
            cells.insert(header.clone(), transform_value(raw, header, column_type));
        }

        let empty_labeled: Vec<String> = cells
            .iter()
            .filter(|(name, value)| LABEL_NAME.is_match(name) && value.is_empty())
            .map(|(name, _)| name.to_lowercase())
            .collect();

        let mut out = Record::with_capacity(cells.len() + 2);
        out.insert(
            "status".to_string(),
            if empty_labeled.is_empty() { "OK" } else { "REVIEW" }.to_string(),
        );
        out.insert("issue".to_string(), empty_labeled.join(", "));
        out.extend(cells);
        out
    }
}

impl Default for Standardizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the transform for one cell.
fn transform_value(raw: &str, header: &str, column_type: ColumnType) -> String {
    let value = raw.trim();
    match column_type {
        ColumnType::Email => value.to_lowercase(),
        ColumnType::Phone => digits_only(value),
        ColumnType::Date => dates::to_iso(value),
        ColumnType::String if LOCATION_NAME.is_match(header) => title_case(value),
        ColumnType::String | ColumnType::Number => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::TypeInferencer;
    use crate::input::Parser;

    fn standardize(csv: &str) -> StandardizedData {
        let table = Parser::new().parse(csv);
        let profiles = TypeInferencer::new().infer(&table);
        Standardizer::new().standardize(&table, &profiles).unwrap()
    }

    #[test]
    fn test_email_lowercased_phone_digits() {
        let data = standardize("email,phone\nAnn@X.COM,(555) 123-4567\n");
        assert_eq!(data.rows[0].get("email").unwrap(), "ann@x.com");
        assert_eq!(data.rows[0].get("phone").unwrap(), "5551234567");
    }

    #[test]
    fn test_date_reformatted_unparsable_passthrough() {
        let data = standardize("joined\n03/05/2024\n2024-04-01\n");
        assert_eq!(data.rows[0].get("joined").unwrap(), "2024-03-05");
        assert_eq!(data.rows[1].get("joined").unwrap(), "2024-04-01");

        // A column that is not date-typed passes through untouched.
        let data = standardize("note\nhello\nworld\n");
        assert_eq!(data.rows[0].get("note").unwrap(), "hello");
    }

    #[test]
    fn test_location_string_title_cased() {
        let data = standardize("city,comment\nnew york,keep as-is\nparis,ok\n");
        assert_eq!(data.rows[0].get("city").unwrap(), "New York");
        assert_eq!(data.rows[0].get("comment").unwrap(), "keep as-is");
    }

    #[test]
    fn test_status_and_issue_labels() {
        let data = standardize("name,email,amount\nAnn,a@x.com,5\n,b@x.com,6\n");
        assert_eq!(data.rows[0].get("status").unwrap(), "OK");
        assert_eq!(data.rows[0].get("issue").unwrap(), "");
        assert_eq!(data.rows[1].get("status").unwrap(), "REVIEW");
        assert_eq!(data.rows[1].get("issue").unwrap(), "name");
    }

    #[test]
    fn test_issue_joins_multiple_fields() {
        let data = standardize("name,City\nAnn,Paris\n,\n");
        assert_eq!(data.rows[1].get("issue").unwrap(), "name, city");
    }

    #[test]
    fn test_output_column_order() {
        let data = standardize("b,a\n1,2\n");
        let first_line = data.csv.lines().next().unwrap();
        assert_eq!(first_line, "status,issue,b,a");
    }

    #[test]
    fn test_transforms_are_stable() {
        let once = standardize("email,city\nAnn@X.com,new york\n");
        let row = &once.rows[0];
        assert_eq!(
            transform_value(row.get("email").unwrap(), "email", ColumnType::Email),
            "ann@x.com"
        );
        assert_eq!(
            transform_value(row.get("city").unwrap(), "city", ColumnType::String),
            "New York"
        );
    }
}
