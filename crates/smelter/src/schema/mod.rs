//! Column profiles: the semantic classification attached to each column.

use serde::{Deserialize, Serialize};

/// Inferred semantic type for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Text values.
    String,
    /// Optional minus sign, digits, optional decimal part.
    Number,
    /// Values containing an `@`.
    Email,
    /// Values parseable as calendar dates.
    Date,
    /// Values with at least 7 digits once non-digits are stripped.
    Phone,
}

impl ColumnType {
    /// Label used in generated YAML and reports.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Email => "email",
            ColumnType::Date => "date",
            ColumnType::Phone => "phone",
        }
    }

    /// Types whose presence makes a column required for completeness.
    pub fn is_contact_like(&self) -> bool {
        matches!(self, ColumnType::Email | ColumnType::Phone | ColumnType::Date)
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::String
    }
}

/// Profile for a single column, computed once per table and immutable
/// afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Inferred data type.
    pub inferred_type: ColumnType,
}

impl ColumnProfile {
    /// Create a new column profile.
    pub fn new(name: impl Into<String>, inferred_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            inferred_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ColumnType::Email).unwrap();
        assert_eq!(json, "\"email\"");
        let back: ColumnType = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(back, ColumnType::Phone);
    }

    #[test]
    fn test_contact_like() {
        assert!(ColumnType::Email.is_contact_like());
        assert!(ColumnType::Date.is_contact_like());
        assert!(!ColumnType::Number.is_contact_like());
    }
}
