//! Column type inference from sampled values.

pub mod dates;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::input::DataTable;
use crate::schema::{ColumnProfile, ColumnType};

/// How many non-empty values are sampled per column.
const SAMPLE_SIZE: usize = 20;

static NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

/// Infers a semantic type per column by sampling leading values.
///
/// The classification is conjunctive: a predicate must hold for every
/// sampled value, and predicates are tried in a fixed priority (email,
/// date, number, phone). One outlier in the sample demotes the column.
pub struct TypeInferencer;

impl TypeInferencer {
    /// Create a new inferencer.
    pub fn new() -> Self {
        Self
    }

    /// Infer one profile per declared column.
    pub fn infer(&self, table: &DataTable) -> Vec<ColumnProfile> {
        table
            .headers
            .iter()
            .map(|name| {
                let values: Vec<&str> = table.column_values(name).collect();
                ColumnProfile::new(name.clone(), infer_type(&values))
            })
            .collect()
    }
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify a column from its first [`SAMPLE_SIZE`] non-empty values.
pub fn infer_type(values: &[&str]) -> ColumnType {
    let sample: Vec<&str> = values
        .iter()
        .copied()
        .filter(|v| !v.is_empty())
        .take(SAMPLE_SIZE)
        .collect();

    if sample.is_empty() {
        return ColumnType::String;
    }

    if sample.iter().all(|v| v.contains('@')) {
        return ColumnType::Email;
    }
    if sample.iter().all(|v| dates::is_date(v)) {
        return ColumnType::Date;
    }
    if sample.iter().all(|v| NUMBER_PATTERN.is_match(v)) {
        return ColumnType::Number;
    }
    if sample.iter().all(|v| digit_count(v) >= 7) {
        return ColumnType::Phone;
    }

    ColumnType::String
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Parser;

    fn profile_of(csv: &str, column: &str) -> ColumnType {
        let table = Parser::new().parse(csv);
        let profiles = TypeInferencer::new().infer(&table);
        profiles
            .into_iter()
            .find(|p| p.name == column)
            .map(|p| p.inferred_type)
            .unwrap()
    }

    #[test]
    fn test_email_column() {
        assert_eq!(
            profile_of("email\na@x.com\nb@y.org\n", "email"),
            ColumnType::Email
        );
    }

    #[test]
    fn test_one_outlier_demotes_email() {
        assert_eq!(
            profile_of("email\na@x.com\nnot-an-email\n", "email"),
            ColumnType::String
        );
    }

    #[test]
    fn test_number_column() {
        assert_eq!(
            profile_of("amount\n-1\n2.5\n300\n", "amount"),
            ColumnType::Number
        );
    }

    #[test]
    fn test_date_beats_number_in_priority() {
        assert_eq!(
            profile_of("when\n2024-01-02\n2024-01-03\n", "when"),
            ColumnType::Date
        );
    }

    #[test]
    fn test_phone_column() {
        assert_eq!(
            profile_of("phone\n(555) 123-4567\n+1 555 987 6543\n", "phone"),
            ColumnType::Phone
        );
    }

    #[test]
    fn test_empty_column_is_string() {
        assert_eq!(profile_of("x,y\n,1\n,2\n", "x"), ColumnType::String);
    }

    #[test]
    fn test_only_first_twenty_nonempty_sampled() {
        // 20 emails followed by junk: the junk is past the sample window.
        let mut csv = String::from("email\n");
        for i in 0..20 {
            csv.push_str(&format!("user{}@example.com\n", i));
        }
        csv.push_str("junk\n");
        assert_eq!(profile_of(&csv, "email"), ColumnType::Email);
    }

    #[test]
    fn test_outlier_inside_sample_window_demotes() {
        let mut csv = String::from("email\n");
        for i in 0..19 {
            csv.push_str(&format!("user{}@example.com\n", i));
        }
        csv.push_str("junk\n");
        assert_eq!(profile_of(&csv, "email"), ColumnType::String);
    }
}
