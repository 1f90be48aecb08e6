//! Parsed table representation and source metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single data row: column name → cell value, in header order.
pub type Record = IndexMap<String, String>;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(path: PathBuf, hash: String, size_bytes: u64, row_count: usize, column_count: usize) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }

    /// Dataset basename used to key generated artifacts (file stem).
    pub fn basename(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.clone())
    }
}

/// Represents parsed tabular data.
///
/// Rows are ordered maps from column name to cell value so that per-name
/// lookups (required-field checks, profile keys) stay cheap. Header names
/// are not deduplicated; when two columns share a name the later column's
/// cell wins in the row map, while `headers` still lists both entries.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    /// Column headers, in input order.
    pub headers: Vec<String>,
    /// Row records, in input order. Every record holds a value (possibly
    /// empty) for every declared header.
    pub rows: Vec<Record>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(column).map(|s| s.as_str()))
    }

    /// Get all values for a column by name.
    pub fn column_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.rows
            .iter()
            .map(move |row| row.get(name).map(|s| s.as_str()).unwrap_or(""))
    }

    /// First header whose name contains `needle`, case-insensitively.
    ///
    /// This is the documented column-selection policy for keyword lookups
    /// (identifier columns, country/state/city distributions): first match
    /// wins, substring, case-insensitive.
    pub fn find_column(&self, needle: &str) -> Option<&str> {
        let needle = needle.to_lowercase();
        self.headers
            .iter()
            .find(|h| h.to_lowercase().contains(&needle))
            .map(|h| h.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        let headers = vec!["name".to_string(), "customer_id".to_string()];
        let rows = vec![
            Record::from_iter([("name".to_string(), "Alice".to_string()), ("customer_id".to_string(), "1".to_string())]),
            Record::from_iter([("name".to_string(), "Bob".to_string()), ("customer_id".to_string(), "2".to_string())]),
        ];
        DataTable::new(headers, rows)
    }

    #[test]
    fn test_get_and_counts() {
        let t = table();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.get(0, "name"), Some("Alice"));
        assert_eq!(t.get(1, "customer_id"), Some("2"));
        assert_eq!(t.get(2, "name"), None);
    }

    #[test]
    fn test_find_column_first_match_wins() {
        let t = table();
        assert_eq!(t.find_column("id"), Some("customer_id"));
        assert_eq!(t.find_column("NAME"), Some("name"));
        assert_eq!(t.find_column("zip"), None);
    }

    #[test]
    fn test_column_values_missing_name() {
        let t = table();
        let vals: Vec<&str> = t.column_values("missing").collect();
        assert_eq!(vals, vec!["", ""]);
    }
}
