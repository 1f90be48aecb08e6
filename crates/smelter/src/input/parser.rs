//! Comma-separated text parser with quote-escaped fields.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, Record, SourceMetadata};
use crate::error::{Result, SmelterError};

/// Parses comma-separated text into a [`DataTable`].
///
/// Dialect: double quotes toggle quoted-field state, a doubled quote inside
/// a quoted field is a literal quote, commas and line breaks inside quotes
/// are data, and carriage returns are dropped everywhere. The first physical
/// row is always the header row; blank header cells become
/// `column_<position>`. Header names are not deduplicated; for a repeated
/// name the later column's cell wins in the row map.
pub struct Parser;

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a file and return the data table and source metadata.
    ///
    /// A file that yields zero header columns is rejected as empty input.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| SmelterError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| SmelterError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let text = String::from_utf8_lossy(&contents);
        let table = self.parse(&text);

        if table.headers.is_empty() {
            return Err(SmelterError::EmptyData(format!(
                "no columns found in '{}'",
                path.display()
            )));
        }

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse text directly.
    ///
    /// Wholly empty input produces a table with no headers; callers must
    /// treat zero headers as invalid input rather than proceeding.
    pub fn parse(&self, text: &str) -> DataTable {
        let lines = split_lines(text);

        let mut headers: Vec<String> = Vec::new();
        let mut rows: Vec<Record> = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let cells = split_cells(line);
            if index == 0 {
                for (pos, cell) in cells.iter().enumerate() {
                    let trimmed = cell.trim();
                    if trimmed.is_empty() {
                        headers.push(format!("column_{}", pos + 1));
                    } else {
                        headers.push(trimmed.to_string());
                    }
                }
            } else {
                let mut row = Record::with_capacity(headers.len());
                for (pos, header) in headers.iter().enumerate() {
                    let value = cells.get(pos).map(|c| c.trim()).unwrap_or("");
                    row.insert(header.clone(), value.to_string());
                }
                rows.push(row);
            }
        }

        DataTable::new(headers, rows)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into logical lines on unquoted newlines.
///
/// Carriage returns are dropped unconditionally. Quote characters are kept
/// verbatim (a doubled quote passes through as two characters) so that cell
/// splitting can do the actual unquoting. A trailing unterminated segment
/// is kept only when non-empty, so a final newline does not create a
/// phantom row.
fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    current.push('"');
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                    current.push(ch);
                }
            }
            '\n' if !in_quotes => {
                lines.push(std::mem::take(&mut current));
            }
            '\r' => {}
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split one logical line into cells on unquoted commas.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if quoted && chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    quoted = !quoted;
                }
            }
            ',' if !quoted => {
                cells.push(std::mem::take(&mut cell));
            }
            _ => cell.push(ch),
        }
    }
    cells.push(cell);

    cells
}
