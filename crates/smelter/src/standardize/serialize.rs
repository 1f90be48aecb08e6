//! CSV serialization for standardized rows.

use crate::error::Result;
use crate::input::Record;

/// Serialize rows under the given column order.
///
/// Fields containing a comma, double quote, or line break are wrapped in
/// double quotes with internal quotes doubled; everything else is written
/// bare. Parsed cells never contain carriage returns, so the writer's
/// quoting matches that rule exactly.
pub fn to_csv(columns: &[String], rows: &[Record]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(columns)?;
    for row in rows {
        let record: Vec<&str> = columns
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or(""))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::error::SmelterError::Config(format!("CSV buffer flush failed: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_plain_fields_unquoted() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let rows = vec![record(&[("a", "1"), ("b", "2")])];
        let csv = to_csv(&columns, &rows).unwrap();
        assert_eq!(csv, "a,b\n1,2\n");
    }

    #[test]
    fn test_comma_quote_newline_escaped() {
        let columns = vec!["v".to_string()];
        let rows = vec![
            record(&[("v", "a,b")]),
            record(&[("v", "say \"hi\"")]),
            record(&[("v", "two\nlines")]),
        ];
        let csv = to_csv(&columns, &rows).unwrap();
        assert_eq!(csv, "v\n\"a,b\"\n\"say \"\"hi\"\"\"\n\"two\nlines\"\n");
    }

    #[test]
    fn test_missing_column_becomes_empty() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let rows = vec![record(&[("a", "1")])];
        let csv = to_csv(&columns, &rows).unwrap();
        assert_eq!(csv, "a,b\n1,\n");
    }
}
