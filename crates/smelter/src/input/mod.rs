//! Input parsing: delimited text to structured tables.

mod parser;
mod source;

pub use parser::Parser;
pub use source::{DataTable, Record, SourceMetadata};
