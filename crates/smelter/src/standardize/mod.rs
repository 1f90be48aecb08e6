//! Standardization: per-type transforms, row relabeling, CSV output.

mod engine;
mod serialize;

pub use engine::{StandardizedData, Standardizer};
pub use serialize::to_csv;
