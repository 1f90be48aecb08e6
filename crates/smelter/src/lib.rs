//! Smelter: data quality and standardization pipeline for tabular datasets.
//!
//! Smelter parses comma-separated text, infers a semantic type per column,
//! scores data quality, and emits a standardized copy of the dataset plus
//! supporting reports. A hosted text generation service can optionally
//! replace the deterministic report artifacts; the pipeline works fully
//! without it.
//!
//! # Example
//!
//! ```no_run
//! use smelter::{MemoryStore, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default());
//! let mut store = MemoryStore::new();
//! let outcome = pipeline
//!     .process_file("customers.csv".as_ref(), &mut store)
//!     .unwrap();
//!
//! println!("wrote {} artifacts", outcome.artifacts.len());
//! ```

pub mod error;
pub mod inference;
pub mod input;
pub mod llm;
pub mod pipeline;
pub mod quality;
pub mod schema;
pub mod standardize;
pub mod store;
pub mod text;

pub use error::{Result, SmelterError};
pub use inference::TypeInferencer;
pub use input::{DataTable, Parser, Record, SourceMetadata};
pub use llm::{ChatMessage, GenConfig, HfProvider, MockProvider, TextGenerator};
pub use pipeline::{
    FileOutcome, FileReport, Pipeline, PipelineConfig, PipelineRun, Stage, StageGroup,
    StageSelection, StageStatus,
};
pub use quality::{QualityAssessor, QualityMetrics, QualityReport};
pub use schema::{ColumnProfile, ColumnType};
pub use standardize::{StandardizedData, Standardizer};
pub use store::{ArtifactStore, DirStore, MemoryStore};
