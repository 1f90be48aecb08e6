//! Multi-file pipeline driver with stage ceilings, skip-if-complete, and
//! write-through progress persistence.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::inference::TypeInferencer;
use crate::input::{DataTable, Parser, Record};
use crate::llm::{prompts, ChatMessage, GenConfig, TextGenerator};
use crate::pipeline::dashboard::{self, DashboardConfig};
use crate::pipeline::fallback;
use crate::pipeline::run::{PipelineRun, Stage, StageGroup, StageSelection, StageStatus};
use crate::quality::QualityAssessor;
use crate::standardize::Standardizer;
use crate::store::ArtifactStore;

/// How many raw rows feed the metadata generation prompt.
const METADATA_SAMPLE_ROWS: usize = 6;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Which stage groups the caller selected.
    pub selection: StageSelection,
    /// Generation request parameters.
    pub generation: GenConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            selection: StageSelection::all(),
            generation: GenConfig::default(),
        }
    }
}

/// Outcome for one processed input file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Dataset basename.
    pub basename: String,
    /// Whether the file was skipped because its selected artifacts already
    /// existed.
    pub skipped: bool,
    /// Store keys written during this run, in write order.
    pub artifacts: Vec<String>,
    /// Final run state (absent for skipped files).
    pub run: Option<PipelineRun>,
}

/// Per-file result of a multi-file run.
#[derive(Debug)]
pub struct FileReport {
    /// Input path.
    pub path: PathBuf,
    /// Outcome, or the terminal error for this file.
    pub result: Result<FileOutcome>,
}

/// Drives parse → quality → metadata → standardize → ai per input file.
///
/// Files are processed one at a time, each to its stage ceiling, before the
/// next begins. Generation calls are the only suspension points; their
/// failures substitute deterministic fallbacks and never abort the run.
/// Store failures are logged and swallowed: the in-memory run continues,
/// at the cost of resumability.
pub struct Pipeline {
    config: PipelineConfig,
    parser: Parser,
    inferencer: TypeInferencer,
    assessor: QualityAssessor,
    standardizer: Standardizer,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Pipeline {
    /// Create a pipeline with the given configuration and no generator.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            parser: Parser::new(),
            inferencer: TypeInferencer::new(),
            assessor: QualityAssessor::new(),
            standardizer: Standardizer::new(),
            generator: None,
        }
    }

    /// Attach a text generation provider. Deterministic builders remain the
    /// fallback for every artifact the provider fails to produce.
    pub fn with_generator(mut self, provider: impl TextGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(provider));
        self
    }

    /// Process files in order, each to completion before the next begins.
    /// A file that fails (e.g. no parseable columns) is reported and the
    /// run continues with the remaining files.
    pub fn process_files(&self, paths: &[PathBuf], store: &mut dyn ArtifactStore) -> Vec<FileReport> {
        paths
            .iter()
            .map(|path| {
                let result = self.process_file(path, store);
                if let Err(error) = &result {
                    warn!(path = %path.display(), %error, "file failed");
                }
                FileReport {
                    path: path.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Process one file up to the selection's stage ceiling.
    pub fn process_file(&self, path: &Path, store: &mut dyn ArtifactStore) -> Result<FileOutcome> {
        let basename = basename_of(path);

        let required: Vec<String> = self
            .config
            .selection
            .required_artifacts()
            .iter()
            .map(|name| artifact_key(&basename, name))
            .collect();
        if required.iter().all(|key| store.contains(key)) {
            info!(file = %path.display(), "all selected artifacts exist, skipping");
            return Ok(FileOutcome {
                basename,
                skipped: true,
                artifacts: Vec::new(),
                run: None,
            });
        }

        let (table, source) = self.parser.parse_file(path)?;
        let ceiling = self.config.selection.ceiling();
        let mut run = PipelineRun::new(&basename);
        let mut written: Vec<String> = Vec::new();

        self.set_stage(store, &mut run, Stage::Load, StageStatus::Processing, "Loading...");
        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "dataset loaded"
        );
        self.set_stage(store, &mut run, Stage::Load, StageStatus::Complete, "Dataset loaded");

        // Quality always runs: it is inseparable from loading.
        self.set_stage(store, &mut run, Stage::Quality, StageStatus::Processing, "Assessing...");
        let profiles = self.inferencer.infer(&table);
        let report = self.assessor.assess(&table, &profiles);

        let quality_info = self
            .try_generate(&prompts::quality_info(&report.metrics)?, &self.config.generation)
            .unwrap_or_else(|| report.report.clone());
        self.write(store, &mut run, &mut written, &basename, "quality_info.txt", &quality_info);
        self.write(store, &mut run, &mut written, &basename, "data_quality.txt", &report.insights);
        let metrics_json = serde_json::to_string_pretty(&report.metrics)?;
        self.write(store, &mut run, &mut written, &basename, "quality_metrics.json", &metrics_json);
        self.set_stage(
            store,
            &mut run,
            Stage::Quality,
            StageStatus::Complete,
            "Generated quality_info.txt",
        );
        if ceiling == Stage::Quality {
            return self.finish(store, run, basename, written, ceiling);
        }

        self.set_stage(store, &mut run, Stage::Metadata, StageStatus::Processing, "Generating...");
        let raw_sample: Vec<Record> = table.rows.iter().take(METADATA_SAMPLE_ROWS).cloned().collect();
        let metadata = self
            .try_generate(
                &prompts::metadata(&table.headers, &raw_sample, &quality_info)?,
                &self.config.generation,
            )
            .unwrap_or_else(|| fallback::metadata_yaml(&table, &profiles));
        self.write(store, &mut run, &mut written, &basename, "metadata.yaml", &metadata);
        self.set_stage(
            store,
            &mut run,
            Stage::Metadata,
            StageStatus::Complete,
            "Generated metadata.yaml",
        );
        if ceiling == Stage::Metadata {
            return self.finish(store, run, basename, written, ceiling);
        }

        self.set_stage(store, &mut run, Stage::Standardize, StageStatus::Processing, "Standardizing...");
        let rules = self
            .try_generate(
                &prompts::rules(&profiles, &quality_info, &metadata)?,
                &self.config.generation,
            )
            .unwrap_or_else(|| fallback::rules_yaml(&profiles));
        self.write(store, &mut run, &mut written, &basename, "rules.yaml", &rules);
        let standardized = self.standardizer.standardize(&table, &profiles)?;
        self.write(
            store,
            &mut run,
            &mut written,
            &basename,
            "standardized_data.txt",
            &standardized.csv,
        );
        self.set_stage(
            store,
            &mut run,
            Stage::Standardize,
            StageStatus::Complete,
            "Generated standardized_data.txt",
        );
        if ceiling == Stage::Standardize {
            return self.finish(store, run, basename, written, ceiling);
        }

        self.set_stage(store, &mut run, Stage::Ai, StageStatus::Processing, "Generating...");
        let insights = self.build_ai_insights(&report, &standardized.sample_rows)?;
        self.write(store, &mut run, &mut written, &basename, "ai_insights.md", &insights);
        let config = self.build_dashboard_config(&table, &profiles, &report, &standardized.sample_rows)?;
        self.write(
            store,
            &mut run,
            &mut written,
            &basename,
            "dashboard_config.json",
            &config.to_pretty_json()?,
        );
        self.set_stage(store, &mut run, Stage::Ai, StageStatus::Complete, "Prepared AI insights");

        self.finish(store, run, basename, written, ceiling)
    }

    /// AI narrative: generated when a provider is attached, a preview when
    /// not, a clearly marked fallback when the call fails.
    fn build_ai_insights(
        &self,
        report: &crate::quality::QualityReport,
        sample_rows: &[Record],
    ) -> Result<String> {
        let Some(generator) = &self.generator else {
            return Ok(fallback::ai_insights_preview(&report.metrics));
        };

        let messages = prompts::ai_insights(&report.metrics, sample_rows)?;
        let config = self.config.generation.with_max_tokens(prompts::AI_INSIGHTS_MAX_TOKENS);
        match generator.generate(&messages, &config) {
            Ok(text) => Ok(text),
            Err(error) => {
                warn!(provider = generator.name(), %error, "AI insights generation failed");
                Ok(fallback::ai_insights_failure(&error.to_string()))
            }
        }
    }

    /// Dashboard chart config: parsed from the provider's JSON, defaulting
    /// to an empty chart list whenever that is not possible.
    fn build_dashboard_config(
        &self,
        table: &DataTable,
        profiles: &[crate::schema::ColumnProfile],
        report: &crate::quality::QualityReport,
        sample_rows: &[Record],
    ) -> Result<DashboardConfig> {
        let Some(generator) = &self.generator else {
            return Ok(DashboardConfig::default());
        };

        let messages = prompts::dashboard_config(&table.headers, profiles, &report.metrics, sample_rows)?;
        match generator.generate(&messages, &self.config.generation) {
            Ok(raw) => Ok(dashboard::parse_chart_config(&raw)),
            Err(error) => {
                warn!(provider = generator.name(), %error, "chart config generation failed");
                Ok(DashboardConfig::default())
            }
        }
    }

    /// Ask the generator, treating any failure as "use the deterministic
    /// fallback".
    fn try_generate(&self, messages: &[ChatMessage], config: &GenConfig) -> Option<String> {
        let generator = self.generator.as_ref()?;
        match generator.generate(messages, config) {
            Ok(text) => Some(text),
            Err(error) => {
                warn!(provider = generator.name(), %error, "generation failed, using fallback");
                None
            }
        }
    }

    /// Write one artifact and persist progress immediately afterward.
    fn write(
        &self,
        store: &mut dyn ArtifactStore,
        run: &mut PipelineRun,
        written: &mut Vec<String>,
        basename: &str,
        name: &str,
        value: &str,
    ) {
        let key = artifact_key(basename, name);
        if let Err(error) = store.put(&key, value) {
            warn!(%key, %error, "artifact write failed, continuing without persistence");
        }
        written.push(key);
        self.persist(store, run);
    }

    /// Update a stage and persist the run state.
    fn set_stage(
        &self,
        store: &mut dyn ArtifactStore,
        run: &mut PipelineRun,
        stage: Stage,
        status: StageStatus,
        message: &str,
    ) {
        run.set(stage, status, message);
        self.persist(store, run);
    }

    /// Write-through persistence of the run record; failures are swallowed
    /// so the in-memory run can continue.
    fn persist(&self, store: &mut dyn ArtifactStore, run: &PipelineRun) {
        let key = PipelineRun::state_key(&run.basename);
        match serde_json::to_string_pretty(run) {
            Ok(json) => {
                if let Err(error) = store.put(&key, &json) {
                    warn!(%key, %error, "progress persistence failed");
                }
            }
            Err(error) => warn!(%key, %error, "progress serialization failed"),
        }
    }

    /// Purge artifacts outside the selection when the run stopped below the
    /// top stage, then build the outcome.
    fn finish(
        &self,
        store: &mut dyn ArtifactStore,
        run: PipelineRun,
        basename: String,
        written: Vec<String>,
        ceiling: Stage,
    ) -> Result<FileOutcome> {
        if ceiling < Stage::Ai {
            let required = self.config.selection.required_artifacts();
            for group in StageGroup::ALL {
                for name in group.artifacts() {
                    if !required.contains(name) {
                        let key = artifact_key(&basename, name);
                        if let Err(error) = store.remove(&key) {
                            warn!(%key, %error, "artifact purge failed");
                        }
                    }
                }
            }
        }

        info!(%basename, artifacts = written.len(), "file finished");
        Ok(FileOutcome {
            basename,
            skipped: false,
            artifacts: written,
            run: Some(run),
        })
    }
}

/// Store key for one generated artifact.
pub fn artifact_key(basename: &str, artifact: &str) -> String {
    format!("{basename}_{artifact}")
}

/// Dataset basename for an input path (file stem).
pub fn basename_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
