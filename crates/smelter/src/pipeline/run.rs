//! Pipeline stages, selections, and per-file run state.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SmelterError};

/// Fixed stage order for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Parse the input file.
    Load,
    /// Quality assessment and its artifacts.
    Quality,
    /// Schema metadata artifact.
    Metadata,
    /// Standardization rules and standardized output.
    Standardize,
    /// AI insights and dashboard configuration.
    Ai,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Load,
        Stage::Quality,
        Stage::Metadata,
        Stage::Standardize,
        Stage::Ai,
    ];

    /// Stable identifier used in persisted state.
    pub fn id(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Quality => "quality",
            Stage::Metadata => "metadata",
            Stage::Standardize => "standardize",
            Stage::Ai => "ai",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Load => "Loading dataset",
            Stage::Quality => "Assessing data quality",
            Stage::Metadata => "Generating metadata",
            Stage::Standardize => "Generating standardized data",
            Stage::Ai => "Preparing AI insights",
        }
    }
}

/// Selectable stage groups. `Load` is not selectable: loading and quality
/// assessment run for any selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageGroup {
    Quality,
    Metadata,
    Standardize,
    Ai,
}

impl StageGroup {
    /// All groups in stage order.
    pub const ALL: [StageGroup; 4] = [
        StageGroup::Quality,
        StageGroup::Metadata,
        StageGroup::Standardize,
        StageGroup::Ai,
    ];

    /// The stage this group completes at.
    pub fn stage(&self) -> Stage {
        match self {
            StageGroup::Quality => Stage::Quality,
            StageGroup::Metadata => Stage::Metadata,
            StageGroup::Standardize => Stage::Standardize,
            StageGroup::Ai => Stage::Ai,
        }
    }

    /// Artifact file names this group produces.
    pub fn artifacts(&self) -> &'static [&'static str] {
        match self {
            StageGroup::Quality => &["quality_info.txt", "data_quality.txt", "quality_metrics.json"],
            StageGroup::Metadata => &["metadata.yaml"],
            StageGroup::Standardize => &["rules.yaml", "standardized_data.txt"],
            StageGroup::Ai => &["ai_insights.md", "dashboard_config.json"],
        }
    }

    /// Parse a group name (`quality`, `metadata`, `standardize`, `ai`).
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "quality" => Ok(StageGroup::Quality),
            "metadata" => Ok(StageGroup::Metadata),
            "standardize" => Ok(StageGroup::Standardize),
            "ai" => Ok(StageGroup::Ai),
            other => Err(SmelterError::Config(format!("unknown stage group '{other}'"))),
        }
    }
}

/// A non-empty set of selected stage groups.
#[derive(Debug, Clone)]
pub struct StageSelection {
    groups: BTreeSet<StageGroup>,
}

impl StageSelection {
    /// Build a selection; rejects the empty set.
    pub fn new(groups: impl IntoIterator<Item = StageGroup>) -> Result<Self> {
        let groups: BTreeSet<StageGroup> = groups.into_iter().collect();
        if groups.is_empty() {
            return Err(SmelterError::Config("stage selection must not be empty".to_string()));
        }
        Ok(Self { groups })
    }

    /// Everything up to and including `ai`.
    pub fn all() -> Self {
        Self {
            groups: StageGroup::ALL.into_iter().collect(),
        }
    }

    /// Whether a group was selected.
    pub fn contains(&self, group: StageGroup) -> bool {
        self.groups.contains(&group)
    }

    /// Highest-ordered selected stage. Intermediate stages below it run
    /// regardless of whether they were individually selected.
    pub fn ceiling(&self) -> Stage {
        self.groups
            .iter()
            .next_back()
            .map(StageGroup::stage)
            .unwrap_or(Stage::Quality)
    }

    /// Artifact names required by the selected groups (not by the ceiling).
    pub fn required_artifacts(&self) -> Vec<&'static str> {
        StageGroup::ALL
            .iter()
            .filter(|group| self.groups.contains(group))
            .flat_map(|group| group.artifacts().iter().copied())
            .collect()
    }

    /// Selected groups, in stage order.
    pub fn iter(&self) -> impl Iterator<Item = StageGroup> + '_ {
        self.groups.iter().copied()
    }
}

/// Display state of one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Processing,
    Complete,
}

/// Persisted per-stage state: enough to reconstruct display on resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageState {
    pub status: StageStatus,
    pub message: String,
}

impl StageState {
    fn pending() -> Self {
        Self {
            status: StageStatus::Pending,
            message: "Pending".to_string(),
        }
    }
}

/// Progress record for one input file, persisted write-through after every
/// artifact write. Transitions only move forward; a `Complete` stage never
/// regresses except through [`PipelineRun::reset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Dataset basename the run belongs to.
    pub basename: String,
    /// Per-stage state, keyed by stage id, in stage order.
    pub stages: IndexMap<String, StageState>,
}

impl PipelineRun {
    /// Fresh run with every stage pending.
    pub fn new(basename: impl Into<String>) -> Self {
        let stages = Stage::ALL
            .iter()
            .map(|stage| (stage.id().to_string(), StageState::pending()))
            .collect();
        Self {
            basename: basename.into(),
            stages,
        }
    }

    /// Store key for this run's persisted state.
    pub fn state_key(basename: &str) -> String {
        format!("{basename}_pipeline_state.json")
    }

    /// Update one stage. Backward transitions out of `Complete` are
    /// ignored.
    pub fn set(&mut self, stage: Stage, status: StageStatus, message: impl Into<String>) {
        let Some(state) = self.stages.get_mut(stage.id()) else {
            return;
        };
        if state.status == StageStatus::Complete && status != StageStatus::Complete {
            return;
        }
        state.status = status;
        state.message = message.into();
    }

    /// Current state of a stage.
    pub fn state(&self, stage: Stage) -> Option<&StageState> {
        self.stages.get(stage.id())
    }

    /// Whether a stage has completed.
    pub fn is_complete(&self, stage: Stage) -> bool {
        self.state(stage)
            .map(|s| s.status == StageStatus::Complete)
            .unwrap_or(false)
    }

    /// Explicit reset: every stage back to pending.
    pub fn reset(&mut self) {
        for state in self.stages.values_mut() {
            *state = StageState::pending();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_is_total() {
        assert!(Stage::Load < Stage::Quality);
        assert!(Stage::Quality < Stage::Metadata);
        assert!(Stage::Metadata < Stage::Standardize);
        assert!(Stage::Standardize < Stage::Ai);
    }

    #[test]
    fn test_selection_ceiling() {
        let sel = StageSelection::new([StageGroup::Quality, StageGroup::Standardize]).unwrap();
        assert_eq!(sel.ceiling(), Stage::Standardize);

        let sel = StageSelection::new([StageGroup::Quality]).unwrap();
        assert_eq!(sel.ceiling(), Stage::Quality);
    }

    #[test]
    fn test_empty_selection_rejected() {
        assert!(StageSelection::new([]).is_err());
    }

    #[test]
    fn test_required_artifacts_follow_selection_not_ceiling() {
        let sel = StageSelection::new([StageGroup::Quality, StageGroup::Ai]).unwrap();
        let required = sel.required_artifacts();
        assert!(required.contains(&"quality_info.txt"));
        assert!(required.contains(&"ai_insights.md"));
        assert!(!required.contains(&"metadata.yaml"));
    }

    #[test]
    fn test_forward_only_transitions() {
        let mut run = PipelineRun::new("sales");
        run.set(Stage::Quality, StageStatus::Complete, "done");
        run.set(Stage::Quality, StageStatus::Pending, "again");
        assert!(run.is_complete(Stage::Quality));
        assert_eq!(run.state(Stage::Quality).unwrap().message, "done");

        run.reset();
        assert!(!run.is_complete(Stage::Quality));
    }

    #[test]
    fn test_parse_group() {
        assert_eq!(StageGroup::parse("Quality").unwrap(), StageGroup::Quality);
        assert_eq!(StageGroup::parse(" ai ").unwrap(), StageGroup::Ai);
        assert!(StageGroup::parse("bogus").is_err());
    }

    #[test]
    fn test_run_state_roundtrips_as_json() {
        let mut run = PipelineRun::new("sales");
        run.set(Stage::Load, StageStatus::Complete, "Dataset loaded");
        let json = serde_json::to_string(&run).unwrap();
        let back: PipelineRun = serde_json::from_str(&json).unwrap();
        assert!(back.is_complete(Stage::Load));
        assert_eq!(back.basename, "sales");
    }
}
