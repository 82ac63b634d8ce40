// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// One use case per command. Each reads like the procedure it
// implements: load data → build or load a model → fit → save →
// evaluate. No ML math here and no printing; the use cases
// hand a StageReport back to the CLI.
//
// Every use case runs inside run_stage, which writes the stage
// start/finish banners to the log and records any error with
// its full context chain before passing it on.

/// Stage banners and error logging
pub mod stage;

/// Train the 10-class base classifier
pub mod base_use_case;

/// Transfer the base classifier to "greater than 5"
pub mod transfer_use_case;

/// Re-evaluate a saved artifact on the test split
pub mod evaluate_use_case;

use std::path::PathBuf;

use crate::domain::summary::ModelSummary;
use crate::infra::metrics::EpochMetrics;
use crate::ml::trainer::Evaluation;

/// What a stage produced, for the CLI to print.
#[derive(Debug, Clone)]
pub struct StageReport {
    /// Saved weights, or the artifact that was evaluated
    pub model_path: PathBuf,
    pub summary:    ModelSummary,
    /// Empty when the stage did not train
    pub history:    Vec<EpochMetrics>,
    pub test:       Evaluation,
}

impl StageReport {
    /// Epoch with the lowest validation loss
    pub fn best_epoch(&self) -> Option<&EpochMetrics> {
        let mut best: Option<&EpochMetrics> = None;
        for m in &self.history {
            if best.map_or(true, |b| m.is_improvement(b.val_loss)) {
                best = Some(m);
            }
        }
        best
    }
}
