// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records the per-epoch history of a fit to a CSV file, one
// file per model: <metrics_dir>/<model_name>.csv
//
// Example CSV output:
//   epoch,loss,accuracy,val_loss,val_accuracy
//   1,0.912300,0.771000,0.540100,0.862000
//   2,0.480200,0.873000,0.401700,0.889000
//
// Runs append, so repeated trainings of the same model keep
// their earlier history below the header.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

const HEADER: &str = "epoch,loss,accuracy,val_loss,val_accuracy";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean cross-entropy over the training samples
    pub loss: f64,

    /// Fraction of training samples classified correctly
    pub accuracy: f64,

    /// Mean cross-entropy over the validation samples
    pub val_loss: f64,

    /// Fraction of validation samples classified correctly
    pub val_accuracy: f64,
}

impl EpochMetrics {
    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the metrics directory and CSV (with header) if needed.
    pub fn new(dir: impl AsRef<Path>, model_name: &str) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join(format!("{model_name}.csv"));
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch, m.loss, m.accuracy, m.val_loss, m.val_accuracy,
        )?;
        Ok(())
    }

    /// Append a whole training history.
    pub fn log_all(&self, history: &[EpochMetrics]) -> Result<()> {
        for m in history {
            self.log(m)?;
        }
        tracing::debug!("Logged {} epochs to '{}'", history.len(), self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
