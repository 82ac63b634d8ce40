// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores trained classifiers. An artifact named
// `<name>` is two files in the model directory:
//
//   artifacts/models/
//     base_model.mpk.gz             ← weights (CompactRecorder)
//     base_model.json               ← ClassifierConfig
//     greater_than_5_model.mpk.gz
//     greater_than_5_model.json
//
// The config is needed to rebuild a module of the right shape
// before the weights can be loaded into it; CompactRecorder
// refuses records that do not match the module.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{anyhow, bail, Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::ml::model::{ClassifierConfig, DigitClassifier};

/// Extension CompactRecorder gives the files it writes
const WEIGHTS_EXTENSION: &str = "mpk.gz";

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Point the store at `dir`, creating it (like `mkdir -p`) if needed.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create model directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Path of the weights file, extension included
    pub fn weights_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{WEIGHTS_EXTENSION}"))
    }

    pub fn config_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.weights_path(name).is_file() && self.config_path(name).is_file()
    }

    /// Write the architecture config and the weights of `model`.
    /// Returns the weights path.
    pub fn save_model<B: Backend>(&self, name: &str, model: &DigitClassifier<B>) -> Result<PathBuf> {
        let config_path = self.config_path(name);
        model
            .config()
            .save(&config_path)
            .with_context(|| format!("Cannot write model config to '{}'", config_path.display()))?;

        // The recorder appends its own extension
        let path = self.dir.join(name);
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        let weights = self.weights_path(name);
        tracing::debug!("Saved artifact '{}' to '{}'", name, weights.display());
        Ok(weights)
    }

    /// Rebuild the model described by `<name>.json` and load its weights.
    pub fn load_model<B: Backend>(&self, name: &str, device: &B::Device) -> Result<DigitClassifier<B>> {
        if !self.exists(name) {
            bail!(
                "No model artifact '{}' in '{}'. Have you run the stage that trains it?",
                name,
                self.dir.display()
            );
        }

        let config_path = self.config_path(name);
        let config = ClassifierConfig::load(&config_path)
            .map_err(|e| anyhow!("Cannot read model config '{}': {e}", config_path.display()))?;

        let path   = self.dir.join(name);
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| format!("Cannot load model weights '{}'", path.display()))?;

        tracing::info!("Loaded artifact '{}' from '{}'", name, self.dir.display());
        Ok(config.init::<B>(device).load_record(record))
    }
}
