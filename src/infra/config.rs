// ============================================================
// Layer 6 — Pipeline Configuration (YAML)
// ============================================================
// Both procedures start by reading configs/config.yaml (or the
// file given with --config). Every key is optional; whatever is
// missing falls back to the constants the pipeline was tuned
// with: 10 epochs of SGD at lr 1e-3, seed 2021, and the first
// 5000 training images held out for validation.
//
// A missing or malformed file is still an error.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::sample::IMAGE_PIXELS;
use crate::ml::model::ClassifierConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub artifacts: ArtifactsConfig,
    pub training:  TrainingConfig,
    pub model:     ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory holding saved models
    pub model_dir:           PathBuf,
    /// Directory holding per-run epoch metrics CSVs
    pub metrics_dir:         PathBuf,
    pub base_model_name:     String,
    pub transfer_model_name: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_dir:           PathBuf::from("artifacts/models"),
            metrics_dir:         PathBuf::from("artifacts/metrics"),
            base_model_name:     "base_model".to_string(),
            transfer_model_name: "greater_than_5_model".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs:          usize,
    pub batch_size:      usize,
    pub learning_rate:   f64,
    pub seed:            u64,
    pub validation_size: usize,
    pub num_workers:     usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs:          10,
            batch_size:      32,
            learning_rate:   1e-3,
            seed:            2021,
            validation_size: 5000,
            num_workers:     1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub hidden_sizes:   Vec<usize>,
    pub negative_slope: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            hidden_sizes:   vec![300, 100],
            negative_slope: 0.3,
        }
    }
}

impl ModelConfig {
    /// Architecture of the base classifier: one output per digit
    pub fn classifier(&self) -> ClassifierConfig {
        ClassifierConfig::new(self.hidden_sizes.clone(), 10)
            .with_input_size(IMAGE_PIXELS)
            .with_negative_slope(self.negative_slope)
    }
}

impl PipelineConfig {
    /// Read and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file '{}'", path.display()))?;
        let cfg = Self::from_yaml(&text)
            .with_context(|| format!("Invalid config file '{}'", path.display()))?;
        tracing::debug!("Loaded config from '{}': {:?}", path.display(), cfg);
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a map
        let cfg: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        let t = &self.training;
        if t.epochs == 0 {
            bail!("training.epochs must be at least 1");
        }
        if t.batch_size == 0 {
            bail!("training.batch_size must be at least 1");
        }
        if t.num_workers == 0 {
            bail!("training.num_workers must be at least 1");
        }
        if !(t.learning_rate.is_finite() && t.learning_rate > 0.0) {
            bail!("training.learning_rate must be a positive number, got {}", t.learning_rate);
        }
        if self.model.hidden_sizes.is_empty() || self.model.hidden_sizes.contains(&0) {
            bail!("model.hidden_sizes must list at least one non-zero layer width");
        }
        if self.artifacts.base_model_name == self.artifacts.transfer_model_name {
            bail!("base and transfer models need distinct artifact names");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = PipelineConfig::from_yaml("").unwrap();
        assert_eq!(cfg, PipelineConfig::default());
        assert_eq!(cfg.training.seed, 2021);
        assert_eq!(cfg.training.validation_size, 5000);
        assert_eq!(cfg.artifacts.model_dir, PathBuf::from("artifacts/models"));
    }

    #[test]
    fn test_partial_override() {
        let cfg = PipelineConfig::from_yaml(
            "training:\n  epochs: 3\nmodel:\n  hidden_sizes: [64]\n",
        ).unwrap();
        assert_eq!(cfg.training.epochs, 3);
        assert_eq!(cfg.training.batch_size, 32);
        assert_eq!(cfg.model.hidden_sizes, vec![64]);
        assert_eq!(cfg.model.negative_slope, 0.3);
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let cfg = PipelineConfig::from_yaml("data:\n  source: mnist\n").unwrap();
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(PipelineConfig::from_yaml("training:\n  epochs: 0\n").is_err());
        let err = PipelineConfig::from_yaml("training:\n  num_workers: 0\n").unwrap_err();
        assert!(err.to_string().contains("num_workers"));
        assert!(PipelineConfig::from_yaml("training:\n  learning_rate: -1.0\n").is_err());
        assert!(PipelineConfig::from_yaml("model:\n  hidden_sizes: []\n").is_err());
        assert!(PipelineConfig::from_yaml("training: [1, 2]\n").is_err());
    }

    #[test]
    fn test_load_reads_file_and_reports_missing() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "training:\n  batch_size: 8\n").unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap().training.batch_size, 8);

        let err = PipelineConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(format!("{err:#}").contains("nope.yaml"));
    }

    #[test]
    fn test_shipped_config_parses() {
        let cfg = PipelineConfig::load(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/config.yaml"),
        ).unwrap();
        assert_eq!(cfg, PipelineConfig::default());
    }

    #[test]
    fn test_classifier_architecture_from_model_section() {
        let cfg = ModelConfig { hidden_sizes: vec![16, 8], negative_slope: 0.1 }.classifier();
        assert_eq!(cfg.hidden_sizes, vec![16, 8]);
        assert_eq!(cfg.num_classes, 10);
        assert_eq!(cfg.input_size, IMAGE_PIXELS);
    }
}
