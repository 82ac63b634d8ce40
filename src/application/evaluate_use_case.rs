// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Reloads a saved artifact and scores it on the MNIST test
// split, without training anything. A 2-class artifact is the
// transfer model, so it is scored against binarized labels.

use anyhow::Result;
use burn::prelude::*;

use crate::application::transfer_use_case::BINARY_CLASSES;
use crate::application::StageReport;
use crate::data::dataset::DigitDataset;
use crate::domain::traits::DigitSource;
use crate::infra::{artifacts::ArtifactStore, config::PipelineConfig};
use crate::ml::model::DigitClassifier;
use crate::ml::trainer::evaluate;

pub const STAGE: &str = "evaluating saved model";

pub struct EvaluateUseCase {
    config:     PipelineConfig,
    model_name: String,
}

impl EvaluateUseCase {
    pub fn new(config: PipelineConfig, model_name: impl Into<String>) -> Self {
        Self { config, model_name: model_name.into() }
    }

    pub fn execute<B: Backend>(&self, source: &dyn DigitSource, device: &B::Device) -> Result<StageReport> {
        let cfg   = &self.config;
        let store = ArtifactStore::new(&cfg.artifacts.model_dir)?;
        let model: DigitClassifier<B> = store.load_model(&self.model_name, device)?;
        let summary = model.summary(&self.model_name);
        tracing::info!("{} model summary: \n{}", self.model_name, summary);

        let splits = source.load_splits()?;
        let splits = if model.num_classes() == BINARY_CLASSES {
            tracing::info!("2-class model: scoring against greater-than-5 labels");
            splits.binarized()
        } else {
            splits
        };

        let test = evaluate(&model, DigitDataset::new(splits.test), cfg.training.batch_size, device);
        tracing::info!("evaluation metrics {}", test);

        Ok(StageReport {
            model_path: store.weights_path(&self.model_name),
            summary,
            history: Vec::new(),
            test,
        })
    }
}
