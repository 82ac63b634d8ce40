// ============================================================
// Layer 2 — TransferUseCase
// ============================================================
// Turns the saved base classifier into a "greater than 5"
// binary classifier:
//
//   Step 1: Load MNIST and binarize all three label sets
//   Step 2: Seed the backend
//   Step 3: Load the base model artifact, log its summary
//   Step 4: Freeze every layer but the last
//   Step 5: Attach a new 2-class output layer, log the summary
//   Step 6: Fit, save, evaluate on the binarized test split

use anyhow::Result;
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};

use crate::application::StageReport;
use crate::data::dataset::DigitDataset;
use crate::domain::traits::DigitSource;
use crate::infra::{artifacts::ArtifactStore, config::PipelineConfig, metrics::MetricsLogger};
use crate::ml::model::DigitClassifier;
use crate::ml::trainer::{evaluate, fit};

pub const STAGE: &str = "greater than 5 transfer learning";

/// Classes of the transfer task: digit <= 5, digit > 5
pub const BINARY_CLASSES: usize = 2;

pub struct TransferUseCase {
    config: PipelineConfig,
}

impl TransferUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn execute<B: AutodiffBackend>(
        &self,
        source: &dyn DigitSource,
        device: &B::Device,
    ) -> Result<StageReport> {
        let cfg = &self.config;

        // ── Step 1: Data, relabelled ──────────────────────────────────────────
        let splits = source.load_splits()?.binarized();
        let (n_train, n_valid, n_test) = splits.sizes();
        tracing::info!("Split: {} train, {} validation, {} test", n_train, n_valid, n_test);

        // ── Step 2: Seeds ─────────────────────────────────────────────────────
        B::seed(cfg.training.seed);

        // ── Step 3: Base model ────────────────────────────────────────────────
        let store = ArtifactStore::new(&cfg.artifacts.model_dir)?;
        let base: DigitClassifier<B> = store.load_model(&cfg.artifacts.base_model_name, device)?;
        let before = base.summary(&cfg.artifacts.base_model_name);
        tracing::info!("{} model summary: \n{}", STAGE, before);

        // ── Step 4: Freeze ────────────────────────────────────────────────────
        let frozen = base.freeze_all_but_output();
        let after  = frozen.summary(&cfg.artifacts.base_model_name);
        for (old, new) in before.layers.iter().zip(&after.layers).take(after.layer_count() - 1) {
            tracing::info!("trainable status of {} before : {}", old.name, old.trainable);
            tracing::info!("trainable status of {} after  : {}", new.name, new.trainable);
        }

        // ── Step 5: New output layer ──────────────────────────────────────────
        let model = frozen.with_output_layer(BINARY_CLASSES, device);
        let name  = &cfg.artifacts.transfer_model_name;
        tracing::info!("{} model summary: \n{}", STAGE, model.summary(name));

        // ── Step 6: Fit, save, evaluate ───────────────────────────────────────
        let (model, history) = fit(
            model,
            DigitDataset::new(splits.train),
            DigitDataset::new(splits.valid),
            &cfg.training,
            device,
        )?;

        let model_path = store.save_model(name, &model)?;
        tracing::info!("new model is saved at {}", model_path.display());

        MetricsLogger::new(&cfg.artifacts.metrics_dir, name)?.log_all(&history)?;

        let model = model.valid();
        let test  = evaluate(&model, DigitDataset::new(splits.test), cfg.training.batch_size, device);
        tracing::info!("evaluation metrics {}", test);

        Ok(StageReport { model_path, summary: model.summary(name), history, test })
    }
}
