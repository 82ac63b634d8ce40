// ============================================================
// Layer 2 — BaseModelUseCase
// ============================================================
// Trains the 10-class digit classifier from scratch:
//
//   Step 1: Load MNIST, split off validation   (Layer 4 - data)
//   Step 2: Seed the backend                   (Layer 5 - ml)
//   Step 3: Build the model, log its summary   (Layer 5 - ml)
//   Step 4: Fit                                (Layer 5 - ml)
//   Step 5: Save the artifact + epoch metrics  (Layer 6 - infra)
//   Step 6: Evaluate on the test split         (Layer 5 - ml)

use anyhow::Result;
use burn::{module::AutodiffModule, tensor::backend::AutodiffBackend};

use crate::application::StageReport;
use crate::data::dataset::DigitDataset;
use crate::domain::traits::DigitSource;
use crate::infra::{artifacts::ArtifactStore, config::PipelineConfig, metrics::MetricsLogger};
use crate::ml::model::DigitClassifier;
use crate::ml::trainer::{evaluate, fit};

pub const STAGE: &str = "creating base model";

pub struct BaseModelUseCase {
    config: PipelineConfig,
}

impl BaseModelUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn execute<B: AutodiffBackend>(
        &self,
        source: &dyn DigitSource,
        device: &B::Device,
    ) -> Result<StageReport> {
        let cfg = &self.config;

        // ── Step 1: Data ──────────────────────────────────────────────────────
        let splits = source.load_splits()?;
        let (n_train, n_valid, n_test) = splits.sizes();
        tracing::info!("Split: {} train, {} validation, {} test", n_train, n_valid, n_test);

        // ── Step 2: Seeds ─────────────────────────────────────────────────────
        B::seed(cfg.training.seed);

        // ── Step 3: Model ─────────────────────────────────────────────────────
        let model: DigitClassifier<B> = cfg.model.classifier().init(device);
        let name    = &cfg.artifacts.base_model_name;
        tracing::info!("base model summary: \n{}", model.summary(name));

        // ── Step 4: Fit ───────────────────────────────────────────────────────
        let (model, history) = fit(
            model,
            DigitDataset::new(splits.train),
            DigitDataset::new(splits.valid),
            &cfg.training,
            device,
        )?;

        // ── Step 5: Save ──────────────────────────────────────────────────────
        let store      = ArtifactStore::new(&cfg.artifacts.model_dir)?;
        let model_path = store.save_model(name, &model)?;
        tracing::info!("base model is saved at {}", model_path.display());

        MetricsLogger::new(&cfg.artifacts.metrics_dir, name)?.log_all(&history)?;

        // ── Step 6: Evaluate ──────────────────────────────────────────────────
        let model = model.valid();
        let test  = evaluate(&model, DigitDataset::new(splits.test), cfg.training.batch_size, device);
        tracing::info!("evaluation metrics {}", test);

        Ok(StageReport { model_path, summary: model.summary(name), history, test })
    }
}
