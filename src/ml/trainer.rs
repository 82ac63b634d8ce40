// ============================================================
// Layer 5 — Training Loop
// ============================================================
// "compile + fit + evaluate" for the digit classifier:
//
//   optimizer : SGD (learning rate from the config, 1e-3 default)
//   loss      : sparse categorical cross-entropy
//   metric    : accuracy
//
// Training batches run on the autodiff backend; validation and
// evaluation run on the inner backend through model.valid(), so
// no graph is recorded for them. Frozen parameters never get a
// gradient, so SGD leaves them untouched.
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{GradientsParams, Optimizer, SgdConfig},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use std::fmt;

use crate::data::{batcher::DigitBatcher, dataset::DigitDataset};
use crate::infra::config::TrainingConfig;
use crate::infra::metrics::EpochMetrics;
use crate::ml::model::DigitClassifier;

/// Loss and accuracy over a whole dataset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub loss:     f64,
    pub accuracy: f64,
}

impl fmt::Display for Evaluation {
    /// Same shape as Keras' `model.evaluate` result: [loss, accuracy]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.loss, self.accuracy)
    }
}

/// Running sums over the batches of one pass
#[derive(Default)]
struct PassTotals {
    loss_sum: f64,
    correct:  usize,
    samples:  usize,
}

impl PassTotals {
    fn add<B: Backend>(&mut self, loss: f64, logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) {
        let batch_size = targets.dims()[0];
        self.loss_sum += loss * batch_size as f64;
        self.correct  += count_correct(logits, targets);
        self.samples  += batch_size;
    }

    fn finish(&self) -> Evaluation {
        if self.samples == 0 {
            return Evaluation { loss: f64::NAN, accuracy: 0.0 };
        }
        Evaluation {
            loss:     self.loss_sum / self.samples as f64,
            accuracy: self.correct as f64 / self.samples as f64,
        }
    }
}

/// Number of rows whose argmax matches the target class
fn count_correct<B: Backend>(logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> usize {
    // argmax(1) returns shape [batch, 1] — flatten to [batch] before comparing
    let predicted = logits.argmax(1).flatten::<1>(0, 1);
    let correct: i64 = predicted
        .equal(targets)
        .int().sum().into_scalar().elem::<i64>();
    correct as usize
}

/// Train `model` for `cfg.epochs` epochs and return it with its
/// per-epoch history.
pub fn fit<B: AutodiffBackend>(
    mut model: DigitClassifier<B>,
    train:     DigitDataset,
    valid:     DigitDataset,
    cfg:       &TrainingConfig,
    device:    &B::Device,
) -> Result<(DigitClassifier<B>, Vec<EpochMetrics>)> {
    tracing::info!(
        "Fitting on {} samples, validating on {} samples",
        train.sample_count(),
        valid.sample_count()
    );

    let mut optim = SgdConfig::new().init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_loader = DataLoaderBuilder::new(DigitBatcher::<B>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(cfg.num_workers)
        .build(train);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let valid_loader = DataLoaderBuilder::new(DigitBatcher::<B::InnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(cfg.num_workers)
        .build(valid);

    let mut history = Vec::with_capacity(cfg.epochs);

    for epoch in 1..=cfg.epochs {
        // ── Training phase ────────────────────────────────────────────────────
        let mut train_totals = PassTotals::default();
        for batch in train_loader.iter() {
            let output = model.forward_loss(batch.images, batch.targets.clone());
            let loss_val: f64 = output.loss.clone().into_scalar().elem::<f64>();
            train_totals.add(loss_val, output.logits.detach(), batch.targets);

            let grads = output.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();
        let mut valid_totals = PassTotals::default();
        for batch in valid_loader.iter() {
            let output = model_valid.forward_loss(batch.images, batch.targets.clone());
            let loss_val: f64 = output.loss.into_scalar().elem::<f64>();
            valid_totals.add(loss_val, output.logits, batch.targets);
        }

        let train_eval = train_totals.finish();
        let valid_eval = valid_totals.finish();
        let metrics = EpochMetrics {
            epoch,
            loss:         train_eval.loss,
            accuracy:     train_eval.accuracy,
            val_loss:     valid_eval.loss,
            val_accuracy: valid_eval.accuracy,
        };

        println!(
            "Epoch {}/{}\n - loss: {:.4} - accuracy: {:.4} - val_loss: {:.4} - val_accuracy: {:.4}",
            epoch, cfg.epochs, metrics.loss, metrics.accuracy, metrics.val_loss, metrics.val_accuracy,
        );
        tracing::debug!("Epoch {} metrics: {:?}", epoch, metrics);

        history.push(metrics);
    }

    Ok((model, history))
}

/// Mean loss and accuracy of `model` over `dataset`.
pub fn evaluate<B: Backend>(
    model:      &DigitClassifier<B>,
    dataset:    DigitDataset,
    batch_size: usize,
    device:     &B::Device,
) -> Evaluation {
    let loader = DataLoaderBuilder::new(DigitBatcher::<B>::new(device.clone()))
        .batch_size(batch_size)
        .build(dataset);

    let mut totals = PassTotals::default();
    for batch in loader.iter() {
        let output = model.forward_loss(batch.images, batch.targets.clone());
        let loss_val: f64 = output.loss.into_scalar().elem::<f64>();
        totals.add(loss_val, output.logits, batch.targets);
    }
    totals.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    use crate::domain::sample::DigitSample;
    use crate::ml::model::ClassifierConfig;

    type TestBackend = NdArray;
    type TestAutodiffBackend = Autodiff<NdArray>;

    /// Two linearly separable classes in 4 pixels
    fn toy_samples(n: usize) -> Vec<DigitSample> {
        (0..n)
            .map(|i| {
                let label = (i % 2) as u8;
                let on = if label == 1 { 1.0 } else { 0.0 };
                DigitSample::new(vec![on, on, 1.0 - on, 0.5], label)
            })
            .collect()
    }

    fn toy_config(epochs: usize) -> TrainingConfig {
        TrainingConfig {
            epochs,
            batch_size:      4,
            learning_rate:   0.5,
            seed:            7,
            validation_size: 0,
            num_workers:     1,
        }
    }

    #[test]
    fn test_fit_returns_one_row_per_epoch() {
        let device = Default::default();
        let model: DigitClassifier<TestAutodiffBackend> =
            ClassifierConfig::new(vec![8], 2).with_input_size(4).init(&device);

        let (_, history) = fit(
            model,
            DigitDataset::new(toy_samples(16)),
            DigitDataset::new(toy_samples(8)),
            &toy_config(3),
            &device,
        ).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.iter().map(|m| m.epoch).collect::<Vec<_>>(), vec![1, 2, 3]);
        for m in &history {
            assert!(m.loss.is_finite() && m.val_loss.is_finite());
            assert!((0.0..=1.0).contains(&m.accuracy));
            assert!((0.0..=1.0).contains(&m.val_accuracy));
        }
    }

    #[test]
    fn test_fit_learns_separable_data() {
        let device = Default::default();
        TestAutodiffBackend::seed(3);
        let model: DigitClassifier<TestAutodiffBackend> =
            ClassifierConfig::new(vec![8], 2).with_input_size(4).init(&device);

        let (model, history) = fit(
            model,
            DigitDataset::new(toy_samples(32)),
            DigitDataset::new(toy_samples(8)),
            &toy_config(40),
            &device,
        ).unwrap();

        assert!(history.last().unwrap().loss < history[0].loss);
        let eval = evaluate(&model.valid(), DigitDataset::new(toy_samples(8)), 4, &device);
        assert_eq!(eval.accuracy, 1.0);
    }

    #[test]
    fn test_frozen_layers_do_not_move_during_fit() {
        let device = Default::default();
        let base: DigitClassifier<TestAutodiffBackend> =
            ClassifierConfig::new(vec![6, 5], 10).with_input_size(4).init(&device);
        let transfer = base.into_transfer(2, &device);

        let hidden_before: Vec<_> = transfer
            .hidden
            .iter()
            .map(|l| (l.weight.val().into_data(), l.bias.as_ref().unwrap().val().into_data()))
            .collect();
        let output_before = transfer.output.weight.val().into_data();

        let (trained, _) = fit(
            transfer,
            DigitDataset::new(toy_samples(16)),
            DigitDataset::new(toy_samples(4)),
            &toy_config(2),
            &device,
        ).unwrap();

        for (linear, (weight, bias)) in trained.hidden.iter().zip(&hidden_before) {
            linear.weight.val().into_data().assert_eq(weight, true);
            linear.bias.as_ref().unwrap().val().into_data().assert_eq(bias, true);
        }
        assert_ne!(trained.output.weight.val().into_data(), output_before);
    }

    #[test]
    fn test_evaluate_counts_accuracy() {
        let device = Default::default();
        let model: DigitClassifier<TestBackend> =
            ClassifierConfig::new(vec![3], 2).with_input_size(4).init(&device);

        let eval = evaluate(&model, DigitDataset::new(toy_samples(10)), 3, &device);

        assert!(eval.loss.is_finite());
        // Every accuracy over 10 samples is a multiple of 0.1
        let tenths = eval.accuracy * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9);
    }

    #[test]
    fn test_evaluate_empty_dataset() {
        let device = Default::default();
        let model: DigitClassifier<TestBackend> =
            ClassifierConfig::new(vec![3], 2).with_input_size(4).init(&device);
        let eval = evaluate(&model, DigitDataset::new(Vec::new()), 3, &device);
        assert!(eval.loss.is_nan());
        assert_eq!(eval.accuracy, 0.0);
    }

    #[test]
    fn test_evaluation_display() {
        let eval = Evaluation { loss: 0.123456, accuracy: 0.9 };
        assert_eq!(eval.to_string(), "[0.1235, 0.9000]");
    }
}
