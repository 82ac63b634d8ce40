// ============================================================
// Layer 5 — Digit Classifier (sequential MLP)
// ============================================================
// The model is a plain sequential stack:
//
//   flatten → (Dense → LeakyReLU) × k → Dense (output_layer)
//
// With the default hidden sizes [300, 100] that is six layers.
// Layer indices used for freezing count every entry of that
// stack, parameter-less ones included, so "freeze all but the
// last layer" means freezing indices 0..N-1.
//
// Freezing a Dense layer drops gradient tracking from its
// parameters (Module::no_grad); the optimizer then never sees
// them. Parameter-less layers only carry the flag, which is
// what the summary reports.

use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        LeakyRelu, LeakyReluConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::softmax,
};

use crate::domain::summary::{LayerKind, LayerSummary, ModelSummary};

/// Name given to the final Dense layer, in both models
pub const OUTPUT_LAYER_NAME: &str = "output_layer";

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct ClassifierConfig {
    /// Width of each hidden Dense layer, in order
    pub hidden_sizes: Vec<usize>,
    /// Width of the output layer
    pub num_classes: usize,
    #[config(default = 784)]
    pub input_size: usize,
    #[config(default = 0.3)]
    pub negative_slope: f64,
    /// Number of leading layers built frozen
    #[config(default = 0)]
    pub frozen_layers: usize,
}

impl ClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> DigitClassifier<B> {
        let mut in_features = self.input_size;
        let mut hidden = Vec::with_capacity(self.hidden_sizes.len());
        for &width in &self.hidden_sizes {
            hidden.push(LinearConfig::new(in_features, width).init(device));
            in_features = width;
        }
        let output     = LinearConfig::new(in_features, self.num_classes).init(device);
        let activation = LeakyReluConfig::new()
            .with_negative_slope(self.negative_slope)
            .init();

        let model = DigitClassifier {
            hidden, activation, output,
            input_size:    self.input_size,
            frozen_layers: 0,
        };
        model.freeze_leading(self.frozen_layers)
    }
}

#[derive(Module, Debug)]
pub struct DigitClassifier<B: Backend> {
    pub hidden:        Vec<Linear<B>>,
    pub activation:    LeakyRelu,
    pub output:        Linear<B>,
    pub input_size:    usize,
    pub frozen_layers: usize,
}

/// Loss and logits of one forward pass over a labelled batch
pub struct ClassificationOutput<B: Backend> {
    pub loss:   Tensor<B, 1>,
    pub logits: Tensor<B, 2>,
}

impl<B: Backend> DigitClassifier<B> {
    /// images: [batch, pixels] → logits: [batch, num_classes]
    pub fn forward(&self, images: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch_size, _] = images.dims();
        let mut x = images.reshape([batch_size, self.input_size]);
        for linear in &self.hidden {
            x = self.activation.forward(linear.forward(x));
        }
        self.output.forward(x)
    }

    /// Class probabilities, the softmax of [`Self::forward`]
    pub fn forward_probs(&self, images: Tensor<B, 2>) -> Tensor<B, 2> {
        softmax(self.forward(images), 1)
    }

    /// Sparse categorical cross-entropy on the logits.
    pub fn forward_loss(&self, images: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> ClassificationOutput<B> {
        let logits = self.forward(images);
        let loss = CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits.clone(), targets);
        ClassificationOutput { loss, logits }
    }

    /// flatten + one Dense and one LeakyReLU per hidden layer + output
    pub fn layer_count(&self) -> usize {
        2 * self.hidden.len() + 2
    }

    pub fn num_classes(&self) -> usize {
        self.output.weight.dims()[1]
    }

    /// Mark the first `count` layers as not trainable.
    ///
    /// Layers already frozen stay frozen; `count` is capped at the
    /// layer count.
    pub fn freeze_leading(mut self, count: usize) -> Self {
        let count = count.min(self.layer_count());
        self.hidden = self
            .hidden
            .into_iter()
            .enumerate()
            .map(|(i, linear)| {
                if dense_index(i) < count { linear.no_grad() } else { linear }
            })
            .collect();
        if count == self.layer_count() {
            self.output = self.output.no_grad();
        }
        self.frozen_layers = self.frozen_layers.max(count);
        self
    }

    /// Freeze every layer except the output layer.
    pub fn freeze_all_but_output(self) -> Self {
        let count = self.layer_count() - 1;
        self.freeze_leading(count)
    }

    /// Swap the output layer for a new, trainable Dense layer.
    pub fn with_output_layer(mut self, num_classes: usize, device: &B::Device) -> Self {
        let in_features = self
            .hidden
            .last()
            .map_or(self.input_size, |linear| linear.weight.dims()[1]);
        self.output = LinearConfig::new(in_features, num_classes).init(device);
        self.frozen_layers = self.frozen_layers.min(self.layer_count() - 1);
        self
    }

    /// Reuse every layer but the last: freeze them, then attach a fresh
    /// `num_classes`-wide output layer.
    pub fn into_transfer(self, num_classes: usize, device: &B::Device) -> Self {
        self.freeze_all_but_output().with_output_layer(num_classes, device)
    }

    pub fn is_trainable(&self, layer_index: usize) -> bool {
        layer_index >= self.frozen_layers
    }

    /// Architecture description that rebuilds this model with
    /// [`ClassifierConfig::init`]
    pub fn config(&self) -> ClassifierConfig {
        let hidden_sizes = self.hidden.iter().map(|l| l.weight.dims()[1]).collect();
        ClassifierConfig::new(hidden_sizes, self.num_classes())
            .with_input_size(self.input_size)
            .with_negative_slope(self.activation.negative_slope)
            .with_frozen_layers(self.frozen_layers)
    }

    pub fn summary(&self, name: &str) -> ModelSummary {
        let mut layers = Vec::with_capacity(self.layer_count());
        let mut index  = 0;
        let mut push   = |name: String, kind, output_width, params| {
            layers.push(LayerSummary {
                name, kind, output_width, params,
                trainable: self.is_trainable(index),
            });
            index += 1;
        };

        push("flatten".to_string(), LayerKind::Flatten, self.input_size, 0);
        for (i, linear) in self.hidden.iter().enumerate() {
            let width = linear.weight.dims()[1];
            push(format!("hidden_layer_{}", i + 1), LayerKind::Dense, width, linear.num_params());
            push(activation_name(i), LayerKind::LeakyRelu, width, 0);
        }
        push(OUTPUT_LAYER_NAME.to_string(), LayerKind::Dense, self.num_classes(), self.output.num_params());

        ModelSummary::new(name, layers)
    }
}

/// Position of the i-th hidden Dense layer in the sequential stack
fn dense_index(hidden: usize) -> usize {
    1 + 2 * hidden
}

fn activation_name(hidden: usize) -> String {
    match hidden {
        0 => "leaky_re_lu".to_string(),
        n => format!("leaky_re_lu_{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    type TestBackend = NdArray;
    type TestAutodiffBackend = Autodiff<NdArray>;

    #[test]
    fn test_base_architecture() {
        let device = Default::default();
        let model: DigitClassifier<TestBackend> = ClassifierConfig::new(vec![300, 100], 10).init(&device);
        let summary = model.summary("base_model");

        let names: Vec<&str> = summary.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec![
            "flatten", "hidden_layer_1", "leaky_re_lu",
            "hidden_layer_2", "leaky_re_lu_1", "output_layer",
        ]);
        assert_eq!(model.layer_count(), 6);
        // 784*300+300 + 300*100+100 + 100*10+10
        assert_eq!(summary.total_params(), 266_610);
        assert_eq!(summary.trainable_params(), 266_610);
    }

    #[test]
    fn test_forward_shapes() {
        let device = Default::default();
        let model: DigitClassifier<TestBackend> = ClassifierConfig::new(vec![8], 3)
            .with_input_size(4)
            .init(&device);
        let images = Tensor::<TestBackend, 2>::zeros([5, 4], &device);

        assert_eq!(model.forward(images.clone()).dims(), [5, 3]);

        let probs: Vec<f32> = model.forward_probs(images).sum_dim(1).into_data().to_vec().unwrap();
        for p in probs {
            assert!((p - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_transfer_freezes_exactly_n_minus_one_layers() {
        let device = Default::default();
        for hidden_sizes in [vec![], vec![6], vec![6, 5], vec![6, 5, 4]] {
            let base: DigitClassifier<TestAutodiffBackend> =
                ClassifierConfig::new(hidden_sizes.clone(), 10).with_input_size(4).init(&device);
            let n = base.layer_count();

            let transfer = base.into_transfer(2, &device);
            let summary  = transfer.summary("greater_than_5_model");

            assert_eq!(summary.layer_count(), n, "hidden {hidden_sizes:?}");
            assert_eq!(summary.frozen_prefix(), n - 1);
            let last = summary.last_layer().unwrap();
            assert_eq!(last.name, OUTPUT_LAYER_NAME);
            assert!(last.trainable);
            assert_eq!(last.output_width, 2);
            assert_eq!(summary.layers.iter().filter(|l| l.trainable).count(), 1);
        }
    }

    #[test]
    fn test_frozen_dense_layers_stop_tracking_gradients() {
        let device = Default::default();
        let base: DigitClassifier<TestAutodiffBackend> =
            ClassifierConfig::new(vec![6, 5], 10).with_input_size(4).init(&device);
        assert!(base.hidden[0].weight.is_require_grad());

        let transfer = base.into_transfer(2, &device);

        for linear in &transfer.hidden {
            assert!(!linear.weight.is_require_grad());
            assert!(!linear.bias.as_ref().unwrap().is_require_grad());
        }
        assert!(transfer.output.weight.is_require_grad());
        assert_eq!(transfer.num_classes(), 2);
    }

    #[test]
    fn test_transfer_keeps_hidden_weights() {
        let device = Default::default();
        let base: DigitClassifier<TestBackend> =
            ClassifierConfig::new(vec![3], 10).with_input_size(4).init(&device);
        let before = base.hidden[0].weight.val().into_data();

        let transfer = base.into_transfer(2, &device);

        transfer.hidden[0].weight.val().into_data().assert_eq(&before, true);
    }

    #[test]
    fn test_config_round_trips_architecture() {
        let device = Default::default();
        let model: DigitClassifier<TestBackend> = ClassifierConfig::new(vec![7, 3], 10)
            .with_input_size(4)
            .with_negative_slope(0.2)
            .init(&device)
            .into_transfer(2, &device);

        let cfg = model.config();
        assert_eq!(cfg.hidden_sizes, vec![7, 3]);
        assert_eq!(cfg.num_classes, 2);
        assert_eq!(cfg.input_size, 4);
        assert_eq!(cfg.frozen_layers, 5);
        assert!((cfg.negative_slope - 0.2).abs() < 1e-12);

        let rebuilt: DigitClassifier<TestBackend> = cfg.init(&device);
        assert_eq!(rebuilt.summary("x").frozen_prefix(), 5);
    }

    #[test]
    fn test_forward_loss_is_finite() {
        let device = Default::default();
        let model: DigitClassifier<TestBackend> =
            ClassifierConfig::new(vec![4], 3).with_input_size(2).init(&device);
        let images  = Tensor::<TestBackend, 2>::ones([2, 2], &device);
        let targets = Tensor::<TestBackend, 1, Int>::from_ints([0, 2], &device);

        let out = model.forward_loss(images, targets);
        let loss: f32 = out.loss.into_scalar().elem();
        assert!(loss.is_finite() && loss > 0.0);
        assert_eq!(out.logits.dims(), [2, 3]);
    }
}
