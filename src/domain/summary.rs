// ============================================================
// Layer 3 — Model Summary
// ============================================================
// A framework-free description of a sequential model, one row
// per layer. The ml layer builds it from a live burn module;
// the application layer writes its Display form to the log.
//
// Example rendering:
//
//   Model: "base_model"
//   Layer (type)                  Output Shape   Param #  Trainable
//   flatten (Flatten)             (None, 784)          0  true
//   hidden_layer_1 (Dense)        (None, 300)     235500  true
//   ...
//   Total params: 266610
//   Trainable params: 266610
//   Non-trainable params: 0

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Flatten,
    Dense,
    LeakyRelu,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Flatten   => "Flatten",
            LayerKind::Dense     => "Dense",
            LayerKind::LeakyRelu => "LeakyReLU",
        };
        f.write_str(name)
    }
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSummary {
    pub name:         String,
    pub kind:         LayerKind,
    /// Size of the feature dimension this layer outputs
    pub output_width: usize,
    pub params:       usize,
    pub trainable:    bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSummary {
    pub name:   String,
    pub layers: Vec<LayerSummary>,
}

impl ModelSummary {
    pub fn new(name: impl Into<String>, layers: Vec<LayerSummary>) -> Self {
        Self { name: name.into(), layers }
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn total_params(&self) -> usize {
        self.layers.iter().map(|l| l.params).sum()
    }

    pub fn trainable_params(&self) -> usize {
        self.layers.iter().filter(|l| l.trainable).map(|l| l.params).sum()
    }

    pub fn non_trainable_params(&self) -> usize {
        self.total_params() - self.trainable_params()
    }

    /// Number of leading layers flagged as not trainable
    pub fn frozen_prefix(&self) -> usize {
        self.layers.iter().take_while(|l| !l.trainable).count()
    }

    pub fn last_layer(&self) -> Option<&LayerSummary> {
        self.layers.last()
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(72);
        writeln!(f, "Model: \"{}\"", self.name)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<32}{:<16}{:>10}  {}", "Layer (type)", "Output Shape", "Param #", "Trainable")?;
        writeln!(f, "{rule}")?;
        for layer in &self.layers {
            let label = format!("{} ({})", layer.name, layer.kind);
            let shape = format!("(None, {})", layer.output_width);
            writeln!(f, "{:<32}{:<16}{:>10}  {}", label, shape, layer.params, layer.trainable)?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "Total params: {}", self.total_params())?;
        writeln!(f, "Trainable params: {}", self.trainable_params())?;
        write!(f, "Non-trainable params: {}", self.non_trainable_params())
    }
}
