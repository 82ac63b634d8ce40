// ============================================================
// Layer 4 — Digit Batcher
// ============================================================
// Implements Burn's Batcher trait to turn a Vec<DigitSample>
// into the two tensors a classification step needs.
//
//   Input:  N samples, each with P flattened pixels
//   Output: images  [N, P]  (float)
//           targets [N]     (int class index)
//
// Pixels are already scaled at load time, so batching is just
// a flatten-and-reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::domain::sample::DigitSample;

/// A batch of digit samples ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct DigitBatch<B: Backend> {
    /// Flattened images — shape: [batch_size, pixels]
    pub images: Tensor<B, 2>,

    /// Class labels — shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land on the right GPU/CPU.
#[derive(Clone, Debug)]
pub struct DigitBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> DigitBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<DigitSample, DigitBatch<B>> for DigitBatcher<B> {
    fn batch(&self, items: Vec<DigitSample>) -> DigitBatch<B> {
        let batch_size = items.len();
        let width      = items.first().map_or(0, |s| s.pixels.len());

        let pixels: Vec<f32> = items
            .iter()
            .flat_map(|s| s.pixels.iter().copied())
            .collect();

        let labels: Vec<i32> = items
            .iter()
            .map(|s| s.label as i32)
            .collect();

        let images = Tensor::<B, 2>::from_data(
            TensorData::new(pixels, [batch_size, width]), &self.device
        );

        let targets = Tensor::<B, 1, Int>::from_ints(
            labels.as_slice(), &self.device
        );

        DigitBatch { images, targets }
    }
}
