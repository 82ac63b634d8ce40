// ============================================================
// Layer 3 — Digit Sample Domain Types
// ============================================================
// A single MNIST image with its label, and the three splits
// the training procedures work with.
//
// Pixels are stored already scaled to [0.0, 1.0] and flattened
// row by row, so the Flatten layer of the model is a reshape.

use crate::domain::labels::binarize_labels;

/// Width and height of an MNIST image
pub const IMAGE_SIDE: usize = 28;

/// Number of input features once an image is flattened
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// One image and its class label.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitSample {
    /// Row-major pixels in [0.0, 1.0], length IMAGE_PIXELS
    pub pixels: Vec<f32>,

    /// Class label: the digit 0..=9, or 0/1 after binarization
    pub label: u8,
}

impl DigitSample {
    pub fn new(pixels: Vec<f32>, label: u8) -> Self {
        Self { pixels, label }
    }
}

/// Train / validation / test partition of the digit data.
#[derive(Debug, Clone, Default)]
pub struct DigitSplits {
    pub train: Vec<DigitSample>,
    pub valid: Vec<DigitSample>,
    pub test:  Vec<DigitSample>,
}

impl DigitSplits {
    /// Replace every label with its "greater than 5" flag.
    ///
    /// Each split is relabelled on its own; images are untouched.
    pub fn binarized(self) -> Self {
        Self {
            train: relabel(self.train),
            valid: relabel(self.valid),
            test:  relabel(self.test),
        }
    }

    /// (train, valid, test) sizes, handy for logging
    pub fn sizes(&self) -> (usize, usize, usize) {
        (self.train.len(), self.valid.len(), self.test.len())
    }
}

fn relabel(samples: Vec<DigitSample>) -> Vec<DigitSample> {
    let labels: Vec<u8> = samples.iter().map(|s| s.label).collect();
    samples
        .into_iter()
        .zip(binarize_labels(&labels))
        .map(|(sample, label)| DigitSample { label, ..sample })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(labels: &[u8]) -> Vec<DigitSample> {
        labels
            .iter()
            .map(|&l| DigitSample::new(vec![l as f32 / 10.0; 4], l))
            .collect()
    }

    #[test]
    fn test_binarized_relabels_every_split_independently() {
        let splits = DigitSplits {
            train: samples(&[0, 7, 3]),
            valid: samples(&[6]),
            test:  samples(&[5, 9]),
        };

        let bin = splits.binarized();

        let labels = |v: &[DigitSample]| v.iter().map(|s| s.label).collect::<Vec<_>>();
        assert_eq!(labels(&bin.train), vec![0, 1, 0]);
        assert_eq!(labels(&bin.valid), vec![1]);
        assert_eq!(labels(&bin.test),  vec![0, 1]);
    }

    #[test]
    fn test_binarized_keeps_pixels() {
        let splits = DigitSplits { train: samples(&[8]), ..Default::default() };
        let bin = splits.binarized();
        assert_eq!(bin.train[0].pixels, vec![0.8; 4]);
        assert_eq!(bin.sizes(), (1, 0, 0));
    }
}
