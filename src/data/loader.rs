// ============================================================
// Layer 4 — MNIST Loader
// ============================================================
// Pulls the MNIST digits through burn-dataset, which downloads
// the idx files once and caches them under the user's cache
// directory. Each image is flattened row by row and scaled from
// 0..=255 down to [0.0, 1.0].
//
// The 60 000 training images are then split by static index
// range (see splitter.rs); the 10 000 test images are kept as-is.
//
// Reference: Burn Book §4 (Datasets)

use anyhow::Result;
use burn::data::dataset::{
    vision::{MnistDataset, MnistItem},
    Dataset,
};

use crate::data::splitter::split_validation;
use crate::domain::sample::{DigitSample, DigitSplits, IMAGE_PIXELS};
use crate::domain::traits::DigitSource;

/// Maximum raw pixel intensity in MNIST
const PIXEL_MAX: f32 = 255.0;

/// Loads MNIST and splits off a leading validation range.
/// Implements the DigitSource trait from Layer 3.
pub struct MnistSource {
    /// How many of the first training images become validation data
    validation_size: usize,
}

impl MnistSource {
    pub fn new(validation_size: usize) -> Self {
        Self { validation_size }
    }
}

impl DigitSource for MnistSource {
    fn load_splits(&self) -> Result<DigitSplits> {
        tracing::info!("Loading MNIST (downloaded on first use)");
        let train_full = to_samples(&MnistDataset::train());
        let test       = to_samples(&MnistDataset::test());
        tracing::info!(
            "Loaded {} training and {} test images",
            train_full.len(),
            test.len()
        );

        let (valid, train) = split_validation(train_full, self.validation_size)?;
        Ok(DigitSplits { train, valid, test })
    }
}

fn to_samples(dataset: &MnistDataset) -> Vec<DigitSample> {
    dataset.iter().map(|item| to_sample(&item)).collect()
}

/// Flatten a 28x28 MNIST item and scale its pixels to [0, 1]
pub fn to_sample(item: &MnistItem) -> DigitSample {
    let mut pixels = Vec::with_capacity(IMAGE_PIXELS);
    for row in item.image.iter() {
        pixels.extend(row.iter().map(|&p| p / PIXEL_MAX));
    }
    DigitSample::new(pixels, item.label)
}

// ─── InMemorySource ──────────────────────────────────────────────────────────
/// A DigitSource over splits that are already in memory.
/// Lets the use cases run end to end without a download.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    splits: DigitSplits,
}

impl InMemorySource {
    pub fn new(splits: DigitSplits) -> Self {
        Self { splits }
    }
}

impl DigitSource for InMemorySource {
    fn load_splits(&self) -> Result<DigitSplits> {
        Ok(self.splits.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::IMAGE_SIDE;

    #[test]
    fn test_to_sample_flattens_row_major_and_scales() {
        let mut image = [[0f32; IMAGE_SIDE]; IMAGE_SIDE];
        image[0][1]  = 255.0;
        image[1][0]  = 51.0;
        image[27][27] = 255.0;
        let item = MnistItem { image, label: 7 };

        let sample = to_sample(&item);

        assert_eq!(sample.label, 7);
        assert_eq!(sample.pixels.len(), IMAGE_PIXELS);
        assert_eq!(sample.pixels[1], 1.0);
        assert!((sample.pixels[IMAGE_SIDE] - 0.2).abs() < 1e-6);
        assert_eq!(sample.pixels[IMAGE_PIXELS - 1], 1.0);
        assert_eq!(sample.pixels[0], 0.0);
    }

    #[test]
    fn test_in_memory_source_returns_its_splits() {
        let splits = DigitSplits {
            train: vec![DigitSample::new(vec![0.0; 4], 3)],
            ..Default::default()
        };
        let loaded = InMemorySource::new(splits).load_splits().unwrap();
        assert_eq!(loaded.sizes(), (1, 0, 0));
        assert_eq!(loaded.train[0].label, 3);
    }
}
