// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Splits the MNIST training images into two sets by a static
// index range: the first `validation_size` images are held out
// for validation, everything after them is used for training.
//
// No shuffling happens here. The split has to be identical
// between the base run and the transfer run so that the
// transfer model is validated on the same images; order is
// preserved in both halves. Batches are shuffled later by the
// DataLoader.

use anyhow::{bail, Result};

/// Split `samples` into (validation, train) at `validation_size`.
///
/// # Arguments
/// * `samples`         - All training samples (consumed by this function)
/// * `validation_size` - Number of leading samples to hold out
///
/// # Errors
/// Fails when `validation_size` is larger than the number of samples.
pub fn split_validation<T>(mut samples: Vec<T>, validation_size: usize) -> Result<(Vec<T>, Vec<T>)> {
    let total = samples.len();
    if validation_size > total {
        bail!(
            "validation_size ({validation_size}) exceeds the {total} available training samples"
        );
    }

    // split_off(n) removes elements [n..] and returns them
    let train = samples.split_off(validation_size);

    tracing::debug!(
        "Dataset split: {} validation, {} training",
        samples.len(),
        train.len(),
    );

    Ok((samples, train))
}
