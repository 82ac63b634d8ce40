// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the MNIST idx files to tensor batches:
//
//   MnistSource     → downloads/reads MNIST, scales pixels
//       │
//       ▼
//   split_validation → first N training images become validation
//       │
//       ▼
//   DigitDataset    → implements Burn's Dataset trait
//       │
//       ▼
//   DigitBatcher    → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader      → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads MNIST through burn-dataset; in-memory source for tests
pub mod loader;

/// Implements Burn's Dataset trait for digit samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Static-range train/validation split
pub mod splitter;
