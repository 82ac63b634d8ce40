// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The use cases only need "something that yields the three
// digit splits". The real implementation downloads MNIST
// through burn; tests hand in a few synthetic images instead.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::sample::DigitSplits;

// ─── DigitSource ──────────────────────────────────────────────────────────────
/// Any component that can produce train / validation / test digit data.
///
/// Implementations:
///   - MnistSource     → burn's MNIST dataset, statically split
///   - InMemorySource  → pre-built splits (tests)
pub trait DigitSource {
    /// Load all three splits, pixels already scaled to [0, 1].
    fn load_splits(&self) -> Result<DigitSplits>;
}
