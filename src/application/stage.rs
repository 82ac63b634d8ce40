// ============================================================
// Layer 2 — Stage Wrapper
// ============================================================
// Log lines written around every stage:
//
//   ********************
//   >>>>> stage creating base model started <<<<<
//   ...
//   >>>>> stage creating base model completed!<<<<<
//
// On failure the error is logged at ERROR level with its whole
// context chain ({:?} on anyhow::Error) and returned unchanged,
// so main exits non-zero.

use anyhow::Result;

pub const SEPARATOR: &str = "********************";

pub fn run_stage<T>(stage: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    tracing::info!("{SEPARATOR}");
    tracing::info!(">>>>> stage {stage} started <<<<<");

    match f() {
        Ok(value) => {
            tracing::info!(">>>>> stage {stage} completed!<<<<<");
            Ok(value)
        }
        Err(err) => {
            tracing::error!("stage {stage} failed: {err:?}");
            Err(err)
        }
    }
}
