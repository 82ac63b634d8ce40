// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by the use cases:
//
//   config.rs    — YAML pipeline configuration (serde_yaml)
//
//   artifacts.rs — Saving and loading trained classifiers.
//                  Weights go through Burn's CompactRecorder,
//                  the architecture through Burn's Config JSON.
//
//   metrics.rs   — Per-epoch training metrics written to CSV
//
//   logging.rs   — tracing-subscriber setup: stdout plus the
//                  append-only running_logs.log
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// YAML configuration file
pub mod config;

/// Model artifact saving and loading
pub mod artifacts;

/// Training metrics CSV logger
pub mod metrics;

/// Log file and subscriber setup
pub mod logging;
