// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing the pipeline: digit samples and
// their splits, the "greater than 5" label rule, and the
// layer-by-layer model summary that gets logged.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Digit samples and the train / validation / test partition
pub mod sample;

// Label binarization: digit -> (digit > 5)
pub mod labels;

// Keras-style table describing a model's layers
pub mod summary;

// Core abstractions (traits) that other layers implement
pub mod traits;
