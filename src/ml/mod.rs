// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All model and training code lives here:
//
//   model.rs    — The sequential digit classifier
//                 • flatten → Dense/LeakyReLU blocks → Dense
//                 • layer freezing and output-layer swap
//                 • Keras-style layer summary
//
//   trainer.rs  — SGD fit loop with per-epoch validation,
//                 and dataset evaluation (loss, accuracy)
//
//   backend.rs  — Which burn backend the binary runs on
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Which burn backend the CLI trains on
pub mod backend;

/// Sequential classifier architecture and transfer surgery
pub mod model;

/// Fit and evaluate loops
pub mod trainer;
