// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands, run in this order on a fresh checkout:
//
//   base      → trains artifacts/models/base_model
//   transfer  → reads base_model, writes greater_than_5_model
//   evaluate  → re-scores either saved model on the test split
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Train the 10-class base digit classifier
    Base,

    /// Transfer the base model to a "digit greater than 5" classifier
    Transfer,

    /// Evaluate a saved model on the MNIST test split
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, PartialEq)]
pub struct EvaluateArgs {
    /// Artifact name inside the model directory
    /// (defaults to the transfer model from the config)
    #[arg(long, short)]
    pub model: Option<String>,
}
