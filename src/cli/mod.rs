// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, wraps each command in its stage
// banner and prints a short report. All work is delegated to
// Layer 2 (application).

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::application::{
    base_use_case::{self, BaseModelUseCase},
    evaluate_use_case::{self, EvaluateUseCase},
    stage::run_stage,
    transfer_use_case::{self, TransferUseCase},
    StageReport,
};
use crate::data::loader::MnistSource;
use crate::infra::config::PipelineConfig;
use crate::ml::backend::{default_device, AppAutodiffBackend, AppBackend};
use commands::{Commands, EvaluateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "digit-transfer",
    version,
    about = "Train an MNIST digit classifier, then transfer it to a 'greater than 5' classifier."
)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, short, global = true, default_value = "configs/config.yaml")]
    pub config: PathBuf,

    /// Directory for running_logs.log
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Base          => self.run_base(),
            Commands::Transfer      => self.run_transfer(),
            Commands::Evaluate(args) => self.run_evaluate(args),
        }
    }

    fn run_base(&self) -> Result<()> {
        let report = run_stage(base_use_case::STAGE, || {
            let config = PipelineConfig::load(&self.config)?;
            let source = MnistSource::new(config.training.validation_size);
            BaseModelUseCase::new(config).execute::<AppAutodiffBackend>(&source, &default_device())
        })?;
        print_report(&report);
        Ok(())
    }

    fn run_transfer(&self) -> Result<()> {
        let report = run_stage(transfer_use_case::STAGE, || {
            let config = PipelineConfig::load(&self.config)?;
            let source = MnistSource::new(config.training.validation_size);
            TransferUseCase::new(config).execute::<AppAutodiffBackend>(&source, &default_device())
        })?;
        print_report(&report);
        Ok(())
    }

    fn run_evaluate(&self, args: &EvaluateArgs) -> Result<()> {
        let report = run_stage(evaluate_use_case::STAGE, || {
            let config = PipelineConfig::load(&self.config)?;
            let name   = args
                .model
                .clone()
                .unwrap_or_else(|| config.artifacts.transfer_model_name.clone());
            let source = MnistSource::new(config.training.validation_size);
            EvaluateUseCase::new(config, name).execute::<AppBackend>(&source, &default_device())
        })?;
        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &StageReport) {
    if let Some(best) = report.best_epoch() {
        println!(
            "Best epoch: {} (val_loss={:.4}, val_accuracy={:.4})",
            best.epoch, best.val_loss, best.val_accuracy
        );
    }
    println!(
        "Model: {}\nTest loss: {:.4} | Test accuracy: {:.2}%",
        report.model_path.display(),
        report.test.loss,
        report.test.accuracy * 100.0,
    );
}
