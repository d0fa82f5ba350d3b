// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments, picks the backend, builds the harness and
// either runs one action or hands control to the console menu.

pub mod commands;

pub mod menu;

use std::io;

use anyhow::{bail, Result};
use clap::Parser;

use crate::application::config::HarnessConfig;
use crate::application::harness::SelfTestHarness;
use crate::domain::traits::InferenceBackend;
use crate::infra::{model_data::ModelAssets, recorded_backend::RecordedBackend};
use commands::{BackendArgs, BackendKind, Commands};
use menu::ConsoleMenu;

#[derive(Parser, Debug)]
#[command(
    name = "mlp-selftest",
    version,
    about = "Self-test harness for the quantized MLP_32x32 classifier."
)]
pub struct Cli {
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Action to run (interactive menu when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let assets = ModelAssets::compiled();
        if assets.is_incomplete() {
            tracing::warn!(
                model_bytes = assets.blob.len(),
                input_bytes = assets.sample_input.len(),
                "Built without MLP_SELFTEST_MODEL / MLP_SELFTEST_INPUT"
            );
        }

        let config = HarnessConfig::try_from(&self.backend)?;
        let backend = self.build_backend(&assets)?;
        let mut harness = SelfTestHarness::init(backend, assets, config, io::stdout())?;

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Menu => {
                let mut console = ConsoleMenu::new(io::stdin().lock(), io::stdout());
                harness.run_menu(&mut console)
            }
            Commands::Zeros  => harness.classify_zeros().map(drop),
            Commands::Sample => harness.classify_sample().map(drop),
            Commands::Golden => harness.golden_test().map(drop),
        }
    }

    fn build_backend(&self, assets: &ModelAssets) -> Result<Box<dyn InferenceBackend>> {
        match self.backend.backend {
            BackendKind::Recorded => {
                let Some(path) = &self.backend.recording else {
                    bail!("--backend recorded needs --recording <FILE>");
                };
                Ok(Box::new(RecordedBackend::from_path(path)?))
            }
            BackendKind::Tflite => self.native_backend(assets),
        }
    }

    #[cfg(feature = "tflite")]
    fn native_backend(&self, assets: &ModelAssets) -> Result<Box<dyn InferenceBackend>> {
        use crate::infra::tflite_backend::TfliteBackend;

        Ok(Box::new(TfliteBackend::acquire(assets.sample_input.len())?))
    }

    #[cfg(not(feature = "tflite"))]
    fn native_backend(&self, _assets: &ModelAssets) -> Result<Box<dyn InferenceBackend>> {
        bail!("this binary was built without the `tflite` feature")
    }
}
