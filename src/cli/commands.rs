// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// The four entry points and the flags shared by all of them.

use anyhow::{Error, Result};
use clap::{Args, Subcommand, ValueEnum};

use crate::application::config::HarnessConfig;
use crate::infra::golden_store;

/// What to run once the harness is initialized
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Interactive self-test menu (default)
    Menu,

    /// Classify an all-zero input and print the margin
    Zeros,

    /// Classify the compiled-in sample input and print the margin
    Sample,

    /// Run the golden suite and print OK / FAIL
    Golden,
}

/// Which inference backend to drive
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Replay output tensors from a JSON recording
    Recorded,
    /// Native TFLite glue (needs the `tflite` build feature)
    Tflite,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Inference backend to use
    #[arg(long, value_enum, default_value_t = default_backend())]
    pub backend: BackendKind,

    /// Recording file for the recorded backend
    #[arg(long)]
    pub recording: Option<String>,

    /// Golden suite JSON replacing the built-in expectations
    #[arg(long)]
    pub golden: Option<String>,
}

/// Convert CLI BackendArgs into the application-layer HarnessConfig.
/// Fallible because `--golden` names a file that has to be read;
/// without it the built-in suite is used.
impl TryFrom<&BackendArgs> for HarnessConfig {
    type Error = Error;

    fn try_from(args: &BackendArgs) -> Result<Self> {
        match &args.golden {
            Some(path) => Ok(HarnessConfig::with_golden(golden_store::load_suite(path)?)),
            None       => Ok(HarnessConfig::default()),
        }
    }
}

fn default_backend() -> BackendKind {
    if cfg!(feature = "tflite") {
        BackendKind::Tflite
    } else {
        BackendKind::Recorded
    }
}
