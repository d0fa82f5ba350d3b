// ============================================================
// Layer 6 — Recorded Backend
// ============================================================
// Replays output tensors captured from a device running the real
// model, so the harness can be exercised on a host without the
// native TFLite glue. Recording file (JSON):
//
//   {
//     "model_len": 20616,
//     "recordings": [
//       { "input": "zeros",              "output": [100, -93] },
//       { "input": { "bytes": [1, 2] },  "output": [80, -95] }
//     ]
//   }
//
// `model_len` is optional. When present, load_model rejects a blob
// of any other length, which catches a recording taken from a
// different model build.

use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::traits::InferenceBackend;
use crate::infra::call_order::CallOrder;

/// Input side of one recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordedInput {
    Zeros,
    Bytes(Vec<u8>),
}

impl RecordedInput {
    fn matches(&self, staged: &RecordedInput) -> bool {
        match (self, staged) {
            (RecordedInput::Zeros, RecordedInput::Zeros) => true,
            (RecordedInput::Bytes(a), RecordedInput::Bytes(b)) => a == b,
            (RecordedInput::Zeros, RecordedInput::Bytes(b))
            | (RecordedInput::Bytes(b), RecordedInput::Zeros) => {
                !b.is_empty() && b.iter().all(|&x| x == 0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub input:  RecordedInput,
    pub output: Vec<i8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordingFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_len:  Option<usize>,
    pub recordings: Vec<Recording>,
}

/// Backend that answers each forward pass from a recording
/// instead of running a model.
pub struct RecordedBackend {
    file:   RecordingFile,
    order:  CallOrder,
    staged: Option<RecordedInput>,
    output: Option<Vec<i8>>,
}

impl RecordedBackend {
    /// Wrap an already-parsed recording. Nothing is loaded yet;
    /// `load_model` must still be called first.
    pub fn new(file: RecordingFile) -> Self {
        Self { file, order: CallOrder::default(), staged: None, output: None }
    }

    /// Read and parse a JSON recording from disk.
    /// Fails with the path in the error chain if the file is
    /// missing or does not match the RecordingFile shape.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading recording {}", path.display()))?;
        let file: RecordingFile = serde_json::from_str(&text)
            .with_context(|| format!("parsing recording {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            recordings = file.recordings.len(),
            "Loaded backend recording"
        );
        Ok(Self::new(file))
    }

    fn stage(&mut self, input: RecordedInput) -> Result<()> {
        self.order.stage()?;
        self.staged = Some(input);
        self.output = None;
        Ok(())
    }
}

impl InferenceBackend for RecordedBackend {
    fn load_model(&mut self, model: &[u8]) -> Result<()> {
        if let Some(expected) = self.file.model_len {
            if model.len() != expected {
                bail!("model is {} bytes, recording was taken with {expected}", model.len());
            }
        }
        self.order.load()
    }

    fn set_input(&mut self, input: &[u8]) -> Result<()> {
        if input.is_empty() {
            bail!("empty input buffer");
        }
        self.stage(RecordedInput::Bytes(input.to_vec()))
    }

    fn set_input_zeros(&mut self) -> Result<()> {
        self.stage(RecordedInput::Zeros)
    }

    fn run_inference(&mut self) -> Result<()> {
        self.order.run()?;
        let staged = self.staged.as_ref().ok_or_else(|| anyhow!("no input staged"))?;
        let recording = self
            .file
            .recordings
            .iter()
            .find(|r| r.input.matches(staged))
            .ok_or_else(|| anyhow!("no recording for the staged input"))?;
        self.output = Some(recording.output.clone());
        Ok(())
    }

    fn output(&self) -> Result<&[i8]> {
        self.order.ensure_ran()?;
        self.output.as_deref().ok_or_else(|| anyhow!("no inference has run on the staged input"))
    }
}
