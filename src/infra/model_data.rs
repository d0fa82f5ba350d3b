// ============================================================
// Layer 6 — Compiled-in Model Data
// ============================================================
// build.rs writes $OUT_DIR/model_data.rs from three environment
// variables:
//
//   MLP_SELFTEST_MODEL        path to the .tflite flatbuffer
//   MLP_SELFTEST_INPUT        path to the raw quantized sample input
//   MLP_SELFTEST_MODEL_NAME   display name (default MLP_32x32)
//
// Unset paths compile to empty slices.

mod generated {
    include!(concat!(env!("OUT_DIR"), "/model_data.rs"));
}

/// Model blob, sample input and display name, all process-lifetime constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelAssets {
    pub name:         &'static str,
    pub blob:         &'static [u8],
    pub sample_input: &'static [u8],
}

impl ModelAssets {
    /// The assets baked in at build time.
    pub fn compiled() -> Self {
        Self {
            name:         generated::MODEL_NAME,
            blob:         generated::MODEL_BLOB,
            sample_input: generated::SAMPLE_INPUT,
        }
    }

    /// True when the build carried no model or no sample input.
    pub fn is_incomplete(&self) -> bool {
        self.blob.is_empty() || self.sample_input.is_empty()
    }
}
