// ============================================================
// Layer 2 — Harness Configuration
// ============================================================
// Everything the harness needs besides the backend and the
// compiled-in model: currently the golden suite. Serialisable so
// a suite can be kept next to a recording and reloaded.

use serde::{Deserialize, Serialize};

use crate::domain::golden::{default_suite, GoldenCase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Golden cases, run in order by the golden-test action
    pub golden: Vec<GoldenCase>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { golden: default_suite() }
    }
}

impl HarnessConfig {
    /// Replace the built-in suite, e.g. with one loaded via `--golden`.
    pub fn with_golden(golden: Vec<GoldenCase>) -> Self {
        Self { golden }
    }
}
