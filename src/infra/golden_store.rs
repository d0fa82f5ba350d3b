// ============================================================
// Layer 6 — Golden Suite Store
// ============================================================
// Loads golden suites from JSON arrays:
//
//   [ { "name": "zeros",  "input": "zeros",  "expected": -193 },
//     { "name": "sample", "input": "sample", "expected": -175 } ]

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};

use crate::domain::golden::GoldenCase;

/// Load a golden suite from a JSON file.
/// Cases keep their file order, which is the order they run in.
/// A file with no cases is rejected.
pub fn load_suite(path: impl AsRef<Path>) -> Result<Vec<GoldenCase>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading golden suite {}", path.display()))?;
    let cases: Vec<GoldenCase> = serde_json::from_str(&text)
        .with_context(|| format!("parsing golden suite {}", path.display()))?;
    if cases.is_empty() {
        bail!("golden suite {} has no cases", path.display());
    }
    tracing::info!(path = %path.display(), cases = cases.len(), "Loaded golden suite");
    Ok(cases)
}
