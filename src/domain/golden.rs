// ============================================================
// Layer 3 — Golden Test Domain Types
// ============================================================
// A golden suite is an ordered list of (name, input, expected
// margin) cases. Running it yields one outcome per case, in
// suite order, which the report renders as itemized failures
// followed by a single summary line.

use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Which input to stage before a forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSelector {
    /// An all-zero input tensor
    Zeros,
    /// The compiled-in sample input
    Sample,
}

/// One known-correct expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldenCase {
    pub name:     String,
    pub input:    InputSelector,
    pub expected: i32,
}

impl GoldenCase {
    pub fn new(name: impl Into<String>, input: InputSelector, expected: i32) -> Self {
        Self { name: name.into(), input, expected }
    }
}

/// Expected margins for the MLP_32x32 model: zero input first,
/// then the compiled-in sample.
pub fn default_suite() -> Vec<GoldenCase> {
    vec![
        GoldenCase::new("zeros",  InputSelector::Zeros,  -193),
        GoldenCase::new("sample", InputSelector::Sample, -175),
    ]
}

/// Decision margin of a two-class quantized output: `output[1] - output[0]`.
/// Widened to i32 before subtracting, so the full i8 range is safe.
pub fn decision_margin(output: &[i8]) -> Result<i32> {
    match output {
        [class0, class1, ..] => Ok(i32::from(*class1) - i32::from(*class0)),
        _ => bail!("output tensor has {} element(s), need at least 2", output.len()),
    }
}

/// Result of one golden case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseOutcome {
    pub index:    usize,
    pub name:     String,
    pub actual:   i32,
    pub expected: i32,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.actual == self.expected
    }
}

/// All outcomes of one golden run, in suite order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoldenReport {
    pub outcomes: Vec<CaseOutcome>,
}

impl GoldenReport {
    /// True when every case matched exactly.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }

    /// Mismatching cases, in suite order.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}

impl fmt::Display for GoldenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for o in self.failures() {
            writeln!(
                f,
                "*** Golden test {} failed: {} (actual) != {} (expected)",
                o.index, o.actual, o.expected
            )?;
        }
        if self.passed() {
            writeln!(f, "OK   Golden tests passed")
        } else {
            writeln!(f, "FAIL Golden tests failed")
        }
    }
}
