// ============================================================
// Layer 6 — Backend Call Order
// ============================================================
// Tracks where a backend is in the load → stage → run → read
// sequence so out-of-order calls fail with an error instead of
// reaching an engine that is not ready for them.
//
// Used by:
//   RecordedBackend → errors instead of replaying stale data
//   TfliteBackend   → errors instead of calling into an
//                     interpreter that has no model or input

use anyhow::{bail, Result};

#[derive(Debug, Default)]
pub struct CallOrder {
    loaded: bool,
    staged: bool,
    ran:    bool,
}

impl CallOrder {
    /// Record the single model load. A second load is refused.
    pub fn load(&mut self) -> Result<()> {
        if self.loaded {
            bail!("model already loaded");
        }
        self.loaded = true;
        Ok(())
    }

    /// Record a new staged input. Any previous output is now stale.
    pub fn stage(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        self.staged = true;
        self.ran = false;
        Ok(())
    }

    /// Check that a forward pass may run, then record it.
    pub fn run(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        if !self.staged {
            bail!("no input staged");
        }
        self.ran = true;
        Ok(())
    }

    /// Check that an output exists for the staged input.
    pub fn ensure_ran(&self) -> Result<()> {
        if !self.ran {
            bail!("no inference has run on the staged input");
        }
        Ok(())
    }

    fn ensure_loaded(&self) -> Result<()> {
        if !self.loaded {
            bail!("backend used before load_model");
        }
        Ok(())
    }
}
