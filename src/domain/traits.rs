// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The harness never talks to an inference runtime or a terminal
// directly. It goes through these two traits, so the native
// TFLite glue, a recorded replay and the fakes used in tests are
// all interchangeable.
//
// Implementations:
//   InferenceBackend → infra::recorded_backend::RecordedBackend
//                      infra::tflite_backend::TfliteBackend (feature `tflite`)
//   MenuDispatcher   → cli::menu::ConsoleMenu

use anyhow::Result;

use crate::domain::menu::{Menu, MenuAction};

// ─── InferenceBackend ─────────────────────────────────────────────────────────
/// An inference engine holding one loaded model and one staged input.
///
/// Call order contract:
///   1. `load_model` exactly once, before anything else
///   2. `set_input` or `set_input_zeros`
///   3. `run_inference`
///   4. `output`
///
/// Calling out of order is outside the contract. The recorded backend
/// reports it as an error; the native backend's behaviour is undefined
/// there, which is why the harness only hands out a backend after
/// `load_model` has succeeded.
pub trait InferenceBackend {
    /// Hand the model blob to the engine and allocate its tensors.
    fn load_model(&mut self, model: &[u8]) -> Result<()>;

    /// Copy one pre-quantized input example into the input tensor.
    fn set_input(&mut self, input: &[u8]) -> Result<()>;

    /// Fill the input tensor with zeros.
    fn set_input_zeros(&mut self) -> Result<()>;

    /// Run one forward pass over the staged input.
    fn run_inference(&mut self) -> Result<()>;

    /// Quantized output vector of the last forward pass.
    /// The borrow ends before the next `run_inference` can be called.
    fn output(&self) -> Result<&[i8]>;
}

impl<B: InferenceBackend + ?Sized> InferenceBackend for Box<B> {
    fn load_model(&mut self, model: &[u8]) -> Result<()> {
        (**self).load_model(model)
    }

    fn set_input(&mut self, input: &[u8]) -> Result<()> {
        (**self).set_input(input)
    }

    fn set_input_zeros(&mut self) -> Result<()> {
        (**self).set_input_zeros()
    }

    fn run_inference(&mut self) -> Result<()> {
        (**self).run_inference()
    }

    fn output(&self) -> Result<&[i8]> {
        (**self).output()
    }
}

// ─── MenuDispatcher ───────────────────────────────────────────────────────────
/// Owns an input loop and turns key presses into menu actions.
pub trait MenuDispatcher {
    /// Present `menu` and call `on_select` synchronously for every
    /// selected item until the user leaves the menu.
    fn run(
        &mut self,
        menu:      &Menu,
        on_select: &mut dyn FnMut(MenuAction) -> Result<()>,
    ) -> Result<()>;
}
