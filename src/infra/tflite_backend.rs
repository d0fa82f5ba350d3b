// ============================================================
// Layer 6 — Native TFLite Backend (feature `tflite`)
// ============================================================
// FFI wrapper over the C glue that owns the TFLite Micro
// interpreter. The glue keeps one interpreter, one arena and one
// set of tensors in process-wide statics, so only one
// TfliteBackend may exist at a time.
//
// Safety rests on three rules enforced here rather than by the
// caller:
//   - call order is checked by CallOrder before any glue call
//   - the glue keeps the model pointer, so the blob is copied into
//     memory that lives for the rest of the process
//   - the output view is exactly OUTPUT_LEN elements, the output
//     tensor size of the two-class model
//
// Link: libtflite_glue.a, searched in TFLITE_GLUE_LIB_DIR (build.rs).

use std::{
    ffi::c_void,
    slice,
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{bail, Result};

use crate::domain::traits::InferenceBackend;
use crate::infra::call_order::CallOrder;

#[link(name = "tflite_glue", kind = "static")]
unsafe extern "C" {
    fn tflite_load_model(model_data: *const u8, model_len: u32);
    fn tflite_set_input(data: *const c_void);
    fn tflite_set_input_zeros();
    fn tflite_classify();
    fn tflite_get_output() -> *mut i8;
}

/// Output classes of the MLP_32x32 model.
pub const OUTPUT_LEN: usize = 2;

static ACQUIRED: AtomicBool = AtomicBool::new(false);

pub struct TfliteBackend {
    input_len: usize,
    order:     CallOrder,
}

impl TfliteBackend {
    /// Claim the process-wide interpreter. `input_len` is the size of
    /// the model's input tensor in bytes; the glue does not report it.
    pub fn acquire(input_len: usize) -> Result<Self> {
        if input_len == 0 {
            bail!("input tensor length must be non-zero");
        }
        if ACQUIRED.swap(true, Ordering::AcqRel) {
            bail!("the TFLite interpreter is already owned by another backend");
        }
        Ok(Self { input_len, order: CallOrder::default() })
    }
}

impl Drop for TfliteBackend {
    fn drop(&mut self) {
        ACQUIRED.store(false, Ordering::Release);
    }
}

impl InferenceBackend for TfliteBackend {
    fn load_model(&mut self, model: &[u8]) -> Result<()> {
        let Ok(len) = u32::try_from(model.len()) else {
            bail!("model of {} bytes does not fit the glue interface", model.len());
        };
        self.order.load()?;
        // The interpreter keeps pointing into the blob after this call
        // returns, and outlives this backend, so it gets its own copy.
        let pinned: &'static [u8] = Box::leak(model.to_vec().into_boxed_slice());
        // SAFETY: `pinned` is `len` bytes long and never freed.
        unsafe { tflite_load_model(pinned.as_ptr(), len) };
        Ok(())
    }

    fn set_input(&mut self, input: &[u8]) -> Result<()> {
        if input.len() != self.input_len {
            bail!("input is {} bytes, model expects {}", input.len(), self.input_len);
        }
        self.order.stage()?;
        // SAFETY: a model is loaded, and the glue copies input_len bytes,
        // which is the length checked above.
        unsafe { tflite_set_input(input.as_ptr().cast()) };
        Ok(())
    }

    fn set_input_zeros(&mut self) -> Result<()> {
        self.order.stage()?;
        // SAFETY: a model is loaded, so the input tensor exists.
        unsafe { tflite_set_input_zeros() };
        Ok(())
    }

    fn run_inference(&mut self) -> Result<()> {
        self.order.run()?;
        // SAFETY: a model is loaded and an input has been staged.
        unsafe { tflite_classify() };
        Ok(())
    }

    fn output(&self) -> Result<&[i8]> {
        self.order.ensure_ran()?;
        // SAFETY: the interpreter has run, so the output tensor is allocated.
        let out = unsafe { tflite_get_output() };
        if out.is_null() {
            bail!("interpreter returned no output tensor");
        }
        // SAFETY: the output tensor holds OUTPUT_LEN elements and is only
        // rewritten by tflite_classify, which needs &mut self.
        Ok(unsafe { slice::from_raw_parts(out, OUTPUT_LEN) })
    }
}
