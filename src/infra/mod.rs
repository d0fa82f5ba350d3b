// ============================================================
// Layer 6 — Infrastructure
// ============================================================
//   call_order.rs       — load → stage → run → read checks shared by backends
//   model_data.rs       — model blob and sample input baked in by build.rs
//   recorded_backend.rs — replays captured output tensors from JSON
//   tflite_backend.rs   — FFI to the native TFLite glue (feature `tflite`)
//   golden_store.rs     — golden suites as JSON files

pub mod call_order;

pub mod golden_store;

pub mod model_data;

pub mod recorded_backend;

#[cfg(feature = "tflite")]
pub mod tflite_backend;
