// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing what the self-test
// harness works with. No I/O, no FFI, no terminal handling.

/// Golden cases, outcomes, reports and the decision margin
pub mod golden;

/// Menu descriptors (title, command, keyed actions)
pub mod menu;

/// InferenceBackend and MenuDispatcher
pub mod traits;
