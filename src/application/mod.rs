// ============================================================
// Layer 2 — Application
// ============================================================
// Workflow coordination: the harness stages inputs, drives the
// backend and formats results. It never parses arguments and
// never knows which concrete backend it runs on.

/// Harness settings (golden suite)
pub mod config;

/// The self-test harness and its three actions
pub mod harness;
