//! Middleware layer.
//!
//! Cross-cutting concerns applied to every request the router dispatches.
//! Currently a single built-in:
//!
//! - [`trace`]: per-request span with method, path, status and latency

pub mod trace;
