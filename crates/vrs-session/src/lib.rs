//! Per-login session context threaded through the orchestration.

pub mod context;

pub use context::{Selection, SessionContext};
