//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `runtime.rs` — platforms/roms/show/download/update/delete/match.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `api`/`services/*`.
//! - Keep behavior and output schema stable.

pub mod runtime;

pub use runtime::handle_runtime_commands;
