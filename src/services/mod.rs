//! Service layer containing side-effect helpers around the API client.
//!
//! ## Service map
//! - `config.rs` — optional TOML config under `~/.config/romdeck/`.
//! - `endpoint.rs` — server source normalization (`host:port` shorthand).
//! - `download.rs` — archive persistence with a guarded `.part` file.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod download;
pub mod endpoint;
pub mod output;
