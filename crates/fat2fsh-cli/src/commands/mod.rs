//! Command implementations
//!
//! - `convert.rs` — fetch code lists and write JSON + FSH artifacts
//! - `check.rs` — API reachability and output directory smoke checks

pub mod check;
pub mod convert;

pub use check::check_command;
pub use convert::{ConvertOptions, convert_command};
