//! Command handlers for the tfd CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod export;
pub mod postprocess;
