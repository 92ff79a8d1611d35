//! Command line interface for kodegen_bundler_jvm.
//!
//! Parses arguments, runs the build and reports the outcome with colored
//! output.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point, for arguments parsed by the caller
pub async fn run(args: Args) -> Result<i32> {
    execute_command(args).await
}
