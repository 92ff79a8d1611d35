//! Command execution.
//!
//! The binary has a single command: build the installer described by the
//! arguments.

mod build;

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

use build::execute_build;

/// Execute the build described by the parsed arguments.
///
/// Configuration errors are returned to the caller; pipeline failures are
/// reported here and turned into exit code 1.
pub async fn execute_command(args: Args) -> Result<i32> {
    let config = RuntimeConfig::from(&args);
    let params = args.to_parameters()?;
    execute_build(params, &config).await
}
