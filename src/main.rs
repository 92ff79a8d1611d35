//! kodegen_bundler_jvm - native installers for JVM applications.

use kodegen_bundler_jvm::cli;
use kodegen_bundler_jvm::cli::{Args, OutputManager};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    // RUST_LOG still wins over the --quiet default
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.default_log_filter()),
    )
    .init();

    match cli::run(args).await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));
            output.suggestions(&e.recovery_suggestions());

            process::exit(1);
        }
    }
}
