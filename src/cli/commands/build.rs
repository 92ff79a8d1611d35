//! Installer build command.

use crate::bundler::{BuildParameters, BuildReport, Bundler};
use crate::cli::RuntimeConfig;
use crate::error::Result;

/// Runs the pipeline and prints the outcome.
pub(super) async fn execute_build(params: BuildParameters, config: &RuntimeConfig) -> Result<i32> {
    let output = config.output();
    let _ = output.section(&format!("Building {} installer", params.platform()));
    let _ = output.info(&format!("Main JAR: {}", params.main_jar().display()));
    let _ = output.info(&format!("Main class: {}", params.main_class()));

    let mut bundler = Bundler::new(params);
    match bundler.bundle().await {
        Ok(report) => {
            print_summary(&report, config);
            Ok(0)
        }
        Err(e) => {
            output.error(&format!("Build failed during {}: {}", e.stage(), e));
            output.suggestions(&e.recovery_suggestions());
            Ok(1)
        }
    }
}

fn print_summary(report: &BuildReport, config: &RuntimeConfig) {
    let output = config.output();
    let _ = output.verbose(&format!("Modules: {}", report.modules));
    let _ = output.verbose(&format!("Runtime image: {}", report.runtime_image.display()));

    if report.artifacts.is_empty() {
        let _ = output.warn("jpackage finished but no installer file was found");
        return;
    }

    let _ = output.section("Installers");
    for artifact in &report.artifacts {
        let _ = output.artifact(artifact);
    }
}
