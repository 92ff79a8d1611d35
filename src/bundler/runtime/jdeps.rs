//! Module detection with jdeps.

use std::path::{Path, PathBuf};

use super::ModuleSet;
use crate::bundler::{
    error::{Context, Result},
    tool::{ToolInvocation, ToolRunner},
    utils::fs,
};

/// Builds the jdeps invocation for the given staged entries.
///
/// Every entry goes on the class path and is also analyzed, so dependencies
/// between the staged JARs resolve and every JAR contributes modules. The
/// class path names entries relative to `staged_libs` and jdeps runs there,
/// so separator characters in the build directory never reach the list.
pub fn invocation(
    jdeps: &Path,
    jre_version: u32,
    staged_libs: &Path,
    entries: &[PathBuf],
) -> Result<ToolInvocation> {
    let relative = entries
        .iter()
        .map(|p| p.strip_prefix(staged_libs).unwrap_or(p));
    let class_path = std::env::join_paths(relative)?;

    Ok(ToolInvocation::new("jdeps", jdeps)
        .current_dir(staged_libs)
        .args([
            "-q".to_string(),
            "--multi-release".to_string(),
            jre_version.to_string(),
            "--ignore-missing-deps".to_string(),
            "--print-module-deps".to_string(),
            "--class-path".to_string(),
            class_path.to_string_lossy().into_owned(),
        ])
        .args(entries.iter().map(|p| p.to_string_lossy().into_owned())))
}

/// Runs jdeps over every entry of `staged_libs` and returns the detected modules.
pub async fn detect_modules<R: ToolRunner>(
    runner: &R,
    jdeps: &Path,
    jre_version: u32,
    staged_libs: &Path,
) -> Result<ModuleSet> {
    log::info!("Detecting required modules");

    let entries = fs::list_dir_sorted(staged_libs).await?;
    if entries.is_empty() {
        crate::bail!("{} is empty, nothing to analyze", staged_libs.display());
    }

    let invocation = invocation(jdeps, jre_version, staged_libs, &entries)?;
    let stdout = runner.capture(&invocation).await.context("running jdeps")?;
    let modules = ModuleSet::parse(&String::from_utf8_lossy(&stdout))?;

    log::info!("Detected modules '{}'", modules);
    Ok(modules)
}
