//! Staging of build inputs.
//!
//! Rebuilds `installer/libs` from the prebuilt libraries plus the main JAR.
//! Everything else under the installer root is removed first, except the
//! toolchain cache, so no file of a previous build survives and jlink always
//! finds its output directory absent.

use std::path::PathBuf;

use crate::bundler::{
    error::{Context, Result},
    settings::{BuildLayout, BuildParameters},
    utils::fs,
};

/// Prepares a clean staging area and returns the staged libs directory.
pub async fn prepare(params: &BuildParameters) -> Result<PathBuf> {
    let layout = params.layout();

    log::info!("Cleaning up installer directory");
    fs::clear_dir_except(layout.installer_dir(), &[BuildLayout::TOOLCHAIN_DIR_NAME])
        .await
        .context("cleaning installer directory")?;

    let source = layout.libs_source_dir();
    let staged = layout.staged_libs_dir();
    fs::copy_dir(&source, &staged)
        .await
        .context("copying prebuilt libraries")?;
    let jar = fs::copy_file_into(params.main_jar(), &staged)
        .await
        .context("copying main jar")?;

    log::debug!(
        "Staged {} and {} into {}",
        source.display(),
        jar.display(),
        staged.display()
    );
    Ok(staged)
}
