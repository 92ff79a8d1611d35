//! Runtime image linking with jlink.

use std::path::Path;

use super::ModuleSet;
use crate::bundler::{
    error::{Context, Result},
    tool::{ToolInvocation, ToolRunner},
};

/// Builds the jlink invocation producing a stripped runtime image.
pub fn invocation(jlink: &Path, jre_home: &Path, modules: &ModuleSet, output: &Path) -> ToolInvocation {
    ToolInvocation::new("jlink", jlink)
        .arg("--module-path")
        .path_arg(&jre_home.join("jmods"))
        .arg("--add-modules")
        .arg(modules.to_arg())
        .args([
            "--strip-native-commands",
            "--no-header-files",
            "--no-man-pages",
            "--compress=2",
            "--strip-debug",
            "--output",
        ])
        .path_arg(output)
}

/// Links the runtime image into `output`.
///
/// jlink refuses to write into an existing directory, so `output` must be
/// absent when this is called; staging guarantees that.
pub async fn link_runtime<R: ToolRunner>(
    runner: &R,
    jlink: &Path,
    jre_home: &Path,
    modules: &ModuleSet,
    output: &Path,
) -> Result<()> {
    log::info!("Creating custom Java runtime");

    if output.exists() {
        crate::bail!(
            "runtime image directory {} already exists, jlink would refuse to overwrite it",
            output.display()
        );
    }

    let invocation = invocation(jlink, jre_home, modules, output);
    runner.run(&invocation).await.context("running jlink")?;

    if !output.is_dir() {
        crate::bail!(
            "jlink reported success but produced no runtime image at {}",
            output.display()
        );
    }

    log::info!("Linked runtime image {}", output.display());
    Ok(())
}
