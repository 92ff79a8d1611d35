//! WiX toolchain provisioning.
//!
//! jpackage needs `candle.exe` and `light.exe` from WiX 3 to emit MSI
//! installers. The binaries are downloaded once into the installer root's
//! `wix` directory and reused by every later build.

use std::path::{Path, PathBuf};

use crate::bundler::{
    error::{Context, ErrorExt, Result},
    utils::{fs, http},
};

/// An extracted WiX toolchain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    dir: PathBuf,
}

impl Toolchain {
    /// Uses an already extracted toolchain at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the WiX executables; the 3.11 binaries archive is flat.
    pub fn bin_dir(&self) -> &Path {
        &self.dir
    }
}

/// Ensures the toolchain exists in `cache_dir`, downloading `url` if it does not.
///
/// An existing cache directory is trusted as-is; no network access happens.
/// The archive is extracted next to the cache and renamed into place, so an
/// interrupted extraction never leaves a half-filled cache behind.
pub async fn provision(cache_dir: &Path, url: &str) -> Result<Toolchain> {
    if cache_dir.is_dir() {
        log::debug!("WiX already cached at {}", cache_dir.display());
        return Ok(Toolchain::new(cache_dir));
    }

    log::info!("Downloading WiX");
    let archive = http::download_to_temp(url)
        .await
        .context("downloading WiX toolchain")?;

    let partial = partial_dir(cache_dir);
    fs::clear_dir_except(&partial, &[]).await?;
    http::extract_zip(archive.path(), &partial)
        .await
        .context("extracting WiX toolchain")?;
    tokio::fs::rename(&partial, cache_dir)
        .await
        .fs_context("moving WiX toolchain into place", cache_dir)?;

    log::info!("WiX extracted to {}", cache_dir.display());
    Ok(Toolchain::new(cache_dir))
}

fn partial_dir(cache_dir: &Path) -> PathBuf {
    let mut name = cache_dir
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    cache_dir.with_file_name(name)
}
