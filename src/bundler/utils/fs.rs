//! File system utilities for staging.
//!
//! Provides copy and cleanup operations with path context on every error.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Removes every entry of `dir` except those named in `keep`.
///
/// A missing `dir` is not an error.
pub async fn clear_dir_except(dir: &Path, keep: &[&str]) -> Result<()> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("reading directory", dir),
    };

    while let Some(entry) = entries.next_entry().await.fs_context("reading directory", dir)? {
        let name = entry.file_name();
        if keep.iter().any(|k| name.as_os_str() == *k) {
            log::debug!("Keeping {}", entry.path().display());
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type().await.fs_context("inspecting", &path)?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).await.fs_context("removing directory", &path)?;
        } else {
            fs::remove_file(&path).await.fs_context("removing file", &path)?;
        }
    }
    Ok(())
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file into a directory, creating the directory as needed.
///
/// Returns the destination path. Fails if the source is not a file.
pub async fn copy_file_into(from: &Path, dest_dir: &Path) -> Result<PathBuf> {
    if !from.is_file() {
        return Err(Error::GenericError(format!(
            "{} does not exist or is not a file",
            from.display()
        )));
    }
    let name = from
        .file_name()
        .ok_or_else(|| Error::GenericError(format!("{} has no file name", from.display())))?;
    fs::create_dir_all(dest_dir)
        .await
        .fs_context("creating directory", dest_dir)?;
    let to = dest_dir.join(name);
    fs::copy(from, &to).await.fs_context("copying file", from)?;
    Ok(to)
}

/// Recursively copies a directory, creating parent directories of the
/// destination as needed.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!(
            "{} does not exist",
            from.display()
        )));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!(
            "{} is not a directory",
            from.display()
        )));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target = fs::read_link(entry.path())
                .await
                .fs_context("reading symlink", entry.path())?;
            if entry.path().is_dir() {
                symlink_dir(&target, &dest_path).fs_context("creating symlink", &dest_path)?;
            } else {
                symlink_file(&target, &dest_path).fs_context("creating symlink", &dest_path)?;
            }
        } else if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .await
                .fs_context("creating directory", &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path)
                .await
                .fs_context("copying file", entry.path())?;
        }
    }

    Ok(())
}

/// Lists the direct entries of `dir`, sorted by file name.
pub async fn list_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await.fs_context("reading directory", dir)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.fs_context("reading directory", dir)? {
        paths.push(entry.path());
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
