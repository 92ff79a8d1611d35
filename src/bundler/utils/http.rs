//! HTTP utilities for downloading the packaging toolchain.
//!
//! Provides a streamed download into a temporary file and ZIP extraction.
//! No checksum is verified: the archive comes from a fixed release URL.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Downloads `url` into a new temporary file.
///
/// The file is deleted when the returned handle is dropped.
pub async fn download_to_temp(url: &str) -> Result<tempfile::NamedTempFile> {
    log::info!("Downloading {}", url);

    let mut response = reqwest::get(url).await?.error_for_status()?;

    let temp = tempfile::NamedTempFile::new()?;
    let mut file = tokio::fs::File::create(temp.path())
        .await
        .fs_context("creating download file", temp.path())?;

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)
            .await
            .fs_context("writing download file", temp.path())?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .fs_context("writing download file", temp.path())?;

    log::debug!("Downloaded {} bytes from {}", written, url);
    Ok(temp)
}

/// Extracts a ZIP archive file into a destination directory.
///
/// Creates parent directories as needed and handles both files and directories in the archive.
///
/// **Security:** Rejects entries with `..` components or absolute paths so nothing is
/// written outside `dest`.
pub async fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    use async_zip::base::read::mem::ZipFileReader;
    use futures_lite::io::AsyncReadExt as _;

    let data = tokio::fs::read(archive)
        .await
        .fs_context("reading archive", archive)?;
    let reader = ZipFileReader::new(data).await?;

    tokio::fs::create_dir_all(dest)
        .await
        .fs_context("creating directory", dest)?;

    for i in 0..reader.file().entries().len() {
        let entry = reader
            .file()
            .entries()
            .get(i)
            .ok_or_else(|| Error::GenericError(format!("Failed to get ZIP entry {}", i)))?;

        let filename = entry
            .filename()
            .as_str()
            .map_err(|e| Error::GenericError(format!("Invalid filename in ZIP: {}", e)))?
            .to_string();

        if filename
            .split(['/', '\\'])
            .any(|component| component == "..")
            || filename.starts_with('/')
            || filename.starts_with('\\')
            || filename.contains(':')
        {
            return Err(Error::GenericError(format!(
                "Invalid ZIP entry path (potential traversal attack): {}",
                filename
            )));
        }

        let out_path = dest.join(&filename);

        if entry.dir()? {
            tokio::fs::create_dir_all(&out_path)
                .await
                .fs_context("creating directory", &out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating directory", parent)?;
        }

        let mut entry_reader = reader.reader_with_entry(i).await?;
        let mut content = Vec::new();
        entry_reader.read_to_end(&mut content).await?;

        tokio::fs::write(&out_path, content)
            .await
            .fs_context("writing extracted file", &out_path)?;
    }

    Ok(())
}
