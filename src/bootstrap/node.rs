// src/bootstrap/node.rs

//! Node.js for the ASP.NET Core build
//!
//! The release tarball is fetched once into the working directory, unpacked
//! and renamed to `node/`. An existing `node/` is reused as is.

use super::layout::WorkspaceLayout;
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tar::Archive;
use tracing::{debug, info};
use xz2::read::XzDecoder;

/// Whole-request timeout; the tarball is a few tens of megabytes
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Glob matching the directory a release tarball unpacks to
const EXTRACTED_PATTERN: &str = "node-v*-linux-x64";

/// What [`install`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeInstall {
    /// `node/` was already present
    Existing(PathBuf),
    /// Downloaded and unpacked into this directory
    Installed(PathBuf),
}

impl NodeInstall {
    pub fn path(&self) -> &Path {
        match self {
            Self::Existing(p) | Self::Installed(p) => p,
        }
    }
}

/// Make sure `<working-dir>/node` holds a Node.js release
pub fn install(layout: &WorkspaceLayout, url: &str) -> Result<NodeInstall> {
    let node_dir = layout.node_dir();
    if node_dir.exists() {
        info!("Node.js already present at {}, skipping download", node_dir.display());
        return Ok(NodeInstall::Existing(node_dir));
    }

    let file_name = url
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("node.tar.xz");
    let archive = layout.root().join(file_name);

    download(url, &archive)?;
    extract_tar_xz(&archive, layout.root())?;
    fs::remove_file(&archive)?;
    rename_extracted(layout.root(), &node_dir)?;

    info!("Node.js installed at {}", node_dir.display());
    Ok(NodeInstall::Installed(node_dir))
}

fn progress_bar(size: u64, name: &str) -> ProgressBar {
    let pb = ProgressBar::new(size);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(name.to_string());
    pb
}

/// Fetch `url` to `dest`
///
/// `file://` URLs are copied from the local filesystem. Anything else goes
/// through HTTP, where a non-success status is an error.
pub fn download(url: &str, dest: &Path) -> Result<()> {
    info!("Downloading {} to {}", url, dest.display());

    if let Some(local) = url.strip_prefix("file://") {
        fs::copy(local, dest).map_err(|e| {
            Error::DownloadError(format!("Failed to copy {}: {}", local, e))
        })?;
        return Ok(());
    }

    let client = Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| Error::DownloadError(format!("Failed to create HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::DownloadError(format!("{}: {}", url, e)))?;
    if !response.status().is_success() {
        return Err(Error::DownloadError(format!(
            "HTTP {} from {}",
            response.status(),
            url
        )));
    }

    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let pb = progress_bar(response.content_length().unwrap_or(0), &name);

    // Dropped, and so removed, unless the whole body arrives
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut temp = tempfile::Builder::new()
        .prefix(".download-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| {
            Error::IoError(format!("Failed to create file in {}: {e}", dir.display()))
        })?;
    let mut reader = pb.wrap_read(response);
    let written = io::copy(&mut reader, &mut temp)
        .map_err(|e| Error::DownloadError(format!("Failed reading {}: {}", url, e)))?;
    pb.finish_with_message(format!("{} [done]", name));
    debug!("Downloaded {} bytes", written);

    temp.persist(dest).map_err(|e| {
        Error::IoError(format!("Failed to move download to {}: {}", dest.display(), e.error))
    })?;
    Ok(())
}

/// Unpack an xz compressed tarball into `dest`
pub fn extract_tar_xz(archive: &Path, dest: &Path) -> Result<()> {
    debug!("Extracting {} into {}", archive.display(), dest.display());
    let file = File::open(archive)?;
    let mut tar = Archive::new(XzDecoder::new(BufReader::new(file)));
    tar.unpack(dest).map_err(|e| {
        Error::IoError(format!("Failed to extract {}: {}", archive.display(), e))
    })?;
    Ok(())
}

/// Rename the unpacked `node-v*-linux-x64` directory to `node_dir`
pub fn rename_extracted(root: &Path, node_dir: &Path) -> Result<()> {
    let pattern = root.join(EXTRACTED_PATTERN);
    let extracted = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .find(|path| path.is_dir())
        .ok_or_else(|| {
            Error::DownloadError(format!(
                "Archive did not contain a {} directory",
                EXTRACTED_PATTERN
            ))
        })?;

    fs::rename(&extracted, node_dir)?;
    Ok(())
}
