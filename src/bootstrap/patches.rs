// src/bootstrap/patches.rs

//! Local patches for the aspnetcore and installer clones
//!
//! Patches point the upstream builds at the local package feed and download
//! cache. Their paths are not known until run time, so the patch files carry
//! a placeholder token that is substituted before `patch` sees them.
//!
//! Once every patch of a repository is in, a `bootstrap-patched` sentinel is
//! written into the clone and later runs leave it alone.

use super::component::{Component, PatchPlaceholder};
use super::layout::WorkspaceLayout;
use super::process;
use crate::error::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Marker written into a clone once its patches are applied
pub const PATCHED_SENTINEL: &str = "bootstrap-patched";

/// Result of patching one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The sentinel was already present
    AlreadyPatched,
    /// This many patches were applied
    Applied(usize),
}

/// Patch files for a component, in lexical order
pub fn discover_patches(patches_dir: &Path, component: Component) -> Result<Vec<PathBuf>> {
    let pattern = patches_dir.join(format!("{}-*.patch", component.name()));
    let mut found = Vec::new();
    for entry in glob::glob(&pattern.to_string_lossy())? {
        found.push(entry.map_err(|e| Error::PatchError(e.to_string()))?);
    }
    found.sort();
    Ok(found)
}

/// Replace every occurrence of the placeholder token
pub fn substitute(content: &str, placeholder: PatchPlaceholder, value: &Path) -> String {
    content.replace(placeholder.token(), &value.to_string_lossy())
}

/// Path named on the first `+++ ` line, up to any tab
pub fn target_file(content: &str) -> Option<&str> {
    content
        .lines()
        .find(|line| line.starts_with("+++ "))
        .and_then(|line| line[4..].trim().split('\t').next())
        .filter(|path| !path.is_empty())
}

/// Directory a placeholder expands to
fn placeholder_value(layout: &WorkspaceLayout, placeholder: PatchPlaceholder) -> PathBuf {
    match placeholder {
        PatchPlaceholder::DownloadsDir => layout.downloads_dir(),
        PatchPlaceholder::PackagesDir => layout.packages_dir(),
    }
}

/// Apply one patch file to a clone
///
/// The substituted text goes through a temporary file which is removed
/// when this returns.
pub fn apply_patch(
    repo_dir: &Path,
    patch_path: &Path,
    substitution: Option<(PatchPlaceholder, &Path)>,
) -> Result<()> {
    let raw = std::fs::read_to_string(patch_path).map_err(|e| {
        Error::PatchError(format!("Failed to read {}: {}", patch_path.display(), e))
    })?;
    let content = match substitution {
        Some((placeholder, value)) => substitute(&raw, placeholder, value),
        None => raw,
    };

    let target = target_file(&content).ok_or_else(|| {
        Error::PatchError(format!("{} has no '+++' target line", patch_path.display()))
    })?;

    let mut temp = tempfile::Builder::new()
        .prefix("bootstrap-")
        .suffix(".patch")
        .tempfile()?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;

    info!("Applying {} to {}", patch_path.display(), target);
    let mut cmd = Command::new("patch");
    cmd.arg("--verbose")
        .arg(repo_dir.join(target))
        .arg("-i")
        .arg(temp.path());

    match process::capture(&mut cmd) {
        Ok(_) => Ok(()),
        Err(Error::ToolFailed { status, output, .. }) => {
            warn!("patch output:\n{}", output.trim_end());
            Err(Error::PatchError(format!(
                "{} did not apply ({}):\n{}",
                patch_path.display(),
                status,
                output
            )))
        }
        Err(e) => Err(e),
    }
}

/// Apply all of a component's patches unless its clone is already patched
pub fn apply_component_patches(
    layout: &WorkspaceLayout,
    patches_dir: &Path,
    component: Component,
) -> Result<PatchOutcome> {
    let repo_dir = layout.repo_dir(component);
    let sentinel = repo_dir.join(PATCHED_SENTINEL);
    if sentinel.exists() {
        info!("{} already patched, skipping", component);
        return Ok(PatchOutcome::AlreadyPatched);
    }

    let patches = discover_patches(patches_dir, component)?;
    if patches.is_empty() {
        warn!("No {} patches found in {}", component, patches_dir.display());
    }

    let placeholder = component.patch_placeholder();
    let value = placeholder.map(|p| placeholder_value(layout, p));
    let substitution = placeholder.zip(value.as_deref());

    for patch in &patches {
        apply_patch(&repo_dir, patch, substitution)?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&sentinel)?;
    info!("Applied {} patches to {}", patches.len(), component);
    Ok(PatchOutcome::Applied(patches.len()))
}
