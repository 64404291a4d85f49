// src/bootstrap/artifacts.rs

//! Where each component's build leaves its artifacts, and where they go
//!
//! Every component has a fixed source root under its clone and a set of
//! glob patterns per [`ArtifactRole`]. Packages feed later builds through
//! the flat `local-packages` directory, downloads populate the namespaced
//! `local-downloads` cache, and outputs are the final deliverables.

use super::component::Component;
use super::config::{CONFIGURATION, TargetArch};
use super::layout::WorkspaceLayout;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Destination class of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactRole {
    /// NuGet packages consumed by later builds
    Packages,
    /// Archives served to later builds as a download cache
    Downloads,
    /// Final deliverables
    Output,
}

impl ArtifactRole {
    pub fn all() -> &'static [ArtifactRole] {
        &[Self::Packages, Self::Downloads, Self::Output]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Packages => "packages",
            Self::Downloads => "downloads",
            Self::Output => "output",
        }
    }
}

impl std::fmt::Display for ArtifactRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Patterns of one role together with their destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactGroup {
    pub role: ArtifactRole,
    pub destination: PathBuf,
    /// Absolute glob patterns
    pub patterns: Vec<String>,
}

/// Artifact locations for one component build
#[derive(Debug, Clone)]
pub struct ArtifactPlan {
    component: Component,
    version: String,
    source_root: PathBuf,
    layout: WorkspaceLayout,
    arch: TargetArch,
}

/// Files copied per role by [`ArtifactPlan::collect`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub packages: usize,
    pub downloads: usize,
    pub output: usize,
}

impl CopyReport {
    pub fn total(&self) -> usize {
        self.packages + self.downloads + self.output
    }

    fn record(&mut self, role: ArtifactRole, count: usize) {
        match role {
            ArtifactRole::Packages => self.packages += count,
            ArtifactRole::Downloads => self.downloads += count,
            ArtifactRole::Output => self.output += count,
        }
    }
}

impl ArtifactPlan {
    /// Plan for `component` built at `version` under `working_dir`
    pub fn new(
        working_dir: impl AsRef<Path>,
        component: Component,
        arch: TargetArch,
        version: impl Into<String>,
    ) -> Self {
        let layout = WorkspaceLayout::new(working_dir);
        let repo = layout.repo_dir(component);
        let source_root = match component {
            Component::AspNetCore => repo.join("artifacts"),
            _ => repo.join("artifacts").join("packages").join(CONFIGURATION),
        };

        Self {
            component,
            version: version.into(),
            source_root,
            layout,
            arch,
        }
    }

    pub fn component(&self) -> Component {
        self.component
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Directory the patterns are rooted at
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Patterns relative to the source root
    pub fn relative_patterns(&self, role: ArtifactRole) -> Vec<String> {
        let arch = self.arch.as_str();
        let config = CONFIGURATION;
        let templates: &[&str] = match (self.component, role) {
            (Component::Runtime, ArtifactRole::Packages) => &[
                "Shipping/Microsoft.NETCore.App.Host.linux-{arch}.*.nupkg",
                "Shipping/Microsoft.NETCore.App.Runtime.linux-{arch}.*.nupkg",
            ],
            (Component::Runtime, ArtifactRole::Downloads) => {
                &["Shipping/dotnet-runtime-*-linux-{arch}.tar.gz"]
            }
            (Component::Runtime, ArtifactRole::Output) => &[
                "Shipping/dotnet-runtime-*-linux-{arch}.tar.gz",
                "Shipping/runtime.linux-{arch}.Microsoft.NETCore.DotNetHost.*.nupkg",
                "Shipping/runtime.linux-{arch}.Microsoft.NETCore.DotNetHostPolicy.*.nupkg",
                "Shipping/runtime.linux-{arch}.Microsoft.NETCore.DotNetHostResolver.*.nupkg",
                "NonShipping/runtime.linux-{arch}.Microsoft.NETCore.ILAsm.*.nupkg",
                "NonShipping/runtime.linux-{arch}.Microsoft.NETCore.ILDAsm.*.nupkg",
            ],
            (Component::Sdk, ArtifactRole::Packages) => {
                &["Shipping/Microsoft.DotNet.Common.*.nupkg"]
            }
            (Component::Sdk, ArtifactRole::Downloads) => {
                &["NonShipping/dotnet-toolset-internal-*.zip"]
            }
            (Component::AspNetCore, ArtifactRole::Packages) => &[
                "packages/{config}/Shipping/Microsoft.AspNetCore.App.Runtime.linux-{arch}.*.nupkg",
                "packages/{config}/Shipping/Microsoft.DotNet.Web.*.nupkg",
            ],
            (Component::AspNetCore, ArtifactRole::Downloads) => &[
                "installers/{config}/aspnetcore-runtime-*-linux-{arch}.tar.gz",
                "installers/{config}/aspnetcore-runtime-internal-*-linux-{arch}.tar.gz",
                "installers/{config}/aspnetcore_base_runtime.version",
            ],
            (Component::AspNetCore, ArtifactRole::Output) => &[
                "packages/{config}/Shipping/Microsoft.AspNetCore.App.Runtime.linux-{arch}.*.nupkg",
            ],
            (Component::Installer, ArtifactRole::Output) => {
                &["Shipping/dotnet-sdk-*-linux-{arch}.tar.gz"]
            }
            _ => &[],
        };

        templates
            .iter()
            .map(|t| t.replace("{arch}", arch).replace("{config}", config))
            .collect()
    }

    /// Absolute patterns for a role
    pub fn patterns(&self, role: ArtifactRole) -> Vec<String> {
        self.relative_patterns(role)
            .into_iter()
            .map(|p| self.source_root.join(p).to_string_lossy().into_owned())
            .collect()
    }

    /// Destination directory for a role
    pub fn destination(&self, role: ArtifactRole) -> PathBuf {
        match role {
            ArtifactRole::Packages => self.layout.packages_dir(),
            ArtifactRole::Output => self.layout.output_dir(),
            ArtifactRole::Downloads => {
                let mut dir = self.layout.downloads_dir();
                if let Some(namespace) = self.component.downloads_namespace() {
                    dir.push(namespace);
                }
                dir.join(&self.version)
            }
        }
    }

    /// Non-empty pattern groups in role order
    pub fn groups(&self) -> Vec<ArtifactGroup> {
        ArtifactRole::all()
            .iter()
            .map(|&role| ArtifactGroup {
                role,
                destination: self.destination(role),
                patterns: self.patterns(role),
            })
            .filter(|group| !group.patterns.is_empty())
            .collect()
    }

    /// Create the download cache directory for this build
    pub fn prepare_downloads(&self) -> Result<PathBuf> {
        let dir = self.destination(ArtifactRole::Downloads);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Copy every matching artifact to its destination
    pub fn collect(&self) -> Result<CopyReport> {
        let mut report = CopyReport::default();
        for group in self.groups() {
            for pattern in &group.patterns {
                let copied = copy_matching(pattern, &group.destination)?;
                report.record(group.role, copied);
            }
        }
        info!(
            "Collected {} {} artifacts ({} packages, {} downloads, {} output)",
            report.total(),
            self.component,
            report.packages,
            report.downloads,
            report.output
        );
        Ok(report)
    }
}

/// Copy the files matching `pattern` into `destination`
///
/// File names are preserved. Zero matches is logged and leaves the
/// destination untouched; the directory is only created once there is
/// something to copy.
pub fn copy_matching(pattern: &str, destination: &Path) -> Result<usize> {
    let mut copied = 0;
    for entry in glob::glob(pattern)? {
        let source = entry.map_err(|e| Error::IoError(e.to_string()))?;
        if !source.is_file() {
            continue;
        }
        let Some(file_name) = source.file_name() else {
            continue;
        };

        if copied == 0 {
            std::fs::create_dir_all(destination)?;
        }
        let target = destination.join(file_name);
        debug!("Copying {} -> {}", source.display(), target.display());
        std::fs::copy(&source, &target).map_err(|e| {
            Error::IoError(format!(
                "Failed to copy {} to {}: {}",
                source.display(),
                target.display(),
                e
            ))
        })?;
        copied += 1;
    }

    if copied == 0 {
        warn!("No files matched {}", pattern);
    }
    Ok(copied)
}
