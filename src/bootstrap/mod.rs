// src/bootstrap/mod.rs

//! Bootstrap a .NET 8 SDK from source
//!
//! The runtime, sdk, aspnetcore and installer repositories are built in
//! sequence, each feeding the next through a local package feed and a local
//! download cache under the working directory:
//!
//! ```text
//! host packages -> Node.js -> clone
//!      │
//!      ▼
//! runtime ──► local-packages, local-downloads/Runtime/<ver>
//!      │
//!      ▼
//! sdk ──────► local-packages, local-downloads/Sdk/<ver>
//!      │
//!      ▼ (patched to use the local download cache)
//! aspnetcore ► local-packages, local-downloads/aspnetcore/Runtime/<ver>
//!      │
//!      ▼ (patched to use the local package feed)
//! installer ─► output/dotnet-sdk-*-linux-<arch>.tar.gz
//! ```
//!
//! Every step shells out to an external tool and aborts the run on failure.
//! There are no retries.

mod artifacts;
mod builds;
mod component;
mod config;
mod host;
mod layout;
mod metadata;
mod node;
mod patches;
mod process;
mod sources;
mod stages;

pub use artifacts::{ArtifactGroup, ArtifactPlan, ArtifactRole, CopyReport, copy_matching};
pub use builds::{BuildPlan, build_component, build_plan, resolve_version, rootfs_dir};
pub use component::{Component, PatchPlaceholder};
pub use config::{
    BootstrapConfig, CONFIGURATION, ConfigFile, DEFAULT_NODE_URL, DEFAULT_PATCHES_DIR,
    TargetArch, ensure_supported_runtime, resolve_working_dir,
};
pub use host::{BASE_PACKAGES, Prerequisites, install_required_packages, required_packages};
pub use layout::WorkspaceLayout;
pub use metadata::{find_xml_tag, require_xml_tag};
pub use node::NodeInstall;
pub use patches::{
    PATCHED_SENTINEL, PatchOutcome, apply_component_patches, apply_patch, discover_patches,
};
pub use sources::{Repository, clone_all, repositories};
pub use stages::{BootstrapStage, RunSummary, StageRecord, StageStatus};

use crate::error::Result;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Bootstrap orchestrator that runs every stage in order
pub struct Bootstrap {
    config: BootstrapConfig,
    layout: WorkspaceLayout,
}

impl Bootstrap {
    /// Create an orchestrator, rejecting unsupported runtime versions
    pub fn new(config: BootstrapConfig) -> Result<Self> {
        config.ensure_supported()?;
        let layout = config.layout();
        Ok(Self { config, layout })
    }

    /// Get the configuration
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Get the directory layout
    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    /// Get the work directory
    pub fn work_dir(&self) -> &Path {
        self.layout.root()
    }

    /// Run the whole pipeline
    pub fn run(&self) -> Result<RunSummary> {
        self.run_stages(BootstrapStage::all())
    }

    /// Run the given stages in order, stopping at the first failure
    pub fn run_stages(&self, stages: &[BootstrapStage]) -> Result<RunSummary> {
        self.layout.create()?;

        let mut summary = RunSummary::default();
        for &stage in stages {
            info!("=== {} ===", stage);
            let started = Instant::now();
            let status = self.run_stage(stage)?;
            let elapsed = started.elapsed();
            info!("{} finished in {:.1}s", stage, elapsed.as_secs_f64());
            summary.record(stage, status, elapsed);
        }
        Ok(summary)
    }

    /// Run a single stage
    pub fn run_stage(&self, stage: BootstrapStage) -> Result<StageStatus> {
        if let Some(component) = stage.patches() {
            return match apply_component_patches(&self.layout, &self.config.patches_dir, component)? {
                PatchOutcome::AlreadyPatched => {
                    Ok(StageStatus::Skipped(format!("{} already patched", component)))
                }
                PatchOutcome::Applied(n) => {
                    Ok(StageStatus::Done(format!("{} patches applied", n)))
                }
            };
        }

        if let Some(component) = stage.builds() {
            let report = build_component(&self.config, component)?;
            return Ok(StageStatus::Done(format!("{} artifacts collected", report.total())));
        }

        match stage {
            BootstrapStage::HostPackages => {
                if !self.config.install_host_packages {
                    return Ok(StageStatus::Skipped("disabled".to_string()));
                }
                install_required_packages(self.config.arch)?;
                Ok(StageStatus::Done(format!(
                    "{} packages",
                    required_packages(self.config.arch).len()
                )))
            }
            BootstrapStage::NodeJs => match node::install(&self.layout, &self.config.node_url)? {
                NodeInstall::Existing(path) => Ok(StageStatus::Skipped(format!(
                    "already at {}",
                    path.display()
                ))),
                NodeInstall::Installed(path) => {
                    Ok(StageStatus::Done(format!("installed at {}", path.display())))
                }
            },
            BootstrapStage::Sources => {
                clone_all(&self.config)?;
                Ok(StageStatus::Done(format!(
                    "{} repositories",
                    Component::all().len()
                )))
            }
            _ => Ok(StageStatus::Skipped("nothing to do".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_bootstrap_rejects_unsupported_runtime() {
        let config = BootstrapConfig::new("7.0.20", "7.0.410", "/work");
        assert!(matches!(
            Bootstrap::new(config),
            Err(Error::UnsupportedVersion(v)) if v == "7.0.20"
        ));
    }

    #[test]
    fn test_run_stages_creates_layout() {
        let temp = tempfile::tempdir().unwrap();
        let config = BootstrapConfig::new("8.0.8", "8.0.108", temp.path()).with_host_packages(false);
        let bootstrap = Bootstrap::new(config).unwrap();

        let summary = bootstrap
            .run_stages(&[BootstrapStage::HostPackages])
            .unwrap();

        assert!(bootstrap.layout().packages_dir().is_dir());
        assert!(bootstrap.layout().output_dir().is_dir());
        assert_eq!(
            summary.records()[0].status,
            StageStatus::Skipped("disabled".to_string())
        );
    }

    #[test]
    fn test_patch_stage_honours_sentinel() {
        let temp = tempfile::tempdir().unwrap();
        let repo = temp.path().join("installer");
        std::fs::create_dir_all(&repo).unwrap();
        std::fs::write(repo.join(PATCHED_SENTINEL), "").unwrap();

        let config = BootstrapConfig::new("8.0.8", "8.0.108", temp.path());
        let bootstrap = Bootstrap::new(config).unwrap();
        let status = bootstrap.run_stage(BootstrapStage::PatchInstaller).unwrap();
        assert!(matches!(status, StageStatus::Skipped(_)));
    }
}
