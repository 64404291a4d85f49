// src/bootstrap/stages.rs

//! Pipeline stages and per-run bookkeeping
//!
//! Stages always run in the order of [`BootstrapStage::all`]. Nothing is
//! persisted between runs; resuming relies on what earlier runs left on
//! disk (existing clones, `node/`, patch sentinels).

use super::component::Component;
use std::time::Duration;

/// Bootstrap stages in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BootstrapStage {
    /// apt update/upgrade/install
    HostPackages,
    /// Node.js download for the ASP.NET Core build
    NodeJs,
    /// Clone and check out all repositories
    Sources,
    /// Build dotnet/runtime
    Runtime,
    /// Build dotnet/sdk
    Sdk,
    /// Apply local patches to aspnetcore
    PatchAspNetCore,
    /// Build dotnet/aspnetcore
    AspNetCore,
    /// Apply local patches to installer
    PatchInstaller,
    /// Build dotnet/installer
    Installer,
}

impl BootstrapStage {
    /// Get all stages in order
    pub fn all() -> &'static [BootstrapStage] {
        &[
            Self::HostPackages,
            Self::NodeJs,
            Self::Sources,
            Self::Runtime,
            Self::Sdk,
            Self::PatchAspNetCore,
            Self::AspNetCore,
            Self::PatchInstaller,
            Self::Installer,
        ]
    }

    /// Get a human-readable name for the stage
    pub fn name(&self) -> &'static str {
        match self {
            Self::HostPackages => "Host packages",
            Self::NodeJs => "Node.js",
            Self::Sources => "Sources",
            Self::Runtime => "Build runtime",
            Self::Sdk => "Build sdk",
            Self::PatchAspNetCore => "Patch aspnetcore",
            Self::AspNetCore => "Build aspnetcore",
            Self::PatchInstaller => "Patch installer",
            Self::Installer => "Build installer",
        }
    }

    /// Component this stage builds, if it is a build stage
    pub fn builds(&self) -> Option<Component> {
        match self {
            Self::Runtime => Some(Component::Runtime),
            Self::Sdk => Some(Component::Sdk),
            Self::AspNetCore => Some(Component::AspNetCore),
            Self::Installer => Some(Component::Installer),
            _ => None,
        }
    }

    /// Component this stage patches, if it is a patch stage
    pub fn patches(&self) -> Option<Component> {
        match self {
            Self::PatchAspNetCore => Some(Component::AspNetCore),
            Self::PatchInstaller => Some(Component::Installer),
            _ => None,
        }
    }
}

impl std::fmt::Display for BootstrapStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a stage ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    /// Did its work
    Done(String),
    /// Nothing to do
    Skipped(String),
}

/// One finished stage
#[derive(Debug, Clone)]
pub struct StageRecord {
    pub stage: BootstrapStage,
    pub status: StageStatus,
    pub duration: Duration,
}

/// Stages completed by a run, in order
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    records: Vec<StageRecord>,
}

impl RunSummary {
    pub fn record(&mut self, stage: BootstrapStage, status: StageStatus, duration: Duration) {
        self.records.push(StageRecord {
            stage,
            status,
            duration,
        });
    }

    pub fn records(&self) -> &[StageRecord] {
        &self.records
    }

    /// Last stage that finished
    pub fn last_stage(&self) -> Option<BootstrapStage> {
        self.records.last().map(|r| r.stage)
    }

    pub fn total_duration(&self) -> Duration {
        self.records.iter().map(|r| r.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ordering() {
        assert!(BootstrapStage::HostPackages < BootstrapStage::NodeJs);
        assert!(BootstrapStage::Sources < BootstrapStage::Runtime);
        assert!(BootstrapStage::PatchAspNetCore < BootstrapStage::AspNetCore);
        assert!(BootstrapStage::PatchInstaller < BootstrapStage::Installer);
    }

    #[test]
    fn test_all_is_sorted() {
        let all = BootstrapStage::all();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_build_and_patch_components() {
        let built: Vec<_> = BootstrapStage::all()
            .iter()
            .filter_map(|s| s.builds())
            .collect();
        assert_eq!(built, Component::all());

        assert_eq!(
            BootstrapStage::PatchInstaller.patches(),
            Some(Component::Installer)
        );
        assert_eq!(BootstrapStage::Installer.patches(), None);
    }

    #[test]
    fn test_run_summary() {
        let mut summary = RunSummary::default();
        assert_eq!(summary.last_stage(), None);

        summary.record(
            BootstrapStage::HostPackages,
            StageStatus::Skipped("disabled".into()),
            Duration::from_secs(0),
        );
        summary.record(
            BootstrapStage::NodeJs,
            StageStatus::Done("installed".into()),
            Duration::from_secs(3),
        );

        assert_eq!(summary.records().len(), 2);
        assert_eq!(summary.last_stage(), Some(BootstrapStage::NodeJs));
        assert_eq!(summary.total_duration(), Duration::from_secs(3));
    }
}
