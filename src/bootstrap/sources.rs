// src/bootstrap/sources.rs

//! Upstream repository checkouts

use super::component::Component;
use super::config::BootstrapConfig;
use super::process;
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// A repository to clone and the tag to check out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub component: Component,
    pub url: &'static str,
    pub tag: String,
    /// Clone directory
    pub path: PathBuf,
}

/// The four repositories at the tags matching `config`
pub fn repositories(config: &BootstrapConfig) -> Vec<Repository> {
    let layout = config.layout();
    Component::all()
        .iter()
        .map(|&component| Repository {
            component,
            url: component.repo_url(),
            tag: component.tag(config),
            path: layout.repo_dir(component),
        })
        .collect()
}

impl Repository {
    /// Clone when missing, then check out the tag and its submodules
    pub fn sync(&self, working_dir: &Path) -> Result<()> {
        if self.path.exists() {
            info!("{} already cloned at {}", self.component, self.path.display());
        } else {
            process::run(
                Command::new("git")
                    .args(["clone", self.url])
                    .current_dir(working_dir),
            )?;
        }

        process::run(
            Command::new("git")
                .args(["checkout", &self.tag])
                .current_dir(&self.path),
        )?;
        process::run(
            Command::new("git")
                .args(["submodule", "init"])
                .current_dir(&self.path),
        )?;
        process::run(
            Command::new("git")
                .args(["submodule", "update"])
                .current_dir(&self.path),
        )?;
        Ok(())
    }
}

/// Sync every repository in build order
pub fn clone_all(config: &BootstrapConfig) -> Result<()> {
    for repo in repositories(config) {
        info!("Syncing {} at {}", repo.component, repo.tag);
        repo.sync(&config.working_dir)?;
    }
    Ok(())
}
