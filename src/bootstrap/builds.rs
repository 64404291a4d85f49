// src/bootstrap/builds.rs

//! Component builds
//!
//! Each component is built by its own upstream script. The invocation is
//! captured in a [`BuildPlan`] so it can be inspected before anything runs.

use super::artifacts::{ArtifactPlan, CopyReport};
use super::component::Component;
use super::config::{BootstrapConfig, CONFIGURATION, TargetArch};
use super::layout::WorkspaceLayout;
use super::metadata::{VERSIONS_PROPS, require_xml_tag};
use super::process;
use crate::error::{Error, Result};
use crate::version::derive_build_id;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Ubuntu release the cross rootfs is built from
pub const ROOTFS_DISTRO: &str = "bionic";

/// Runtime identifier of the build host
pub const HOST_RID: &str = "linux-x64";

/// A resolved build invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub component: Component,
    /// Package version the build produces
    pub version: String,
    /// `OfficialBuildId` derived from the version
    pub build_id: String,
    /// Directory the script runs in
    pub cwd: PathBuf,
    /// Script path relative to `cwd`
    pub script: String,
    pub args: Vec<String>,
    /// Extra environment
    pub env: Vec<(String, OsString)>,
}

impl BuildPlan {
    /// Command ready to run
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.cwd.join(&self.script));
        cmd.args(&self.args).current_dir(&self.cwd);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Version a component's build will produce
///
/// Read from the `Versions.props` of the repository that consumes the
/// build; the installer takes the runtime version.
pub fn resolve_version(config: &BootstrapConfig, component: Component) -> Result<String> {
    match component.version_source() {
        Some((repo, tag)) => {
            let props = config.layout().repo_dir(repo).join(VERSIONS_PROPS);
            require_xml_tag(&props, tag)
        }
        None => Ok(config.runtime_version.clone()),
    }
}

/// Cross rootfs used by the runtime build
pub fn rootfs_dir(layout: &WorkspaceLayout, arch: TargetArch) -> PathBuf {
    if arch.is_cross() {
        layout
            .repo_dir(Component::Runtime)
            .join(".tools")
            .join("rootfs")
            .join(arch.as_str())
    } else {
        PathBuf::from("/")
    }
}

/// PATH with the bundled Node.js appended
fn node_path(layout: &WorkspaceLayout) -> OsString {
    let mut path = std::env::var_os("PATH").unwrap_or_default();
    path.push(":");
    path.push(layout.node_dir().join("bin"));
    path
}

/// Build invocation for `component` producing `version`
pub fn build_plan(config: &BootstrapConfig, component: Component, version: &str) -> Result<BuildPlan> {
    let layout = config.layout();
    let build_id = derive_build_id(version)?;
    let arch = config.arch.as_str().to_string();
    let official = format!("/p:OfficialBuildId={}", build_id);

    let owned = |args: &[&str]| -> Vec<String> { args.iter().map(|s| s.to_string()).collect() };

    let (script, args, env) = match component {
        Component::Runtime => (
            "./build.sh",
            owned(&["--ci", "-c", CONFIGURATION, "-arch", &arch, "-cross", "-clang", &official]),
            vec![(
                "ROOTFS_DIR".to_string(),
                rootfs_dir(&layout, config.arch).into_os_string(),
            )],
        ),
        Component::Sdk => (
            "./build.sh",
            owned(&[
                "--pack",
                "--ci",
                "-c",
                CONFIGURATION,
                &format!("/p:Architecture={}", arch),
                &official,
            ]),
            Vec::new(),
        ),
        Component::AspNetCore => (
            "./eng/build.sh",
            owned(&["--pack", "--ci", "-c", CONFIGURATION, "-arch", &arch, &official]),
            vec![("PATH".to_string(), node_path(&layout))],
        ),
        Component::Installer => (
            "./build.sh",
            owned(&[
                "--ci",
                "-c",
                CONFIGURATION,
                "-a",
                &arch,
                &official,
                &format!("/p:HostRid={}", HOST_RID),
                &format!(
                    "/p:PublicBaseURL=file://{}/",
                    layout.downloads_dir().display()
                ),
            ]),
            Vec::new(),
        ),
    };

    Ok(BuildPlan {
        component,
        version: version.to_string(),
        build_id,
        cwd: layout.repo_dir(component),
        script: script.to_string(),
        args,
        env,
    })
}

/// Build the cross rootfs unless it already exists
fn ensure_rootfs(layout: &WorkspaceLayout, arch: TargetArch) -> Result<()> {
    let rootfs = rootfs_dir(layout, arch);
    if rootfs.exists() {
        return Ok(());
    }

    info!("Building {} rootfs at {}", arch, rootfs.display());
    let runtime = layout.repo_dir(Component::Runtime);
    process::run(
        Command::new(runtime.join("eng/common/cross/build-rootfs.sh"))
            .args([arch.as_str(), ROOTFS_DISTRO])
            .current_dir(&runtime),
    )
}

/// Check the bundled Node.js runs with the given PATH
fn check_node(path: &OsString) -> Result<String> {
    let version = process::capture(Command::new("node").arg("--version").env("PATH", path))?;
    let version = version.trim().to_string();
    info!("Using Node.js {}", version);
    Ok(version)
}

/// Run one component build and collect its artifacts
pub fn build_component(config: &BootstrapConfig, component: Component) -> Result<CopyReport> {
    let version = resolve_version(config, component)?;
    let plan = build_plan(config, component, &version)?;
    info!(
        "Building {} {} (OfficialBuildId={})",
        component, plan.version, plan.build_id
    );

    let artifacts = ArtifactPlan::new(&config.working_dir, component, config.arch, &version);
    if component.downloads_namespace().is_some() {
        artifacts.prepare_downloads()?;
    }

    match component {
        Component::Runtime if config.arch.is_cross() => {
            ensure_rootfs(&config.layout(), config.arch)?;
        }
        Component::AspNetCore => {
            let path = plan
                .env
                .iter()
                .find(|(key, _)| key == "PATH")
                .map(|(_, value)| value.clone())
                .unwrap_or_default();
            check_node(&path)?;
        }
        _ => {}
    }

    ensure_script(&plan.cwd, &plan.script)?;
    process::run(&mut plan.command())?;
    artifacts.collect()
}

fn ensure_script(cwd: &Path, script: &str) -> Result<()> {
    if cwd.join(script).exists() {
        Ok(())
    } else {
        Err(Error::ToolLaunch {
            tool: script.to_string(),
            reason: format!("not found in {}", cwd.display()),
        })
    }
}
