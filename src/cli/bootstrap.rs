// src/cli/bootstrap.rs

//! Arguments for the bootstrap commands

use clap::Args;
use dotnet_bootstrap::bootstrap::{Component, TargetArch};
use std::path::PathBuf;

/// Arguments for `run`
///
/// `--arch`, `--working-dir` and `--patches-dir` override the same keys
/// from `--config`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Runtime version to bootstrap (tag v<VERSION> of runtime and aspnetcore)
    #[arg(long)]
    pub runtime: String,

    /// SDK version to bootstrap (tag v<VERSION> of sdk and installer)
    #[arg(long)]
    pub sdk: String,

    /// Target architecture [default: amd64]
    #[arg(short, long, value_enum)]
    pub arch: Option<TargetArch>,

    /// Working directory (a fresh temporary directory when omitted)
    #[arg(short, long)]
    pub working_dir: Option<PathBuf>,

    /// Directory holding aspnetcore-*.patch and installer-*.patch
    #[arg(short, long)]
    pub patches_dir: Option<PathBuf>,

    /// TOML file with defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not run apt
    #[arg(long)]
    pub skip_host_packages: bool,
}

/// Arguments for `artifacts`
#[derive(Args, Debug)]
pub struct ArtifactsArgs {
    /// Component to describe
    #[arg(long, value_enum)]
    pub component: Component,

    /// Package version the component builds
    #[arg(long)]
    pub version: String,

    /// Target architecture
    #[arg(short, long, value_enum, default_value_t = TargetArch::Amd64)]
    pub arch: TargetArch,

    /// Working directory the plan is rooted at
    #[arg(short, long, default_value = ".")]
    pub working_dir: PathBuf,
}
