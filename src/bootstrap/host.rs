// src/bootstrap/host.rs

//! Build host preparation: apt packages and tool checks

use super::config::TargetArch;
use super::process;
use crate::error::Result;
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// Packages every bootstrap needs
pub const BASE_PACKAGES: &[&str] = &[
    "build-essential",
    "gettext",
    "locales",
    "cmake",
    "llvm",
    "clang",
    "lldb",
    "liblldb-dev",
    "libunwind-dev",
    "libicu-dev",
    "liblttng-ust-dev",
    "libssl-dev",
    "libkrb5-dev",
    "zlib1g-dev",
];

/// Extra packages for building a cross rootfs
pub const CROSS_PACKAGES: &[&str] = &["qemu", "qemu-user-static", "binfmt-support", "debootstrap"];

/// Full package list for an architecture
pub fn required_packages(arch: TargetArch) -> Vec<&'static str> {
    let mut packages = BASE_PACKAGES.to_vec();
    if arch.is_cross() {
        packages.extend_from_slice(CROSS_PACKAGES);
        packages.extend(arch.binutils_package());
    }
    packages
}

/// Update the host and install the build dependencies
pub fn install_required_packages(arch: TargetArch) -> Result<()> {
    let packages = required_packages(arch);
    info!("Installing {} host packages for {}", packages.len(), arch);

    process::run(Command::new("apt").arg("update"))?;
    process::run(Command::new("apt").args(["upgrade", "-y"]))?;
    process::run(Command::new("apt").args(["install", "-y"]).args(&packages))?;
    Ok(())
}

/// External tools the pipeline calls
#[derive(Debug)]
pub struct Prerequisites {
    pub apt: Option<PathBuf>,
    pub git: Option<PathBuf>,
    pub patch: Option<PathBuf>,
}

impl Prerequisites {
    /// Look the tools up on `PATH`
    pub fn check() -> Self {
        Self {
            apt: which::which("apt").ok(),
            git: which::which("git").ok(),
            patch: which::which("patch").ok(),
        }
    }

    /// Whether the pipeline can run without installing host packages
    pub fn all_present(&self) -> bool {
        self.missing().is_empty()
    }

    /// Names of tools that were not found
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.apt.is_none() {
            missing.push("apt");
        }
        if self.git.is_none() {
            missing.push("git");
        }
        if self.patch.is_none() {
            missing.push("patch");
        }
        missing
    }

    /// Tool name paired with where it was found
    pub fn entries(&self) -> [(&'static str, Option<&PathBuf>); 3] {
        [
            ("apt", self.apt.as_ref()),
            ("git", self.git.as_ref()),
            ("patch", self.patch.as_ref()),
        ]
    }
}
