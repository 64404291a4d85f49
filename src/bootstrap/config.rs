// src/bootstrap/config.rs

//! Bootstrap configuration types
//!
//! A [`BootstrapConfig`] is assembled once from the command line (optionally
//! layered over a TOML file) and handed by reference to every step. Nothing
//! mutates it after construction.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::layout::WorkspaceLayout;

/// Build configuration passed to every vendor build script
pub const CONFIGURATION: &str = "Release";

/// Default directory holding the `.patch` files
pub const DEFAULT_PATCHES_DIR: &str = "patches/dotnet8";

/// Node.js release used by the ASP.NET Core build
pub const DEFAULT_NODE_URL: &str =
    "https://nodejs.org/dist/v18.20.4/node-v18.20.4-linux-x64.tar.xz";

/// Target architecture for bootstrap
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TargetArch {
    /// x86_64 / AMD64
    #[default]
    #[value(name = "amd64")]
    Amd64,
    /// AArch64 / ARM64
    #[value(name = "arm64")]
    Arm64,
    /// IBM Z
    #[value(name = "s390x")]
    S390x,
    /// Little-endian POWER
    #[value(name = "ppc64le")]
    Ppc64le,
}

impl TargetArch {
    /// Name as understood by the vendor build scripts
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::S390x => "s390x",
            Self::Ppc64le => "ppc64le",
        }
    }

    /// Whether building for this arch needs a cross rootfs
    pub fn is_cross(&self) -> bool {
        !matches!(self, Self::Amd64)
    }

    /// Cross binutils package for this arch, if any
    pub fn binutils_package(&self) -> Option<&'static str> {
        match self {
            Self::Amd64 => None,
            Self::Arm64 => Some("binutils-aarch64-linux-gnu"),
            Self::S390x => Some("binutils-s390x-linux-gnu"),
            Self::Ppc64le => Some("binutils-powerpc64le-linux-gnu"),
        }
    }
}

impl std::fmt::Display for TargetArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional settings read from a TOML file
///
/// ```toml
/// arch = "arm64"
/// working_dir = "/srv/dotnet"
/// patches_dir = "patches/dotnet8"
/// node_url = "https://mirror.example/node-v18.20.4-linux-x64.tar.xz"
/// skip_host_packages = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub arch: Option<TargetArch>,
    pub working_dir: Option<PathBuf>,
    pub patches_dir: Option<PathBuf>,
    pub node_url: Option<String>,
    pub skip_host_packages: Option<bool>,
}

impl ConfigFile {
    /// Parse settings from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

/// Immutable bootstrap configuration
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Runtime (and ASP.NET Core) tag version, e.g. `8.0.8`
    pub runtime_version: String,

    /// SDK (and installer) tag version, e.g. `8.0.108`
    pub sdk_version: String,

    /// Target architecture
    pub arch: TargetArch,

    /// Absolute working directory holding clones and outputs
    pub working_dir: PathBuf,

    /// Directory holding `aspnetcore-*.patch` and `installer-*.patch`
    pub patches_dir: PathBuf,

    /// Node.js tarball URL
    pub node_url: String,

    /// Install OS packages with apt before building
    pub install_host_packages: bool,
}

impl BootstrapConfig {
    /// Create a config with default settings
    ///
    /// `working_dir` is expected to be absolute; see [`resolve_working_dir`].
    pub fn new(
        runtime_version: impl Into<String>,
        sdk_version: impl Into<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runtime_version: runtime_version.into(),
            sdk_version: sdk_version.into(),
            arch: TargetArch::default(),
            working_dir: working_dir.into(),
            patches_dir: PathBuf::from(DEFAULT_PATCHES_DIR),
            node_url: DEFAULT_NODE_URL.to_string(),
            install_host_packages: true,
        }
    }

    /// Set the target architecture
    pub fn with_arch(mut self, arch: TargetArch) -> Self {
        self.arch = arch;
        self
    }

    /// Set the patches directory
    pub fn with_patches_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.patches_dir = path.into();
        self
    }

    /// Set the Node.js download URL
    pub fn with_node_url(mut self, url: impl Into<String>) -> Self {
        self.node_url = url.into();
        self
    }

    /// Enable or disable apt package installation
    pub fn with_host_packages(mut self, install: bool) -> Self {
        self.install_host_packages = install;
        self
    }

    /// Directory layout under the working directory
    pub fn layout(&self) -> WorkspaceLayout {
        WorkspaceLayout::new(&self.working_dir)
    }

    /// Fail unless the runtime version can be bootstrapped
    pub fn ensure_supported(&self) -> Result<()> {
        ensure_supported_runtime(&self.runtime_version)
    }
}

/// Fail unless `runtime_version` is a 8.x version
///
/// Callers check this before creating anything on disk.
pub fn ensure_supported_runtime(runtime_version: &str) -> Result<()> {
    match runtime_version.split('.').next() {
        Some("8") => Ok(()),
        _ => Err(Error::UnsupportedVersion(runtime_version.to_string())),
    }
}

/// Resolve the working directory
///
/// With no path a fresh temporary directory is created and kept. A given
/// path is made absolute and created when missing.
pub fn resolve_working_dir(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        None => {
            let dir = tempfile::Builder::new()
                .prefix("dotnet-bootstrap-")
                .tempdir()?;
            Ok(dir.keep())
        }
        Some(path) => {
            let absolute = std::path::absolute(path)?;
            std::fs::create_dir_all(&absolute)?;
            Ok(absolute)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_arch_cross() {
        assert!(!TargetArch::Amd64.is_cross());
        assert!(TargetArch::Arm64.is_cross());
        assert_eq!(TargetArch::Amd64.binutils_package(), None);
        assert_eq!(
            TargetArch::Ppc64le.binutils_package(),
            Some("binutils-powerpc64le-linux-gnu")
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = BootstrapConfig::new("8.0.8", "8.0.108", "/work");
        assert_eq!(config.arch, TargetArch::Amd64);
        assert_eq!(config.patches_dir, PathBuf::from(DEFAULT_PATCHES_DIR));
        assert_eq!(config.node_url, DEFAULT_NODE_URL);
        assert!(config.install_host_packages);
    }

    #[test]
    fn test_config_builder() {
        let config = BootstrapConfig::new("8.0.8", "8.0.108", "/work")
            .with_arch(TargetArch::S390x)
            .with_patches_dir("/patches")
            .with_node_url("file:///node.tar.xz")
            .with_host_packages(false);

        assert_eq!(config.arch, TargetArch::S390x);
        assert_eq!(config.patches_dir, PathBuf::from("/patches"));
        assert_eq!(config.node_url, "file:///node.tar.xz");
        assert!(!config.install_host_packages);
    }

    #[test]
    fn test_supported_versions() {
        assert!(BootstrapConfig::new("8.0.8", "8.0.108", "/w").ensure_supported().is_ok());
        assert!(matches!(
            BootstrapConfig::new("9.0.0", "9.0.100", "/w").ensure_supported(),
            Err(Error::UnsupportedVersion(_))
        ));
        assert!(BootstrapConfig::new("", "8.0.108", "/w").ensure_supported().is_err());
        assert!(ensure_supported_runtime("8").is_ok());
        assert!(ensure_supported_runtime("80.0.1").is_err());
    }

    #[test]
    fn test_config_file_parse() {
        let file = ConfigFile::parse(
            r#"
            arch = "ppc64le"
            working_dir = "/srv/dotnet"
            skip_host_packages = true
            "#,
        )
        .unwrap();

        assert_eq!(file.arch, Some(TargetArch::Ppc64le));
        assert_eq!(file.working_dir, Some(PathBuf::from("/srv/dotnet")));
        assert_eq!(file.skip_host_packages, Some(true));
        assert_eq!(file.node_url, None);
    }

    #[test]
    fn test_config_file_rejects_unknown_keys() {
        assert!(matches!(
            ConfigFile::parse("jobs = 4"),
            Err(Error::ConfigError(_))
        ));
        assert!(ConfigFile::parse("arch = \"riscv64\"").is_err());
    }

    #[test]
    fn test_resolve_working_dir_creates_missing() {
        let temp = tempfile::tempdir().unwrap();
        let target = temp.path().join("nested/work");
        let resolved = resolve_working_dir(Some(&target)).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());
    }

    #[test]
    fn test_resolve_working_dir_temporary() {
        let resolved = resolve_working_dir(None).unwrap();
        assert!(resolved.is_dir());
        std::fs::remove_dir_all(&resolved).unwrap();
    }
}
