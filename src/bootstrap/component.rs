// src/bootstrap/component.rs

//! The four upstream repositories that make up a .NET bootstrap

use super::config::BootstrapConfig;
use serde::{Deserialize, Serialize};

/// A buildable upstream component
///
/// Each component is one git repository, cloned into a directory of the
/// same name under the working directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    /// dotnet/runtime
    Runtime,
    /// dotnet/sdk
    Sdk,
    /// dotnet/aspnetcore
    #[value(name = "aspnetcore")]
    AspNetCore,
    /// dotnet/installer
    Installer,
}

impl Component {
    /// All components in build order
    pub fn all() -> &'static [Component] {
        &[Self::Runtime, Self::Sdk, Self::AspNetCore, Self::Installer]
    }

    /// Repository and directory name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Runtime => "runtime",
            Self::Sdk => "sdk",
            Self::AspNetCore => "aspnetcore",
            Self::Installer => "installer",
        }
    }

    /// Git remote
    pub fn repo_url(&self) -> &'static str {
        match self {
            Self::Runtime => "https://github.com/dotnet/runtime",
            Self::Sdk => "https://github.com/dotnet/sdk",
            Self::AspNetCore => "https://github.com/dotnet/aspnetcore",
            Self::Installer => "https://github.com/dotnet/installer",
        }
    }

    /// Git tag to check out
    ///
    /// runtime and aspnetcore follow the runtime version; sdk and installer
    /// follow the SDK version.
    pub fn tag(&self, config: &BootstrapConfig) -> String {
        match self {
            Self::Runtime | Self::AspNetCore => format!("v{}", config.runtime_version),
            Self::Sdk | Self::Installer => format!("v{}", config.sdk_version),
        }
    }

    /// Where the build's package version is recorded
    ///
    /// Returns the repository holding `eng/Versions.props` and the tag to
    /// read. The installer has none: it is stamped with the runtime version.
    pub fn version_source(&self) -> Option<(Component, &'static str)> {
        match self {
            Self::Runtime => Some((Self::AspNetCore, "MicrosoftNETCorePlatformsVersion")),
            Self::Sdk => Some((Self::Installer, "MicrosoftNETSdkPackageVersion")),
            Self::AspNetCore => Some((
                Self::Installer,
                "MicrosoftAspNetCoreAppRefInternalPackageVersion",
            )),
            Self::Installer => None,
        }
    }

    /// Subdirectory of the download cache, before the version
    pub fn downloads_namespace(&self) -> Option<&'static str> {
        match self {
            Self::Runtime => Some("Runtime"),
            Self::Sdk => Some("Sdk"),
            Self::AspNetCore => Some("aspnetcore/Runtime"),
            Self::Installer => None,
        }
    }

    /// Placeholder in this component's patches and what replaces it
    pub fn patch_placeholder(&self) -> Option<PatchPlaceholder> {
        match self {
            Self::AspNetCore => Some(PatchPlaceholder::DownloadsDir),
            Self::Installer => Some(PatchPlaceholder::PackagesDir),
            Self::Runtime | Self::Sdk => None,
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Token substituted into patch files before they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchPlaceholder {
    /// `@@DOWNLOADS_DIR_PATH@@` -> absolute `local-downloads`
    DownloadsDir,
    /// `@@PACKAGES_DIR_PATH@@` -> absolute `local-packages`
    PackagesDir,
}

impl PatchPlaceholder {
    pub fn token(&self) -> &'static str {
        match self {
            Self::DownloadsDir => "@@DOWNLOADS_DIR_PATH@@",
            Self::PackagesDir => "@@PACKAGES_DIR_PATH@@",
        }
    }
}
