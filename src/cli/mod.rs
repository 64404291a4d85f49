// src/cli/mod.rs
//! CLI definitions for dotnet-bootstrap
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `run` - Full bootstrap pipeline
//! - `build-id` - Print the OfficialBuildId for a version
//! - `artifacts` - Show where a component's artifacts are collected from and to
//! - `check` - Look for the external tools the pipeline needs

use clap::{Parser, Subcommand};

mod bootstrap;

pub use bootstrap::{ArtifactsArgs, RunArgs};

#[derive(Parser)]
#[command(name = "dotnet-bootstrap")]
#[command(version)]
#[command(about = "Bootstrap a .NET SDK from source for a target architecture", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone, patch and build runtime, sdk, aspnetcore and installer
    Run(RunArgs),

    /// Print the OfficialBuildId derived from a package version
    BuildId {
        /// Package version, e.g. 8.0.100-rc.2.23479.6
        version: String,
    },

    /// Show artifact patterns and destinations for one component
    Artifacts(ArtifactsArgs),

    /// Check that apt, git and patch are available
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dotnet_bootstrap::bootstrap::{Component, TargetArch};

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "dotnet-bootstrap",
            "run",
            "--runtime",
            "8.0.8",
            "--sdk",
            "8.0.108",
            "--arch",
            "arm64",
            "--skip-host-packages",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.runtime, "8.0.8");
                assert_eq!(args.sdk, "8.0.108");
                assert_eq!(args.arch, Some(TargetArch::Arm64));
                assert!(args.skip_host_packages);
                assert!(args.working_dir.is_none());
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_artifacts() {
        let cli = Cli::parse_from([
            "dotnet-bootstrap",
            "artifacts",
            "--component",
            "aspnetcore",
            "--version",
            "8.0.8",
        ]);
        match cli.command {
            Commands::Artifacts(args) => {
                assert_eq!(args.component, Component::AspNetCore);
                assert_eq!(args.arch, TargetArch::Amd64);
            }
            _ => panic!("expected artifacts"),
        }
    }

    #[test]
    fn test_run_requires_versions() {
        assert!(Cli::try_parse_from(["dotnet-bootstrap", "run", "--runtime", "8.0.8"]).is_err());
        assert!(
            Cli::try_parse_from(["dotnet-bootstrap", "run", "--runtime", "8", "--sdk", "8", "--arch", "riscv64"])
                .is_err()
        );
    }
}
