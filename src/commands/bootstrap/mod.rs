// src/commands/bootstrap/mod.rs

//! Bootstrap command implementations

use crate::cli::{ArtifactsArgs, RunArgs};
use anyhow::{Context, Result};
use dotnet_bootstrap::bootstrap::{
    ArtifactPlan, Bootstrap, BootstrapConfig, ConfigFile, DEFAULT_PATCHES_DIR, Prerequisites,
    StageStatus, TargetArch, ensure_supported_runtime, resolve_working_dir,
};
use dotnet_bootstrap::derive_build_id;
use std::path::PathBuf;

/// Merge CLI arguments over an optional config file
pub fn resolve_config(args: &RunArgs) -> Result<BootstrapConfig> {
    let file = match &args.config {
        Some(path) => ConfigFile::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConfigFile::default(),
    };

    // Nothing touches the disk for a version we cannot build
    ensure_supported_runtime(&args.runtime)?;

    let working_dir: Option<PathBuf> = args.working_dir.clone().or(file.working_dir);
    let working_dir =
        resolve_working_dir(working_dir.as_deref()).context("Failed to prepare working directory")?;

    let mut config = BootstrapConfig::new(&args.runtime, &args.sdk, working_dir)
        .with_arch(args.arch.or(file.arch).unwrap_or_default())
        .with_host_packages(!(args.skip_host_packages || file.skip_host_packages.unwrap_or(false)));

    let patches_dir = args
        .patches_dir
        .clone()
        .or(file.patches_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PATCHES_DIR));
    let patches_dir = std::path::absolute(&patches_dir)
        .with_context(|| format!("Invalid patches directory {}", patches_dir.display()))?;
    config = config.with_patches_dir(patches_dir);

    if let Some(url) = file.node_url {
        config = config.with_node_url(url);
    }

    Ok(config)
}

/// Run the full pipeline
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    println!("Welcome to the .NET bootstrap");
    println!("  Runtime: {}", config.runtime_version);
    println!("  SDK: {}", config.sdk_version);
    println!("  Architecture: {}", config.arch);
    println!("  Working directory: {}", config.working_dir.display());
    println!();

    let bootstrap = Bootstrap::new(config)?;
    let summary = bootstrap.run().context("Bootstrap failed")?;

    println!("\nBootstrap complete:");
    for record in summary.records() {
        let (tag, detail) = match &record.status {
            StageStatus::Done(d) => ("[OK]", d),
            StageStatus::Skipped(d) => ("[SKIP]", d),
        };
        println!(
            "  {} {}: {} ({:.0}s)",
            tag,
            record.stage,
            detail,
            record.duration.as_secs_f64()
        );
    }
    println!(
        "\nTotal: {:.0}s",
        summary.total_duration().as_secs_f64()
    );
    println!(
        "Output: {}",
        bootstrap.layout().output_dir().display()
    );
    Ok(())
}

/// Print the build id for a version
pub fn cmd_build_id(version: &str) -> Result<()> {
    let id = derive_build_id(version)?;
    println!("{}", id);
    Ok(())
}

/// Print the artifact plan for one component
pub fn cmd_artifacts(args: ArtifactsArgs) -> Result<()> {
    let working_dir = std::path::absolute(&args.working_dir)?;
    let plan = ArtifactPlan::new(&working_dir, args.component, args.arch, &args.version);
    print!("{}", render_plan(&plan, args.arch));
    Ok(())
}

fn render_plan(plan: &ArtifactPlan, arch: TargetArch) -> String {
    let mut out = format!("{} {} ({})\n", plan.component(), plan.version(), arch);
    out.push_str(&format!("  Source: {}\n", plan.source_root().display()));
    for group in plan.groups() {
        out.push_str(&format!(
            "\n  {} -> {}\n",
            group.role,
            group.destination.display()
        ));
        for pattern in plan.relative_patterns(group.role) {
            out.push_str(&format!("    {}\n", pattern));
        }
    }
    out
}

/// Check prerequisites
pub fn cmd_check() -> Result<()> {
    println!("Checking bootstrap prerequisites...\n");

    let prereqs = Prerequisites::check();
    for (name, found) in prereqs.entries() {
        match found {
            Some(path) => println!("  [OK] {}: {}", name, path.display()),
            None => println!("  [MISSING] {}: not found", name),
        }
    }

    if prereqs.all_present() {
        println!("\nAll prerequisites found.");
        Ok(())
    } else {
        anyhow::bail!("Missing prerequisites: {}", prereqs.missing().join(", "))
    }
}
