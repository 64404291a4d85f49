// tests/common/mod.rs

//! Shared helpers for integration tests.
//!
//! Builds a working directory that looks like a finished clone step: the
//! four repositories with `Versions.props` files and stand-in build scripts
//! that drop artifacts where the real upstream builds would.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

pub const RUNTIME_PACKAGE_VERSION: &str = "8.0.8-servicing.24366.12";
pub const SDK_PACKAGE_VERSION: &str = "8.0.108-servicing.24367.4";
pub const ASPNETCORE_PACKAGE_VERSION: &str = "8.0.8-servicing.24366.14";

/// Write an executable shell script
pub fn write_script(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("#!/bin/sh\nset -e\n{}", body)).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Script body that records its arguments and creates `files`
fn recording_script(files: &[&str]) -> String {
    let mut body = String::from("echo \"$@\" > build.args\n");
    for file in files {
        body.push_str(&format!("mkdir -p \"$(dirname '{0}')\"\ntouch '{0}'\n", file));
    }
    body
}

/// Versions.props for the aspnetcore clone
pub fn aspnetcore_props() -> String {
    format!(
        "<Project>\n  <PropertyGroup>\n    <MicrosoftNETCorePlatformsVersion>{}</MicrosoftNETCorePlatformsVersion>\n  </PropertyGroup>\n</Project>\n",
        RUNTIME_PACKAGE_VERSION
    )
}

/// Versions.props for the installer clone
pub fn installer_props() -> String {
    format!(
        "<Project>\n  <PropertyGroup>\n    <MicrosoftNETSdkPackageVersion>{}</MicrosoftNETSdkPackageVersion>\n    <MicrosoftAspNetCoreAppRefInternalPackageVersion>{}</MicrosoftAspNetCoreAppRefInternalPackageVersion>\n  </PropertyGroup>\n</Project>\n",
        SDK_PACKAGE_VERSION, ASPNETCORE_PACKAGE_VERSION
    )
}

/// A working directory with four fake clones and a fake Node.js
pub fn fake_workspace() -> TempDir {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();

    let runtime = root.join("runtime");
    write_script(
        &runtime.join("build.sh"),
        &format!(
            "echo \"$ROOTFS_DIR\" > rootfs.env\n{}",
            recording_script(&[
                "artifacts/packages/Release/Shipping/Microsoft.NETCore.App.Runtime.linux-amd64.8.0.8.nupkg",
                "artifacts/packages/Release/Shipping/Microsoft.NETCore.App.Host.linux-amd64.8.0.8.nupkg",
                "artifacts/packages/Release/Shipping/dotnet-runtime-8.0.8-linux-amd64.tar.gz",
                "artifacts/packages/Release/NonShipping/runtime.linux-amd64.Microsoft.NETCore.ILAsm.8.0.8.nupkg",
            ])
        ),
    );

    let sdk = root.join("sdk");
    write_script(
        &sdk.join("build.sh"),
        &recording_script(&[
            "artifacts/packages/Release/Shipping/Microsoft.DotNet.Common.ItemTemplates.8.0.108.nupkg",
            "artifacts/packages/Release/NonShipping/dotnet-toolset-internal-8.0.108.zip",
        ]),
    );

    let aspnetcore = root.join("aspnetcore");
    fs::create_dir_all(aspnetcore.join("eng")).unwrap();
    fs::write(aspnetcore.join("eng/Versions.props"), aspnetcore_props()).unwrap();
    write_script(
        &aspnetcore.join("eng/build.sh"),
        &recording_script(&[
            "artifacts/packages/Release/Shipping/Microsoft.AspNetCore.App.Runtime.linux-amd64.8.0.8.nupkg",
            "artifacts/installers/Release/aspnetcore-runtime-8.0.8-linux-amd64.tar.gz",
            "artifacts/installers/Release/aspnetcore_base_runtime.version",
        ]),
    );

    let installer = root.join("installer");
    fs::create_dir_all(installer.join("eng")).unwrap();
    fs::write(installer.join("eng/Versions.props"), installer_props()).unwrap();
    write_script(
        &installer.join("build.sh"),
        &recording_script(&["artifacts/packages/Release/Shipping/dotnet-sdk-8.0.108-linux-amd64.tar.gz"]),
    );

    write_script(&root.join("node/bin/node"), "echo v18.20.4\n");

    temp
}

/// Names of the files directly inside `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
