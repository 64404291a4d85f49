// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

const ARCHES: [&str; 4] = ["amd64", "arm64", "s390x", "ppc64le"];

/// Common argument: target architecture
fn arch_arg() -> Arg {
    Arg::new("arch")
        .short('a')
        .long("arch")
        .value_parser(ARCHES)
        .help("Target architecture")
}

/// Common argument: working directory
fn working_dir_arg() -> Arg {
    Arg::new("working_dir")
        .short('w')
        .long("working-dir")
        .value_name("DIR")
        .help("Working directory")
}

fn build_cli() -> Command {
    Command::new("dotnet-bootstrap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bootstrap a .NET SDK from source for a target architecture")
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Clone, patch and build runtime, sdk, aspnetcore and installer")
                .arg(Arg::new("runtime").long("runtime").required(true).help("Runtime version"))
                .arg(Arg::new("sdk").long("sdk").required(true).help("SDK version"))
                .arg(arch_arg())
                .arg(working_dir_arg())
                .arg(
                    Arg::new("patches_dir")
                        .short('p')
                        .long("patches-dir")
                        .value_name("DIR")
                        .help("Directory holding aspnetcore-*.patch and installer-*.patch"),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("FILE")
                        .help("TOML file with default options"),
                )
                .arg(
                    Arg::new("skip_host_packages")
                        .long("skip-host-packages")
                        .action(ArgAction::SetTrue)
                        .help("Do not run apt"),
                ),
        )
        .subcommand(
            Command::new("build-id")
                .about("Print the OfficialBuildId derived from a package version")
                .arg(Arg::new("version").required(true).help("Package version")),
        )
        .subcommand(
            Command::new("artifacts")
                .about("Show artifact patterns and destinations for one component")
                .arg(
                    Arg::new("component")
                        .long("component")
                        .required(true)
                        .value_parser(["runtime", "sdk", "aspnetcore", "installer"]),
                )
                .arg(Arg::new("version").long("version").required(true))
                .arg(arch_arg())
                .arg(working_dir_arg()),
        )
        .subcommand(Command::new("check").about("Check that apt, git and patch are available"))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("dotnet-bootstrap.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
