// src/commands/mod.rs
//! Command handlers for the dotnet-bootstrap CLI

mod bootstrap;

pub use bootstrap::{cmd_artifacts, cmd_build_id, cmd_check, cmd_run};
