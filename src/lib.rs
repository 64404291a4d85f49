// src/lib.rs

//! dotnet-bootstrap
//!
//! Builds a .NET 8 SDK from the upstream runtime, sdk, aspnetcore and
//! installer repositories, without relying on prebuilt Microsoft binaries
//! for the target architecture.
//!
//! # Architecture
//!
//! - `version`: build identifier derivation from package versions
//! - `bootstrap`: the pipeline (host packages, Node.js, sources, patches,
//!   component builds, artifact routing)

pub mod bootstrap;
mod error;
pub mod version;

pub use error::{Error, Result};
pub use version::{FALLBACK_BUILD_ID, derive_build_id};
