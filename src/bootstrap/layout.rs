// src/bootstrap/layout.rs

//! Directory layout under the bootstrap working directory
//!
//! ```text
//! <working-dir>/
//!   local-packages/    flat NuGet feed consumed by later builds
//!   local-downloads/   archives namespaced by component and version
//!   output/            final installable archives
//!   node/              extracted Node.js
//!   runtime/ sdk/ aspnetcore/ installer/   repository clones
//! ```

use super::component::Component;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PACKAGES_DIR: &str = "local-packages";
pub const DOWNLOADS_DIR: &str = "local-downloads";
pub const OUTPUT_DIR: &str = "output";
pub const NODE_DIR: &str = "node";

/// Paths derived from the working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Flat package feed
    pub fn packages_dir(&self) -> PathBuf {
        self.root.join(PACKAGES_DIR)
    }

    /// Download cache root
    pub fn downloads_dir(&self) -> PathBuf {
        self.root.join(DOWNLOADS_DIR)
    }

    /// Final output directory
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// Extracted Node.js
    pub fn node_dir(&self) -> PathBuf {
        self.root.join(NODE_DIR)
    }

    /// Clone directory of a component's repository
    pub fn repo_dir(&self, component: Component) -> PathBuf {
        self.root.join(component.name())
    }

    /// Create the packages, downloads and output directories
    pub fn create(&self) -> std::io::Result<()> {
        for dir in [self.packages_dir(), self.downloads_dir(), self.output_dir()] {
            debug!("Ensuring directory {}", dir.display());
            std::fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = WorkspaceLayout::new("/work");
        assert_eq!(layout.packages_dir(), PathBuf::from("/work/local-packages"));
        assert_eq!(layout.downloads_dir(), PathBuf::from("/work/local-downloads"));
        assert_eq!(layout.output_dir(), PathBuf::from("/work/output"));
        assert_eq!(layout.node_dir(), PathBuf::from("/work/node"));
        assert_eq!(
            layout.repo_dir(Component::AspNetCore),
            PathBuf::from("/work/aspnetcore")
        );
    }

    #[test]
    fn test_layout_create() {
        let temp = tempfile::tempdir().unwrap();
        let layout = WorkspaceLayout::new(temp.path());
        layout.create().unwrap();
        // Idempotent
        layout.create().unwrap();

        assert!(layout.packages_dir().is_dir());
        assert!(layout.downloads_dir().is_dir());
        assert!(layout.output_dir().is_dir());
        assert!(!layout.node_dir().exists());
    }
}
