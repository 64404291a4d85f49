// src/bootstrap/metadata.rs

//! Version lookup in upstream `eng/Versions.props` files
//!
//! The files are MSBuild XML, but a line scan is all that is needed: the
//! first line holding a complete `<Tag>value</Tag>` wins.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;

/// Relative path of the versions file inside a clone
pub const VERSIONS_PROPS: &str = "eng/Versions.props";

/// Value of the first `<tag>...</tag>` in `content`
pub fn find_xml_tag(content: &str, tag: &str) -> Option<String> {
    let pattern = format!("<{0}>(.*?)</{0}>", regex::escape(tag));
    let re = Regex::new(&pattern).ok()?;

    content
        .lines()
        .find_map(|line| re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Read a tag value from a file, failing when it is absent
pub fn require_xml_tag(path: &Path, tag: &str) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;

    find_xml_tag(&content, tag).ok_or_else(|| Error::MissingTag {
        tag: tag.to_string(),
        path: path.display().to_string(),
    })
}
