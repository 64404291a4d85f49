// src/version/mod.rs

//! Build identifier derivation for .NET package versions
//!
//! Upstream pre-release versions end in `<short-date>.<revision>`, e.g.
//! `8.0.100-rc.2.23479.6`. The short date packs a date as
//! `yy * 1000 + mm * 50 + dd`, and vendor build scripts expect it unpacked
//! as `OfficialBuildId=20yyMMdd.<revision>`.
//!
//! The unpacked digits are not checked against the calendar. Downstream
//! tooling consumes whatever the packing produced.

use crate::error::{Error, Result};
use std::fmt;

/// Build id used when a version carries no pre-release suffix
///
/// Downstream tooling accepts this dummy stamp when no official build id
/// is known.
pub const FALLBACK_BUILD_ID: &str = "20200101.1";

/// A date unpacked from the short-date encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortDate {
    /// Two-digit year offset from 2000
    pub year: u64,
    pub month: u64,
    pub day: u64,
}

impl ShortDate {
    /// Unpack a short date
    ///
    /// `23479` decodes to year 23, month 9, day 29.
    pub fn decode(packed: u64) -> Self {
        let year = packed / 1000;
        let month = (packed - 1000 * year) / 50;
        let day = packed - 1000 * year - 50 * month;
        Self { year, month, day }
    }
}

impl fmt::Display for ShortDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "20{:02}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// Derive the `OfficialBuildId` for a package version
///
/// - `8.0.100` -> `20200101.1` (no suffix)
/// - `8.0.100-rc.2.23479.6` -> `20230929.6`
/// - `8.0.100-ci.479.1` -> `20000929.1`
///
/// The short date must be a decimal that fits in a `u64`. Longer digit
/// runs, like a non-numeric short date, are [`Error::VersionFormat`].
pub fn derive_build_id(version: &str) -> Result<String> {
    let Some((_, suffix)) = version.rsplit_once('-') else {
        return Ok(FALLBACK_BUILD_ID.to_string());
    };

    let (residual, revision) = suffix.rsplit_once('.').ok_or_else(|| Error::VersionFormat {
        version: version.to_string(),
        reason: format!("suffix '{}' has no revision component", suffix),
    })?;

    let short_date = residual.rsplit('.').next().unwrap_or(residual);
    let packed: u64 = short_date.parse().map_err(|_| Error::VersionFormat {
        version: version.to_string(),
        reason: format!("'{}' is not a numeric short date", short_date),
    })?;

    Ok(format!("{}.{}", ShortDate::decode(packed), revision))
}
