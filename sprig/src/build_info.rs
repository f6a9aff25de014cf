//! Compile-time identity of the library.
//!
//! [`version_short`] is the default answer to `-v` / `--version`. With the
//! `build-info` feature the `built` crate also records target, build time
//! and compiler; without it those fields are absent.

use std::fmt;

#[cfg(feature = "build-info")]
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub target: Option<&'static str>,
    pub built_at: Option<&'static str>,
    pub rustc: Option<&'static str>,
}

impl BuildInfo {
    #[cfg(feature = "build-info")]
    pub fn current() -> Self {
        Self {
            name: built_info::PKG_NAME,
            version: built_info::PKG_VERSION,
            target: Some(built_info::TARGET),
            built_at: Some(built_info::BUILT_TIME_UTC),
            rustc: Some(built_info::RUSTC_VERSION),
        }
    }

    #[cfg(not(feature = "build-info"))]
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            target: None,
            built_at: None,
            rustc: None,
        }
    }
}

/// ```text
/// sprig 0.3.0 (x86_64-unknown-linux-gnu)
/// Built: Thu, 15 Oct 2026 12:34:56 +0000
/// Rustc: rustc 1.82.0
/// ```
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)?;
        if let Some(target) = self.target {
            write!(f, " ({})", target)?;
        }
        if let Some(built_at) = self.built_at {
            write!(f, "\nBuilt: {}", built_at)?;
        }
        if let Some(rustc) = self.rustc {
            write!(f, "\nRustc: {}", rustc)?;
        }
        Ok(())
    }
}

/// Multi-line build description.
pub fn version_info() -> String {
    BuildInfo::current().to_string()
}

pub fn version_short() -> &'static str {
    BuildInfo::current().version
}
