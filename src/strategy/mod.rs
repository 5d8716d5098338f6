//! Version and artifact naming policies
//!
//! Every policy is a plain value with a pure `build` method. Callers pick a
//! policy (usually from configuration) and pass it where it is needed.

pub mod output_name;
pub mod version;

pub use output_name::OutputNameStrategy;
pub use version::{VersionCodeStrategy, VersionNameStrategy};

use crate::domain::{BuildTag, BuildTagSnapshot};

/// Where version values come from for one build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource<'a> {
    /// Derive from the resolved tag
    Tag(&'a BuildTag),
    /// Use the strategies' defaults for a missing tag
    Defaults,
    /// Produce no value at all
    Absent,
}

impl<'a> VersionSource<'a> {
    /// Pick the source from the snapshot (if any) and the version flags
    pub fn select(
        snapshot: Option<&'a BuildTagSnapshot>,
        use_versions_from_tag: bool,
        use_defaults_for_versions_as_fallback: bool,
    ) -> Self {
        match snapshot {
            Some(snapshot) if use_versions_from_tag => VersionSource::Tag(&snapshot.current),
            _ if use_defaults_for_versions_as_fallback => VersionSource::Defaults,
            _ => VersionSource::Absent,
        }
    }

    pub fn version_code(&self, strategy: &VersionCodeStrategy) -> Option<u32> {
        match *self {
            VersionSource::Tag(tag) => Some(strategy.build(Some(tag))),
            VersionSource::Defaults => Some(strategy.build(None)),
            VersionSource::Absent => None,
        }
    }

    pub fn version_name(&self, strategy: &VersionNameStrategy) -> Option<String> {
        match *self {
            VersionSource::Tag(tag) => Some(strategy.build(Some(tag))),
            VersionSource::Defaults => Some(strategy.build(None)),
            VersionSource::Absent => None,
        }
    }
}
