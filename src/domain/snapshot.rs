//! Persisted record of the tags resolved for one build variant.
//!
//! Every step of a build (version code, version name, changelog) runs in its own
//! process and reads the same snapshot file, so they all agree on which tag is
//! current.

use crate::domain::BuildTag;
use crate::error::{BuildPublishError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// The resolved current/previous build tags of one build invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildTagSnapshot {
    pub current: BuildTag,
    pub previous_in_order: Option<BuildTag>,
    pub previous_on_different_commit: Option<BuildTag>,
}

impl BuildTagSnapshot {
    /// Snapshot for a variant without any tags
    pub fn stub(variant: &str) -> Self {
        BuildTagSnapshot {
            current: BuildTag::stub(variant),
            previous_in_order: None,
            previous_on_different_commit: None,
        }
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Write the snapshot to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self
            .to_json()
            .map_err(|e| BuildPublishError::snapshot_format(path, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| BuildPublishError::snapshot_io(path, e))?;
        }
        fs::write(path, json).map_err(|e| BuildPublishError::snapshot_io(path, e))?;

        log::debug!("Wrote tag snapshot to {}", path.display());
        Ok(())
    }

    /// Read a snapshot from `path`
    ///
    /// # Returns
    /// * `Ok(Some(snapshot))` - File exists and is valid
    /// * `Ok(None)` - No snapshot has been written yet
    /// * `Err` - File is unreadable or malformed
    pub fn read_from(path: &Path) -> Result<Option<Self>> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BuildPublishError::snapshot_io(path, e)),
        };

        Self::from_json(&json)
            .map(Some)
            .map_err(|e| BuildPublishError::snapshot_format(path, e))
    }
}
