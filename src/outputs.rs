//! Variant-scoped output files consumed by artifact renamers and notifiers

use crate::error::Result;
use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Locations of the files produced for each build variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    dir: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        OutputPaths { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn snapshot(&self, variant: &str) -> PathBuf {
        self.dir.join(format!("tag-build-snapshot-{}.json", variant))
    }

    pub fn changelog(&self, variant: &str) -> PathBuf {
        self.dir.join(format!("changelog-{}.txt", variant))
    }

    pub fn version_code(&self, variant: &str) -> PathBuf {
        self.dir.join(format!("version-code-{}.txt", variant))
    }

    pub fn version_name(&self, variant: &str) -> PathBuf {
        self.dir.join(format!("version-name-{}.txt", variant))
    }

    pub fn output_file_name(&self, variant: &str) -> PathBuf {
        self.dir.join(format!("output-file-name-{}.txt", variant))
    }
}

/// Write `text` to `path`, creating parent directories
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

/// Write a single value, or empty text when there is no value
pub fn write_value<T: Display>(path: &Path, value: Option<T>) -> Result<()> {
    let text = value.map(|v| v.to_string()).unwrap_or_default();
    write_text(path, &text)
}

/// Read a single value file; missing and empty files both mean "no value"
pub fn read_value(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) if text.is_empty() => Ok(None),
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
