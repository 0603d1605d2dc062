//! Project manifest discovery and file I/O
//!
//! The manifest (`devvm.json`) belongs to the project, not to a user-level
//! config directory: it is found by walking up from the working directory.
//! Reads happen once at the start of a run, writes at most once at the end,
//! replacing the whole file.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vmusb_core::manifest::{self, MANIFEST_FILE};
use vmusb_core::Error;

/// Resolve the manifest path: an explicit `--config` path wins, otherwise
/// the nearest `devvm.json` in the working directory or an ancestor.
pub fn locate(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::ConfigurationMissing)
            .with_context(|| format!("{} does not exist", path.display()));
    }

    let cwd = std::env::current_dir().context("Failed to resolve working directory")?;
    find_in_ancestors(&cwd).ok_or_else(|| Error::ConfigurationMissing.into())
}

/// Search `start` and each ancestor directory for the manifest file.
pub fn find_in_ancestors(start: &Path) -> Option<PathBuf> {
    let found = start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file());
    if let Some(path) = &found {
        debug!("using project manifest: {}", path.display());
    }
    found
}

/// Read and parse the manifest document.
pub fn load(path: &Path) -> Result<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::ConfigurationMissing.into());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let doc = serde_json::from_str(&content)
        .map_err(|e| Error::ConfigurationMalformed(e.to_string()))?;
    Ok(doc)
}

/// Replace the manifest file with the rendered document.
pub fn save(path: &Path, doc: &Value) -> Result<()> {
    fs::write(path, manifest::render(doc))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("updated project manifest: {}", path.display());
    Ok(())
}
