//! Local files read and written by the CLI.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use tfdkron_protocols::resource::ResourceState;

/// Read a resource configuration. It must be a JSON object.
pub(crate) fn load_resource_config(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    if !value.is_object() {
        anyhow::bail!("{} must contain a JSON object", path.display());
    }
    Ok(value)
}

/// Read the state file, `None` when it does not exist.
pub(crate) fn load_state(path: &Path) -> Result<Option<ResourceState>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state {}", path.display()))?;
    let state = serde_json::from_str(&content)
        .with_context(|| format!("Corrupt state file {}", path.display()))?;
    Ok(Some(state))
}

/// Like [`load_state`] but the state must exist.
pub(crate) fn require_state(path: &Path) -> Result<ResourceState> {
    load_state(path)?.with_context(|| format!("No state at {}", path.display()))
}

/// Write the state through a temporary file so a crash never leaves half a file.
pub(crate) fn save_state(path: &Path, state: &ResourceState) -> Result<()> {
    let content = serde_json::to_string_pretty(state)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, content)
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to replace state {}", path.display()))?;
    Ok(())
}

pub(crate) fn remove_state(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)
            .with_context(|| format!("Failed to remove state {}", path.display()))?;
    }
    Ok(())
}
