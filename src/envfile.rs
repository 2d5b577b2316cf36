//! Optional test-environment file loading.

use anyhow::{Context, Result};
use std::path::Path;

use crate::status;

/// Loads `key=value` pairs from the given dotenv file into the process
/// environment. A missing file is not an error.
pub fn load_optional(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    status!("loading environment from {}", path.display());
    dotenv::from_path(path)
        .with_context(|| format!("failed to load environment file {}", path.display()))?;
    Ok(())
}
