//! Build metadata printing.

use anyhow::Result;

use crate::config::Settings;
use crate::metadata::BuildMetadata;

/// Prints every metadata key and value, one `key=value` line per entry,
/// sorted by key. With `json`, emits the map as pretty-printed JSON.
pub fn run_version(settings: &Settings, json: bool) -> Result<()> {
    let meta = BuildMetadata::collect(&settings.repo_root)?;

    if json {
        println!("{}", meta.to_json()?);
    } else {
        for (key, value) in meta.entries() {
            println!("{key}={value}");
        }
    }
    Ok(())
}
