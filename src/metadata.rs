//! Build metadata collected from the repository.
//!
//! The metadata map is assembled once per invocation by asking `git` about
//! the repository state, plus a few facts about the build host. Keys are
//! kept in a `BTreeMap` so `version` output is naturally sorted.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config;
use crate::exec::Tool;

/// Immutable build metadata for the current repository state.
#[derive(Debug, Clone)]
pub struct BuildMetadata {
    values: BTreeMap<String, String>,
}

impl BuildMetadata {
    /// Collects metadata by shelling out to `git` in the repository root.
    pub fn collect(repo_root: &Path) -> Result<Self> {
        let mut values = BTreeMap::new();

        values.insert(
            "version".to_string(),
            git(repo_root, &["describe", "--tags", "--always", "--dirty"])?,
        );
        values.insert(
            "commit_hash".to_string(),
            git(repo_root, &["rev-parse", "HEAD"])?,
        );
        values.insert(
            "branch".to_string(),
            git(repo_root, &["rev-parse", "--abbrev-ref", "HEAD"])?,
        );
        values.insert(
            "commit_timestamp".to_string(),
            git(repo_root, &["show", "-s", "--format=%cI", "HEAD"])?,
        );
        values.insert(
            "build_timestamp".to_string(),
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        values.insert(
            "build_host_os".to_string(),
            config::go_host_os().to_string(),
        );
        values.insert(
            "build_host_arch".to_string(),
            config::go_host_arch().to_string(),
        );

        Ok(Self { values })
    }

    /// The version string artifacts are tagged with.
    pub fn version(&self) -> &str {
        self.values.get("version").map_or("unknown", String::as_str)
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The metadata map as pretty-printed JSON, keys sorted.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.values).context("failed to serialize build metadata")
    }

    #[cfg(test)]
    pub(crate) fn from_values(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

fn git(repo_root: &Path, args: &[&str]) -> Result<String> {
    Tool::new("git")
        .args(args.iter().copied())
        .current_dir(repo_root)
        .capture()
        .with_context(|| format!("failed to read repository metadata (git {})", args.join(" ")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> BuildMetadata {
        let mut values = BTreeMap::new();
        values.insert("version".to_string(), "0.3.0".to_string());
        values.insert("commit_hash".to_string(), "abc123".to_string());
        values.insert("branch".to_string(), "master".to_string());
        BuildMetadata::from_values(values)
    }

    #[test]
    fn test_entries_sorted_by_key() {
        let meta = sample();
        let keys: Vec<&str> = meta.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, ["branch", "commit_hash", "version"]);
    }

    #[test]
    fn test_version_accessor() {
        assert_eq!(sample().version(), "0.3.0");
    }

    #[test]
    fn test_version_missing_falls_back() {
        let meta = BuildMetadata::from_values(BTreeMap::new());
        assert_eq!(meta.version(), "unknown");
    }

    #[test]
    fn test_json_output_contains_all_keys() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"branch\": \"master\""));
        assert!(json.contains("\"version\": \"0.3.0\""));
    }
}
