//! Packaging and release: artifact upload and registry publication.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::{self, Settings};
use crate::exec::Tool;
use crate::metadata::BuildMetadata;
use crate::status;

/// Uploads the distribution directory of one binary, or of every binary
/// found under `dist/` when `name` is omitted.
pub fn run_push(settings: &Settings, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            settings.binary(name)?;
            let meta = BuildMetadata::collect(&settings.repo_root)?;
            push_bin(settings, name, &meta)
        }
        None => {
            let names = dist_binaries(&settings.dist_dir())?;
            if names.is_empty() {
                status!("nothing to push: no distribution directories found");
                return Ok(());
            }
            let meta = BuildMetadata::collect(&settings.repo_root)?;
            for name in &names {
                push_bin(settings, name, &meta)?;
            }
            Ok(())
        }
    }
}

/// Publishes a registry entry describing the current release.
pub fn run_update_registry(settings: &Settings) -> Result<()> {
    let meta = BuildMetadata::collect(&settings.repo_root)?;
    let entry = RegistryEntry {
        name: config::PROJECT_NAME,
        version: meta.version(),
        artifacts: dist_artifacts(&settings.dist_dir())?,
    };

    let local = std::env::temp_dir().join(format!("{}-{}.json", entry.name, entry.version));
    fs::write(&local, serde_json::to_vec_pretty(&entry)?)
        .with_context(|| format!("failed to write {}", local.display()))?;

    let remote = format!(
        "{}/registry/{}/{}.json",
        settings.env.bucket(),
        entry.name,
        entry.version
    );
    let result = Tool::new("gsutil")
        .arg("cp")
        .arg(local.to_string_lossy())
        .arg(remote.as_str())
        .run_checked();
    let _ = fs::remove_file(&local);
    result
}

#[derive(Debug, Serialize)]
struct RegistryEntry<'a> {
    name: &'a str,
    version: &'a str,
    artifacts: Vec<String>,
}

fn push_bin(settings: &Settings, name: &str, meta: &BuildMetadata) -> Result<()> {
    let bindir = settings.dist_dir().join(name);
    if !bindir.is_dir() {
        anyhow::bail!(
            "no distribution directory for '{name}' at {}; run `mk build` first",
            bindir.display()
        );
    }

    remove_checksum_files(&bindir)?;

    for file in uploadable_files(&bindir)? {
        let local = bindir.join(&file);
        let remote = format!(
            "{}/binaries/{name}/{}/{file}",
            settings.env.bucket(),
            meta.version()
        );
        Tool::new("gsutil")
            .arg("cp")
            .arg(local.to_string_lossy())
            .arg(remote.as_str())
            .run_checked()?;
    }
    Ok(())
}

/// Deletes stale `*.md5` and `*.sha1` side-files from a distribution
/// directory. Returns the number of files removed.
pub fn remove_checksum_files(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let is_checksum = path
            .extension()
            .is_some_and(|ext| ext == "md5" || ext == "sha1");
        if is_checksum && path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
            removed += 1;
        }
    }
    Ok(removed)
}

/// Regular files in a distribution directory, sorted by name.
/// Subdirectories are never uploaded.
pub fn uploadable_files(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}

/// Binary names with a directory under `dist/`, sorted. A missing `dist/`
/// yields an empty list.
fn dist_binaries(dist: &Path) -> Result<Vec<String>> {
    if !dist.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in
        fs::read_dir(dist).with_context(|| format!("failed to read {}", dist.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Every artifact under `dist/`, as `<binary>/<file>` paths, sorted.
fn dist_artifacts(dist: &Path) -> Result<Vec<String>> {
    let mut artifacts = Vec::new();
    for name in dist_binaries(dist)? {
        for file in uploadable_files(&dist.join(&name))? {
            artifacts.push(format!("{name}/{file}"));
        }
    }
    Ok(artifacts)
}
