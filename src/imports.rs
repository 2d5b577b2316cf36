//! Import un-grouping for Go sources.
//!
//! `goimports` groups imports into blank-line separated blocks and keeps
//! the grouping stable afterwards. Removing the blank lines first lets it
//! regroup from scratch, so the whole tree converges on one canonical
//! grouping. This is the native half of `mk fmt`; the external
//! `goimports`/`gofmt` passes run after it.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;

/// Rewrites every `.go` file under `dirs` (relative to `repo_root`) so
/// that `import ( ... )` blocks contain no blank lines.
///
/// Returns the number of files that changed. Missing directories are
/// skipped; vendored and hidden files are not touched.
pub fn ungroup(repo_root: &Path, dirs: &[&str]) -> Result<usize> {
    let mut rewritten = 0;

    for dir in dirs {
        let root = repo_root.join(dir);
        if !root.is_dir() {
            continue;
        }

        for entry in WalkBuilder::new(&root).build() {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            if path.extension().is_none_or(|ext| ext != "go") {
                continue;
            }

            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if let Some(updated) = ungroup_source(&source) {
                fs::write(path, updated)
                    .with_context(|| format!("failed to rewrite {}", path.display()))?;
                rewritten += 1;
            }
        }
    }

    Ok(rewritten)
}

/// Removes blank lines inside `import ( ... )` blocks.
///
/// Returns `None` when the source is already normalized.
pub fn ungroup_source(source: &str) -> Option<String> {
    let mut out = String::with_capacity(source.len());
    let mut in_import_block = false;
    let mut changed = false;

    for line in source.lines() {
        let trimmed = line.trim();
        if in_import_block {
            if trimmed == ")" {
                in_import_block = false;
            } else if trimmed.is_empty() {
                changed = true;
                continue;
            }
        } else if trimmed == "import (" {
            in_import_block = true;
        }
        out.push_str(line);
        out.push('\n');
    }

    // lines() drops a final newline; only re-add what was there.
    if !source.ends_with('\n') {
        out.pop();
    }

    changed.then_some(out)
}
