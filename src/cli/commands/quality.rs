//! Source quality operations: fmt, vet, lint.
//!
//! `fmt` is fatal end to end; `vet` and `lint` are advisory and only warn
//! on failure.

use anyhow::Result;

use crate::config::Settings;
use crate::exec::Tool;
use crate::imports;
use crate::ui::Style;
use crate::{status, warn};

/// Source trees covered by the quality operations.
const SOURCE_TREES: [&str; 3] = ["cmd", "pkg", "test"];

/// Go package patterns for the same trees.
const PACKAGE_PATTERNS: [&str; 3] = ["./cmd/...", "./pkg/...", "./test/..."];

pub fn run_fmt(settings: &Settings) -> Result<()> {
    normalize_and_format(settings)
}

/// Import un-grouping followed by the two external formatting passes.
/// Shared between `fmt` and the e2e test prologue.
pub fn normalize_and_format(settings: &Settings) -> Result<()> {
    let rewritten = imports::ungroup(&settings.repo_root, &SOURCE_TREES)?;
    if rewritten > 0 {
        status!("ungrouped imports in {rewritten} file(s)");
    }

    Tool::new("goimports")
        .arg("-w")
        .args(SOURCE_TREES)
        .current_dir(&settings.repo_root)
        .run_checked()?;
    Tool::new("gofmt")
        .args(["-s", "-w"])
        .args(SOURCE_TREES)
        .current_dir(&settings.repo_root)
        .run_checked()?;
    Ok(())
}

pub fn run_vet(settings: &Settings) -> Result<()> {
    advisory(
        Tool::new("go")
            .arg("vet")
            .args(PACKAGE_PATTERNS)
            .current_dir(&settings.repo_root),
        "go vet",
    )
}

pub fn run_lint(settings: &Settings) -> Result<()> {
    advisory(
        Tool::new("golint")
            .args(PACKAGE_PATTERNS)
            .current_dir(&settings.repo_root),
        "golint",
    )
}

/// Runs an advisory tool: a non-zero exit is reported but never fatal.
fn advisory(tool: Tool, label: &str) -> Result<()> {
    match tool.run()? {
        0 => Ok(()),
        code => {
            warn!(
                "{} {label} reported issues (exit status {code})",
                Style::warning("warning:")
            );
            Ok(())
        }
    }
}
