//! Test orchestration: install, optional env file, then unit or e2e.

use anyhow::Result;

use super::{install, quality};
use crate::config::Settings;
use crate::envfile;
use crate::exec::Tool;

/// Path of the optional test environment file, relative to the repo root.
const ENV_FILE: &str = "hack/configs/.env";

pub fn run_test(settings: &Settings, kind: &str, extra: &[String]) -> Result<()> {
    install::run_install(settings)?;
    envfile::load_optional(&settings.repo_root.join(ENV_FILE))?;

    match kind {
        "unit" => unit_test(settings, extra),
        "e2e" => e2e_test(settings, extra),
        _ => {
            println!("usage: mk test {{unit|e2e}} [args...]");
            Ok(())
        }
    }
}

fn unit_test(settings: &Settings, extra: &[String]) -> Result<()> {
    Tool::new("go")
        .args(["test", "-v", ".", "./cmd/...", "./pkg/..."])
        .args(extra.iter().cloned())
        .current_dir(&settings.repo_root)
        .run_checked()
}

fn e2e_test(settings: &Settings, extra: &[String]) -> Result<()> {
    quality::normalize_and_format(settings)?;

    Tool::new("ginkgo")
        .args(["-r", "-v", "-progress", "-trace", "test/e2e", "--"])
        .args(extra.iter().cloned())
        .current_dir(&settings.repo_root)
        .run_checked()
}
