//! Compile and install all packages in the repository.

use anyhow::Result;

use crate::config::Settings;
use crate::exec::Tool;

pub fn run_install(settings: &Settings) -> Result<()> {
    Tool::new("go")
        .args(["install", "./..."])
        .env("GO15VENDOREXPERIMENT", "1")
        .current_dir(&settings.repo_root)
        .run_checked()
}
