//! Dependency re-vendoring.

use anyhow::Result;

use crate::config::Settings;
use crate::exec::Tool;

pub fn run_revendor(settings: &Settings) -> Result<()> {
    revendor_tool(settings).run_checked()
}

fn revendor_tool(settings: &Settings) -> Tool {
    Tool::new("glide")
        .args(["slow", "--strip-vendor"])
        .current_dir(&settings.repo_root)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::DeployEnv;
    use std::path::PathBuf;

    #[test]
    fn test_revendor_command_line() {
        let settings = Settings::new(DeployEnv::Dev, PathBuf::from("/repo"), "linux", "amd64");
        assert_eq!(
            revendor_tool(&settings).command_line(),
            "glide slow --strip-vendor"
        );
    }
}
