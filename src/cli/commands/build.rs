//! Build operations: code generation and cross-compilation.

use anyhow::Result;

use crate::config::{BinaryConfig, BinaryKind, Settings};
use crate::gobuild;
use crate::metadata::BuildMetadata;
use crate::status;

/// Code generation hook. Reserved extension point; nothing to generate yet.
pub fn run_gen() {}

/// Builds one binary, or every registered binary when `name` is omitted.
pub fn run_build(settings: &Settings, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => {
            let cfg = settings.binary(name)?;
            if cfg.kind != BinaryKind::Go {
                status!("{name} is not a Go binary; nothing to build");
                return Ok(());
            }
            run_gen();
            build_binary(settings, name, cfg)
        }
        None => {
            run_gen();
            for (name, cfg) in &settings.binaries {
                if cfg.kind == BinaryKind::Go {
                    build_binary(settings, name, cfg)?;
                }
            }
            Ok(())
        }
    }
}

fn build_binary(settings: &Settings, name: &str, cfg: &BinaryConfig) -> Result<()> {
    let meta = if cfg.stamp_version {
        Some(BuildMetadata::collect(&settings.repo_root)?)
    } else {
        None
    };

    for build in gobuild::plan(name, cfg, settings.env) {
        gobuild::execute(&build, settings, cfg, meta.as_ref())?;
    }
    Ok(())
}
