//! Cross-compilation planning and execution for Go binaries.
//!
//! `plan` turns a binary's distro map into a list of [`GoBuild`] targets
//! without touching the filesystem; `execute` runs `go build` (and the
//! optional packaging step) for one target. The split keeps the target
//! selection and compression rules testable without a Go toolchain.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::{self, BinaryConfig, DeployEnv, Settings};
use crate::exec::Tool;
use crate::metadata::BuildMetadata;

/// One `go build` invocation for a single (OS, arch) target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoBuild {
    pub binary: String,
    /// Distro key; `alpine` compiles as linux but keeps its own name.
    pub os: String,
    pub arch: String,
    /// Pack the artifact into a tarball after a successful compile.
    pub compress: bool,
    /// Run the executable packer over the artifact. Plumbed through but
    /// disabled in the shipped matrix.
    pub upx: bool,
}

impl GoBuild {
    /// The `GOOS` value this target compiles with.
    pub fn goos(&self) -> &str {
        if self.os == "alpine" { "linux" } else { &self.os }
    }

    /// Artifact file name, e.g. `service-broker-linux-amd64`.
    pub fn artifact(&self) -> String {
        let ext = if self.goos() == "windows" { ".exe" } else { "" };
        format!("{}-{}-{}{ext}", self.binary, self.os, self.arch)
    }

    /// Artifact path relative to the repository root.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from("dist").join(&self.binary).join(self.artifact())
    }
}

/// Builds the target list for one binary.
///
/// One target per (OS, arch) pair in declaration order; an empty distro
/// map means a single build for the host platform. Compression is enabled
/// only for prod releases.
pub fn plan(name: &str, cfg: &BinaryConfig, env: DeployEnv) -> Vec<GoBuild> {
    let compress = env.is_prod();
    let upx = false;

    if cfg.distro.is_empty() {
        return vec![GoBuild {
            binary: name.to_string(),
            os: config::go_host_os().to_string(),
            arch: config::go_host_arch().to_string(),
            compress,
            upx,
        }];
    }

    cfg.distro
        .iter()
        .flat_map(|(os, archs)| {
            archs.iter().map(|arch| GoBuild {
                binary: name.to_string(),
                os: os.clone(),
                arch: arch.clone(),
                compress,
                upx,
            })
        })
        .collect()
}

/// Compiles one target, then applies packaging steps.
///
/// Any failing step aborts the invocation.
pub fn execute(
    build: &GoBuild,
    settings: &Settings,
    cfg: &BinaryConfig,
    meta: Option<&BuildMetadata>,
) -> Result<()> {
    let output = settings.repo_root.join(build.output_path());
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut tool = Tool::new("go")
        .arg("build")
        .env("GOOS", build.goos())
        .env("GOARCH", build.arch.as_str())
        .env("CGO_ENABLED", if cfg.use_cgo { "1" } else { "0" })
        .env("GO15VENDOREXPERIMENT", "1")
        .arg("-o")
        .arg(output.to_string_lossy());

    if let Some(meta) = meta {
        tool = tool.arg("-ldflags").arg(ldflags(meta));
    }

    tool.arg(format!("./cmd/{}", build.binary))
        .current_dir(&settings.repo_root)
        .run_checked()?;

    if build.upx {
        Tool::new("upx")
            .arg(output.to_string_lossy())
            .run_checked()?;
    }

    if build.compress {
        let bindir = settings.dist_dir().join(&build.binary);
        let artifact = build.artifact();
        Tool::new("tar")
            .arg("-czf")
            .arg(format!("{artifact}.tar.gz"))
            .arg(artifact.as_str())
            .current_dir(&bindir)
            .run_checked()?;
    }

    Ok(())
}

/// Linker flags stamping version metadata into the binary.
fn ldflags(meta: &BuildMetadata) -> String {
    let mut flags = format!("-X main.Version={}", meta.version());
    for (key, flag) in [
        ("commit_hash", "main.GitCommit"),
        ("commit_timestamp", "main.CommitTimestamp"),
        ("build_timestamp", "main.BuildTimestamp"),
    ] {
        if let Some((_, value)) = meta.entries().find(|(k, _)| *k == key) {
            flags.push_str(&format!(" -X {flag}={value}"));
        }
    }
    flags
}
