//! Harness configuration resolved once at startup.
//!
//! Everything here is computed from the process environment when the CLI
//! starts and never mutated afterwards: the deployment environment, the
//! repository root, and the binary matrix (already narrowed for non-prod
//! environments).

use anyhow::{Result, anyhow};
use indexmap::IndexMap;
use std::env;
use std::path::PathBuf;

/// Go import path of the repository this harness drives.
pub const REPO_IMPORT_PATH: &str = "github.com/appscode/service-broker";

/// Project name used for registry entries.
pub const PROJECT_NAME: &str = "service-broker";

/// Deployment environment, selected by the `DEPLOY_ENV` variable.
///
/// Anything other than `"prod"` (including unset) is [`DeployEnv::Dev`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployEnv {
    Dev,
    Prod,
}

impl DeployEnv {
    pub fn from_env() -> Self {
        Self::parse(env::var("DEPLOY_ENV").ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("prod") => Self::Prod,
            _ => Self::Dev,
        }
    }

    pub const fn is_prod(self) -> bool {
        matches!(self, Self::Prod)
    }

    /// Cloud storage bucket for this environment.
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Prod => "gs://appscode-cdn",
            Self::Dev => "gs://appscode-dev",
        }
    }
}

/// How a binary in the matrix is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Go,
    Other,
}

/// Build configuration for a single binary.
#[derive(Debug, Clone)]
pub struct BinaryConfig {
    pub kind: BinaryKind,
    /// Stamp version metadata into the binary via -ldflags.
    pub stamp_version: bool,
    pub use_cgo: bool,
    /// Target OS name to the architectures built for it, in declaration
    /// order. Empty means "build for the host only".
    pub distro: IndexMap<String, Vec<String>>,
}

/// Immutable harness settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub env: DeployEnv,
    pub repo_root: PathBuf,
    /// Binary name to its build configuration, in declaration order.
    pub binaries: IndexMap<String, BinaryConfig>,
}

impl Settings {
    pub fn from_environment() -> Self {
        Self::new(DeployEnv::from_env(), repo_root(), go_host_os(), go_host_arch())
    }

    /// Builds the settings for the given environment and host platform.
    ///
    /// In non-prod environments the distro map of each Go binary is
    /// narrowed to alpine plus the host platform, so local builds stay
    /// fast.
    pub fn new(env: DeployEnv, repo_root: PathBuf, host_os: &str, host_arch: &str) -> Self {
        let mut distro = IndexMap::new();
        distro.insert("alpine".to_string(), vec!["amd64".to_string()]);
        if env.is_prod() {
            distro.insert("darwin".to_string(), vec!["amd64".to_string()]);
            distro.insert("linux".to_string(), vec!["amd64".to_string()]);
        } else {
            distro
                .entry(host_os.to_string())
                .or_insert_with(Vec::new)
                .push(host_arch.to_string());
        }

        let mut binaries = IndexMap::new();
        binaries.insert(
            "service-broker".to_string(),
            BinaryConfig {
                kind: BinaryKind::Go,
                stamp_version: true,
                use_cgo: false,
                distro,
            },
        );

        Self { env, repo_root, binaries }
    }

    /// Looks up a binary by name, with an error listing known names.
    pub fn binary(&self, name: &str) -> Result<&BinaryConfig> {
        self.binaries.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.binaries.keys().map(String::as_str).collect();
            anyhow!(
                "unknown binary '{name}'\n\nKnown binaries:\n  - {}",
                known.join("\n  - ")
            )
        })
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.repo_root.join("dist")
    }
}

/// Repository root: `$GOPATH/src/<import path>` when `GOPATH` is set,
/// otherwise the current working directory.
pub fn repo_root() -> PathBuf {
    env::var("GOPATH").map_or_else(
        |_| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        |gopath| PathBuf::from(gopath).join("src").join(REPO_IMPORT_PATH),
    )
}

/// Host OS in Go's naming scheme.
pub fn go_host_os() -> &'static str {
    match env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// Host architecture in Go's naming scheme.
pub fn go_host_arch() -> &'static str {
    match env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "arm" => "arm",
        other => other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_settings(env: DeployEnv) -> Settings {
        Settings::new(env, PathBuf::from("/repo"), "linux", "amd64")
    }

    #[test]
    fn test_deploy_env_parse() {
        assert_eq!(DeployEnv::parse(Some("prod")), DeployEnv::Prod);
        assert_eq!(DeployEnv::parse(Some("dev")), DeployEnv::Dev);
        assert_eq!(DeployEnv::parse(Some("staging")), DeployEnv::Dev);
        assert_eq!(DeployEnv::parse(None), DeployEnv::Dev);
    }

    #[test]
    fn test_bucket_selection() {
        assert_eq!(DeployEnv::Prod.bucket(), "gs://appscode-cdn");
        assert_eq!(DeployEnv::Dev.bucket(), "gs://appscode-dev");
    }

    #[test]
    fn test_prod_matrix_keeps_full_distro() {
        let settings = test_settings(DeployEnv::Prod);
        let cfg = settings.binary("service-broker").unwrap();

        let targets: Vec<&str> = cfg.distro.keys().map(String::as_str).collect();
        assert_eq!(targets, ["alpine", "darwin", "linux"]);
        assert_eq!(cfg.distro["linux"], ["amd64"]);
    }

    #[test]
    fn test_dev_matrix_narrows_to_host() {
        let settings = Settings::new(DeployEnv::Dev, PathBuf::from("/repo"), "darwin", "arm64");
        let cfg = settings.binary("service-broker").unwrap();

        let targets: Vec<&str> = cfg.distro.keys().map(String::as_str).collect();
        assert_eq!(targets, ["alpine", "darwin"]);
        assert_eq!(cfg.distro["alpine"], ["amd64"]);
        assert_eq!(cfg.distro["darwin"], ["arm64"]);
    }

    #[test]
    fn test_dev_matrix_merges_amd64_linux_host() {
        // A linux/amd64 host collides with the alpine row; both survive.
        let settings = test_settings(DeployEnv::Dev);
        let cfg = settings.binary("service-broker").unwrap();

        assert_eq!(cfg.distro["alpine"], ["amd64"]);
        assert_eq!(cfg.distro["linux"], ["amd64"]);
    }

    #[test]
    fn test_unknown_binary_lists_known_names() {
        let settings = test_settings(DeployEnv::Dev);
        let err = settings.binary("nonexistent").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("unknown binary 'nonexistent'"));
        assert!(message.contains("service-broker"));
    }
}
