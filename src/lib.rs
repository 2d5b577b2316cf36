//! # mk - service-broker build harness
//!
//! `mk` drives the build and release workflow of the service-broker
//! repository: formatting, vetting, linting, cross-compiling, packaging,
//! cloud upload, registry publication, installation, and test
//! orchestration. All real work happens in external tools (`go`,
//! `goimports`, `gofmt`, `golint`, `ginkgo`, `gsutil`, `git`, `glide`,
//! `tar`); this crate supplies command dispatch, configuration, build
//! planning, and a uniform failure policy.
//!
//! ## Quick Start
//!
//! ```bash
//! # Default pipeline: gen, fmt, install
//! mk
//!
//! # Cross-compile every registered binary into dist/
//! mk build
//!
//! # Upload dist/ artifacts (bucket depends on DEPLOY_ENV)
//! DEPLOY_ENV=prod mk push
//!
//! # Run the unit suite with extra go test arguments
//! mk test unit -run TestBroker
//! ```
//!
//! ## Environment
//!
//! - `GOPATH` — repository root is `$GOPATH/src/github.com/appscode/service-broker`;
//!   falls back to the current directory when unset
//! - `DEPLOY_ENV` — `prod` selects the release bucket, enables artifact
//!   compression, and keeps the full cross-compile matrix; anything else
//!   narrows builds to alpine plus the host platform
//! - `hack/configs/.env` — optional dotenv file loaded before test runs

/// Command-line interface definitions and handlers.
pub mod cli;

/// Harness configuration resolved once at startup.
pub mod config;

/// Optional test-environment file loading.
pub mod envfile;

/// Synchronous external tool invocation.
pub mod exec;

/// Cross-compilation planning and execution.
pub mod gobuild;

/// Import un-grouping for Go sources.
pub mod imports;

/// Build metadata collected from git.
pub mod metadata;

/// Global output configuration (quiet mode, colors).
pub mod output;

/// Terminal styling helpers.
pub mod ui;
