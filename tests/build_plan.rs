#![allow(clippy::unwrap_used)]
//! Build matrix and plan contract tests.
//!
//! These pin down the cross-compile matrix narrowing and the per-target
//! compression rules against the library API.

use std::path::PathBuf;

use mk_cli::config::{BinaryKind, DeployEnv, Settings};
use mk_cli::gobuild;

fn settings(env: DeployEnv) -> Settings {
    Settings::new(env, PathBuf::from("/repo"), "darwin", "arm64")
}

#[test]
fn test_prod_plan_covers_full_matrix_with_compression() {
    let settings = settings(DeployEnv::Prod);
    let cfg = settings.binary("service-broker").unwrap();

    let builds = gobuild::plan("service-broker", cfg, settings.env);

    let targets: Vec<(&str, &str)> = builds
        .iter()
        .map(|b| (b.os.as_str(), b.arch.as_str()))
        .collect();
    assert_eq!(
        targets,
        [
            ("alpine", "amd64"),
            ("darwin", "amd64"),
            ("linux", "amd64"),
        ]
    );
    assert!(builds.iter().all(|b| b.compress));
    assert!(builds.iter().all(|b| !b.upx));
}

#[test]
fn test_dev_plan_narrows_to_alpine_and_host() {
    let settings = settings(DeployEnv::Dev);
    let cfg = settings.binary("service-broker").unwrap();

    let builds = gobuild::plan("service-broker", cfg, settings.env);

    let targets: Vec<(&str, &str)> = builds
        .iter()
        .map(|b| (b.os.as_str(), b.arch.as_str()))
        .collect();
    assert_eq!(targets, [("alpine", "amd64"), ("darwin", "arm64")]);
    assert!(builds.iter().all(|b| !b.compress));
}

#[test]
fn test_registered_binary_is_go() {
    let settings = settings(DeployEnv::Dev);
    let cfg = settings.binary("service-broker").unwrap();

    assert_eq!(cfg.kind, BinaryKind::Go);
    assert!(cfg.stamp_version);
    assert!(!cfg.use_cgo);
}

#[test]
fn test_artifact_paths_land_under_dist() {
    let settings = settings(DeployEnv::Prod);
    let cfg = settings.binary("service-broker").unwrap();

    for build in gobuild::plan("service-broker", cfg, settings.env) {
        let path = build.output_path();
        assert!(path.starts_with("dist/service-broker"), "{}", path.display());
        assert!(
            build.artifact().starts_with("service-broker-"),
            "{}",
            build.artifact()
        );
    }
}

#[test]
fn test_bucket_follows_deploy_env() {
    assert_eq!(DeployEnv::Prod.bucket(), "gs://appscode-cdn");
    assert_eq!(DeployEnv::Dev.bucket(), "gs://appscode-dev");
}
