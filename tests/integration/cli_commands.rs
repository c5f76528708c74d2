//! CLI route behavior against a module on disk

use super::test_utils::{library_module, local_fs, FakeScm};
use clap::Parser;
use lavender::cli::{map_error, Cli, RunContext};
use lavender::config::LavenderConfig;
use std::fs;
use std::sync::Arc;

fn context_for(base_dir: &std::path::Path, scm: FakeScm) -> RunContext {
    let mut config = LavenderConfig::default();
    config.module.artifact_id = Some("foo".to_string());
    RunContext::with_parts(base_dir.to_path_buf(), config, local_fs(), Arc::new(scm))
}

#[tokio::test]
async fn test_generate_command_writes_manifest() {
    let (temp_dir, layout) = library_module();
    let cli = Cli::try_parse_from([
        "lavender",
        "generate",
        "--scm-connection",
        "scm:git:https://example.com/foo.git",
        "--workers",
        "3",
    ])
    .unwrap();

    let output = context_for(temp_dir.path(), FakeScm::Revision("abc"))
        .execute(&cli.command)
        .await
        .unwrap();

    assert!(output.starts_with("generated "));
    let text = fs::read_to_string(layout.output_path()).unwrap();
    assert!(text.contains("scm.foo.tag=abc\n"));
    assert!(text.contains("scm.foo.excludes=htdocs/**/*\n"));
}

#[tokio::test]
async fn test_scan_json_output() {
    let (temp_dir, layout) = library_module();
    let cli = Cli::try_parse_from([
        "lavender",
        "scan",
        "--includes",
        "b/**/*",
        "--format",
        "json",
    ])
    .unwrap();

    let output = context_for(temp_dir.path(), FakeScm::Hang)
        .execute(&cli.command)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let object = value.as_object().unwrap();
    let keys: Vec<&str> = object.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b/c.txt", "b/d.tmp"]);
    assert!(!layout.output_path().exists());
}

#[tokio::test]
async fn test_failure_message_names_stage() {
    let (temp_dir, _layout) = library_module();
    let cli = Cli::try_parse_from([
        "lavender",
        "generate",
        "--scm-connection",
        "scm:git:https://example.com/foo.git",
    ])
    .unwrap();

    let err = context_for(temp_dir.path(), FakeScm::NoItems)
        .execute(&cli.command)
        .await
        .unwrap_err();
    assert_eq!(
        map_error(&err),
        "revision resolution failed: cannot determine scm revision"
    );
}

#[test]
fn test_run_context_reads_project_file() {
    let (temp_dir, _layout) = library_module();
    fs::write(
        temp_dir.path().join("lavender.toml"),
        "[module]\nartifact_id = \"from-file\"\npackaging = \"war\"\n",
    )
    .unwrap();

    let context = RunContext::new(temp_dir.path().to_path_buf(), None).unwrap();
    assert_eq!(
        context.config().module.artifact_id.as_deref(),
        Some("from-file")
    );
    assert_eq!(context.config().module.packaging, "war");
}
