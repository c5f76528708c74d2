//! Include/exclude selection over a real resource tree

use super::test_utils::{builder, descriptor, library_module, FakeScm};
use lavender::module::Packaging;

async fn selected(includes: &[&str], excludes: &[&str]) -> Vec<String> {
    let (_temp_dir, layout) = library_module();
    let module = descriptor(Packaging::Library, includes, excludes);
    let manifest = builder(FakeScm::Revision("r1"))
        .build(&module, &layout)
        .await
        .unwrap();
    manifest.resources().keys().cloned().collect()
}

#[tokio::test]
async fn test_empty_includes_select_everything() {
    assert_eq!(selected(&[], &[]).await, vec!["a.txt", "b/c.txt", "b/d.tmp"]);
}

#[tokio::test]
async fn test_exclude_wins_over_include() {
    assert_eq!(
        selected(&["**/*"], &["**/*.tmp"]).await,
        vec!["a.txt", "b/c.txt"]
    );
}

#[tokio::test]
async fn test_include_limits_to_directory() {
    assert_eq!(selected(&["b/**/*"], &[]).await, vec!["b/c.txt", "b/d.tmp"]);
}

#[tokio::test]
async fn test_single_star_does_not_cross_directories() {
    assert_eq!(selected(&["*.txt"], &[]).await, vec!["a.txt"]);
}

#[tokio::test]
async fn test_default_htdocs_exclude() {
    let (_temp_dir, layout) = library_module();
    super::test_utils::write_file(&layout.source_dir(), "htdocs/x/y.css", "old");
    let module = descriptor(Packaging::Library, &[], &["htdocs/**/*"]);
    let manifest = builder(FakeScm::Revision("r1"))
        .build(&module, &layout)
        .await
        .unwrap();
    assert!(manifest
        .resources()
        .keys()
        .all(|path| !path.starts_with("htdocs/")));
    assert_eq!(manifest.resources().len(), 3);
}
