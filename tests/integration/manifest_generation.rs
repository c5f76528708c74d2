//! End-to-end manifest generation against the local filesystem

use super::test_utils::{builder, descriptor, library_module, local_fs, write_file, FakeScm};
use lavender::error::{LavenderError, Stage};
use lavender::manifest::properties::PropertiesWriter;
use lavender::module::{ModuleLayout, Packaging};
use lavender::tree::hasher::compute_content_hash;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_library_manifest_contents() {
    let (_temp_dir, layout) = library_module();
    let module = descriptor(Packaging::Library, &["**/*.txt"], &[]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    builder(FakeScm::Revision("4711"))
        .generate(&module, &layout, &writer)
        .await
        .unwrap();

    let text = fs::read_to_string(layout.output_path()).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
    let alpha = compute_content_hash(b"alpha");
    let gamma = compute_content_hash(b"gamma");
    assert_eq!(
        lines,
        vec![
            "scm.foo=scm\\:git\\:https\\://example.com/foo.git".to_string(),
            "scm.foo.devel=scm\\:git\\:ssh\\://git@example.com/foo.git".to_string(),
            "scm.foo.path=src/main/resources".to_string(),
            "scm.foo.tag=4711".to_string(),
            "scm.foo.includes=**/*.txt".to_string(),
            "scm.foo.excludes=".to_string(),
            "scm.foo.resourcePathPrefix=modules/foo/".to_string(),
            format!("index.a.txt={}", alpha),
            format!("index.b/c.txt={}", gamma),
        ]
    );
}

#[tokio::test]
async fn test_webapp_manifest_location_and_keys() {
    let temp_dir = TempDir::new().unwrap();
    let layout = ModuleLayout::new(temp_dir.path(), "target", "shop", Packaging::Webapp);
    write_file(&layout.source_dir(), "css/site.css", "body{}");
    write_file(&layout.source_dir(), "WEB-INF/web.xml", "<web-app/>");
    let module = descriptor(Packaging::Webapp, &["**/*.css"], &[]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    builder(FakeScm::Revision("r9"))
        .generate(&module, &layout, &writer)
        .await
        .unwrap();

    let output = temp_dir
        .path()
        .join("target/shop/WEB-INF/lavender.properties");
    let text = fs::read_to_string(output).unwrap();
    assert!(text.contains("scm.webapp.path=src/main/webapp\n"));
    assert!(text.contains("scm.webapp.resourcePathPrefix=\n"));
    assert!(text.contains("index.css/site.css="));
    assert!(!text.contains("web.xml"));
}

#[tokio::test]
async fn test_legacy_properties_abort_without_output() {
    let (_temp_dir, layout) = library_module();
    write_file(
        &layout.source_dir(),
        "META-INF/lavender.properties",
        "index.a.txt=00\n",
    );
    let module = descriptor(Packaging::Library, &[], &[]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    let err = builder(FakeScm::Revision("r1"))
        .generate(&module, &layout, &writer)
        .await
        .unwrap_err();

    assert!(matches!(err, LavenderError::LegacyProperties(_)));
    assert!(err.to_string().starts_with("source properties not empty"));
    assert!(!layout.output_path().exists());
}

#[tokio::test]
async fn test_missing_source_root_writes_metadata_only() {
    let temp_dir = TempDir::new().unwrap();
    let layout = ModuleLayout::new(temp_dir.path(), "target", "foo", Packaging::Library);
    let module = descriptor(Packaging::Library, &[], &[]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    let manifest = builder(FakeScm::Revision("r1"))
        .generate(&module, &layout, &writer)
        .await
        .unwrap();

    assert!(manifest.resources().is_empty());
    let text = fs::read_to_string(layout.output_path()).unwrap();
    assert!(!text.contains("index."));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_file_is_hashing_error() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp_dir, layout) = library_module();
    let locked = layout.source_dir().join("b/c.txt");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&locked).is_ok() {
        // Running as root; permissions are not enforced
        return;
    }
    let module = descriptor(Packaging::Library, &[], &[]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    let err = builder(FakeScm::Revision("r1"))
        .generate(&module, &layout, &writer)
        .await
        .unwrap_err();

    assert_eq!(err.stage(), Stage::Hashing);
    assert!(!layout.output_path().exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinked_resource_is_indexed() {
    let (temp_dir, layout) = library_module();
    write_file(temp_dir.path(), "shared/theme.css", "shared");
    std::os::unix::fs::symlink(
        temp_dir.path().join("shared/theme.css"),
        layout.source_dir().join("theme.css"),
    )
    .unwrap();
    let module = descriptor(Packaging::Library, &["**/*.css"], &[]);

    let manifest = builder(FakeScm::Revision("r1"))
        .build(&module, &layout)
        .await
        .unwrap();

    let paths: Vec<&str> = manifest.resources().keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["theme.css"]);
    let expected = compute_content_hash(b"shared");
    assert_eq!(manifest.get("index.theme.css"), Some(expected.as_str()));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_composed_and_decomposed_names_keep_their_own_keys() {
    let (_temp_dir, layout) = library_module();
    write_file(&layout.source_dir(), "caf\u{e9}.css", "composed");
    write_file(&layout.source_dir(), "cafe\u{301}.css", "decomposed");
    let module = descriptor(Packaging::Library, &["*.css"], &[]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    let manifest = builder(FakeScm::Revision("r1"))
        .generate(&module, &layout, &writer)
        .await
        .unwrap();

    let composed = compute_content_hash(b"composed");
    let decomposed = compute_content_hash(b"decomposed");
    assert_eq!(manifest.get("index.caf\u{e9}.css"), Some(composed.as_str()));
    assert_eq!(
        manifest.get("index.cafe\u{301}.css"),
        Some(decomposed.as_str())
    );
    assert_eq!(manifest.resources().len(), 2);
}
