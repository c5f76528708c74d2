//! Same tree and revision produce byte-identical manifests

use super::test_utils::{builder, descriptor, library_module, local_fs, write_file, FakeScm};
use lavender::manifest::properties::PropertiesWriter;
use lavender::module::Packaging;
use std::fs;

#[tokio::test]
async fn test_two_runs_are_byte_identical() {
    let (_temp_dir, layout) = library_module();
    for i in 0..40 {
        write_file(
            &layout.source_dir(),
            &format!("deep/{}/file{}.js", i % 7, i),
            &"x".repeat(i * 13),
        );
    }
    let module = descriptor(Packaging::Library, &[], &["**/*.tmp"]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    builder(FakeScm::Revision("r1"))
        .generate(&module, &layout, &writer)
        .await
        .unwrap();
    let first = fs::read(layout.output_path()).unwrap();

    builder(FakeScm::Revision("r1"))
        .with_workers(1)
        .generate(&module, &layout, &writer)
        .await
        .unwrap();
    let second = fs::read(layout.output_path()).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_one_byte_change_changes_only_that_entry() {
    let (_temp_dir, layout) = library_module();
    let module = descriptor(Packaging::Library, &[], &[]);

    let before = builder(FakeScm::Revision("r1"))
        .build(&module, &layout)
        .await
        .unwrap();
    write_file(&layout.source_dir(), "b/c.txt", "gammb");
    let after = builder(FakeScm::Revision("r1"))
        .build(&module, &layout)
        .await
        .unwrap();

    assert_eq!(before.get("index.a.txt"), after.get("index.a.txt"));
    assert_eq!(before.get("index.b/d.tmp"), after.get("index.b/d.tmp"));
    assert_ne!(before.get("index.b/c.txt"), after.get("index.b/c.txt"));
}

#[tokio::test]
async fn test_fingerprint_independent_of_location() {
    let (_temp_dir, layout) = library_module();
    write_file(&layout.source_dir(), "copies/x/a.txt", "alpha");
    let module = descriptor(Packaging::Library, &[], &[]);

    let manifest = builder(FakeScm::Revision("r1"))
        .build(&module, &layout)
        .await
        .unwrap();
    assert_eq!(
        manifest.get("index.a.txt"),
        manifest.get("index.copies/x/a.txt")
    );
}
