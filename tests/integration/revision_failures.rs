//! Revision resolution failures end the run before anything is written

use super::test_utils::{builder, descriptor, library_module, local_fs, FakeScm};
use lavender::error::{LavenderError, ScmError, Stage};
use lavender::manifest::properties::PropertiesWriter;
use lavender::module::Packaging;

async fn generate_with(scm: FakeScm) -> LavenderError {
    let (_temp_dir, layout) = library_module();
    let module = descriptor(Packaging::Library, &[], &[]);
    let writer = PropertiesWriter::new(local_fs(), layout.output_path());

    let err = builder(scm)
        .generate(&module, &layout, &writer)
        .await
        .unwrap_err();
    assert!(!layout.output_path().exists());
    assert_eq!(err.stage(), Stage::RevisionResolution);
    err
}

#[tokio::test]
async fn test_zero_items() {
    let err = generate_with(FakeScm::NoItems).await;
    assert!(matches!(err, LavenderError::Scm(ScmError::NoRevision)));
    assert_eq!(err.to_string(), "cannot determine scm revision");
}

#[tokio::test]
async fn test_failure_result() {
    let err = generate_with(FakeScm::Failure("svn: E170013")).await;
    assert!(matches!(err, LavenderError::Scm(ScmError::Failed(ref m)) if m.contains("E170013")));
}

#[tokio::test]
async fn test_transport_error() {
    let err = generate_with(FakeScm::Transport).await;
    assert!(matches!(err, LavenderError::Scm(ScmError::Transport(_))));
}

#[tokio::test]
async fn test_timeout() {
    let err = generate_with(FakeScm::Hang).await;
    assert!(matches!(err, LavenderError::Scm(ScmError::Timeout(_))));
}
