//! Version-control revision lookup
//!
//! The only part of manifest generation that leaves the process. A
//! [`RevisionResolver`] parses the module's connection string, asks an
//! [`ScmProvider`] for info about the working copy under a timeout, and turns
//! the answer into a [`RevisionInfo`] or a fatal [`crate::error::ScmError`].

pub mod provider;
pub mod repository;
pub mod resolver;

pub use provider::{CommandScmProvider, InfoItem, InfoResult, ScmProvider};
pub use repository::ScmRepository;
pub use resolver::{RevisionInfo, RevisionResolver, DEFAULT_SCM_TIMEOUT};
