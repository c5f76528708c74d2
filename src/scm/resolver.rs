//! Revision resolution with a bounded wait

use crate::error::ScmError;
use crate::scm::provider::ScmProvider;
use crate::scm::repository::ScmRepository;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const DEFAULT_SCM_TIMEOUT: Duration = Duration::from_secs(30);

/// Revision of the checked-out working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
    pub revision: String,
}

/// Resolves the current revision through an [`ScmProvider`]
///
/// Resolution is a precondition of manifest generation: there is no retry and
/// no caching, every call asks the provider again.
#[derive(Clone)]
pub struct RevisionResolver {
    provider: Arc<dyn ScmProvider>,
    timeout: Duration,
}

impl RevisionResolver {
    pub fn new(provider: Arc<dyn ScmProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_SCM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the revision checked out at `working_dir`.
    ///
    /// # Errors
    /// - malformed connection or unsupported provider
    /// - provider transport failure or timeout
    /// - provider reachable but reporting no items ([`ScmError::NoRevision`])
    /// - provider reporting failure ([`ScmError::Failed`])
    #[instrument(skip(self, working_dir), fields(working_dir = %working_dir.display()))]
    pub async fn resolve(
        &self,
        connection: &str,
        working_dir: &Path,
    ) -> Result<RevisionInfo, ScmError> {
        let repository = ScmRepository::parse(connection)?;

        let result = tokio::time::timeout(
            self.timeout,
            self.provider.info(&repository, working_dir),
        )
        .await
        .map_err(|_| {
            warn!(timeout_ms = self.timeout.as_millis(), "SCM info timed out");
            ScmError::Timeout(self.timeout)
        })??;

        let Some(first) = result.items.first() else {
            return Err(ScmError::NoRevision);
        };
        if !result.success {
            let message = if result.message.is_empty() {
                "provider reported failure".to_string()
            } else {
                result.message
            };
            return Err(ScmError::Failed(message));
        }

        let revision = first.revision.trim();
        if revision.is_empty() {
            return Err(ScmError::NoRevision);
        }

        info!(provider = %repository.provider, revision, "Resolved scm revision");
        Ok(RevisionInfo {
            revision: revision.to_string(),
        })
    }
}
