//! SCM providers: the external collaborator that knows the checked-out revision

use crate::error::ScmError;
use crate::scm::repository::ScmRepository;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// One info record reported by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoItem {
    pub revision: String,
}

/// Provider answer for an info request
///
/// A reachable provider can still report failure or report no items; the
/// resolver treats both as fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoResult {
    pub success: bool,
    pub items: Vec<InfoItem>,
    pub message: String,
}

impl InfoResult {
    pub fn success(items: Vec<InfoItem>) -> Self {
        Self {
            success: true,
            items,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Asks a version-control system about a working copy
#[async_trait]
pub trait ScmProvider: Send + Sync {
    /// Report info for the working copy at `working_dir`.
    ///
    /// Return `Err` for transport problems (tool missing, unreachable),
    /// `Ok` with an unsuccessful [`InfoResult`] when the tool answered but
    /// reported failure.
    async fn info(
        &self,
        repository: &ScmRepository,
        working_dir: &Path,
    ) -> Result<InfoResult, ScmError>;
}

/// Provider backed by the `git` and `svn` command-line tools
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandScmProvider;

impl CommandScmProvider {
    fn command_for(provider: &str) -> Result<(&'static str, &'static [&'static str]), ScmError> {
        match provider {
            "git" => Ok(("git", &["rev-parse", "HEAD"])),
            "svn" => Ok(("svn", &["info", "--show-item", "revision"])),
            other => Err(ScmError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[async_trait]
impl ScmProvider for CommandScmProvider {
    async fn info(
        &self,
        repository: &ScmRepository,
        working_dir: &Path,
    ) -> Result<InfoResult, ScmError> {
        let (program, args) = Self::command_for(&repository.provider)?;
        debug!(program, ?args, working_dir = %working_dir.display(), "Running scm info");

        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ScmError::Transport(format!("failed to run {program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Ok(InfoResult::failure(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let items = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| InfoItem {
                revision: line.to_string(),
            })
            .collect();
        Ok(InfoResult::success(items))
    }
}
