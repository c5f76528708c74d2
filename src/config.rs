//! Configuration System
//!
//! Layered configuration for one manifest run. Precedence, lowest first:
//! built-in defaults, `<base_dir>/lavender.toml` (or an explicit file),
//! `LAVENDER_*` environment variables, and finally CLI flags applied by the
//! caller.

use crate::logging::LoggingConfig;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod merge;
mod sources;

pub use sources::environment::ENV_PREFIX;
pub use sources::project_file::{project_config_path, PROJECT_CONFIG_FILE};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LavenderConfig {
    #[serde(default)]
    pub module: ModuleConfig,

    #[serde(default)]
    pub scm: ScmConfig,

    /// Fingerprinting workers; 0 means one per available CPU
    #[serde(default)]
    pub workers: usize,

    /// Follow symbolic links while scanning; when off, a link is an error
    #[serde(default = "default_follow_symlinks")]
    pub follow_symlinks: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_follow_symlinks() -> bool {
    true
}

impl Default for LavenderConfig {
    fn default() -> Self {
        Self {
            module: ModuleConfig::default(),
            scm: ScmConfig::default(),
            workers: 0,
            follow_symlinks: default_follow_symlinks(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Build-tool facts about the module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub artifact_id: Option<String>,

    /// Packaging kind; `war` means webapp
    #[serde(default = "default_packaging")]
    pub packaging: String,

    /// Build output directory, relative to the base directory unless absolute
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Comma-separated include globs; empty includes everything
    #[serde(default)]
    pub includes: String,

    /// Comma-separated exclude globs
    #[serde(default = "default_excludes")]
    pub excludes: String,
}

fn default_packaging() -> String {
    "jar".to_string()
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("target")
}

fn default_excludes() -> String {
    // Output of earlier lavender runs is already fingerprinted
    "htdocs/**/*".to_string()
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            artifact_id: None,
            packaging: default_packaging(),
            build_dir: default_build_dir(),
            includes: String::new(),
            excludes: default_excludes(),
        }
    }
}

/// Version-control coordinates of the module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScmConfig {
    /// Maven-style connection, e.g. `scm:git:https://host/repo.git`
    pub connection: Option<String>,

    pub developer_connection: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ScmConfig {
    fn default() -> Self {
        Self {
            connection: None,
            developer_connection: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Module(String),
    Scm(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Module(msg) => write!(f, "module: {}", msg),
            ValidationError::Scm(msg) => write!(f, "scm: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl LavenderConfig {
    /// Validate the entire configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.module_errors();
        errors.extend(self.scm_errors());
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate only what a scan needs (no version-control settings)
    pub fn validate_module(&self) -> Result<(), Vec<ValidationError>> {
        let errors = self.module_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn module_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        match self.module.artifact_id.as_deref().map(str::trim) {
            None | Some("") => errors.push(ValidationError::Module(
                "artifact_id is required".to_string(),
            )),
            Some(id) if id.contains('/') || id.contains('\\') => errors.push(
                ValidationError::Module(format!("artifact_id '{}' must not contain path separators", id)),
            ),
            Some(_) => {}
        }
        if self.module.packaging.trim().is_empty() {
            errors.push(ValidationError::Module(
                "packaging cannot be empty".to_string(),
            ));
        }
        if self.module.build_dir.as_os_str().is_empty() {
            errors.push(ValidationError::Module(
                "build_dir cannot be empty".to_string(),
            ));
        }
        errors
    }

    fn scm_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        match self.scm.connection.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(ValidationError::Scm("connection is required".to_string()))
            }
            Some(_) => {}
        }
        if self.scm.timeout_secs == 0 {
            errors.push(ValidationError::Scm(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        errors
    }

    /// Worker count with the "0 = available parallelism" rule applied
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    }
}

/// Loads [`LavenderConfig`] from its layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, `<base_dir>/lavender.toml` if present, then environment.
    pub fn load(base_dir: &Path) -> Result<LavenderConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::project_file::add_to_builder(builder, base_dir)?;
        let builder = sources::environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load defaults, the given file (which must exist), then environment.
    pub fn load_from_file(path: &Path) -> Result<LavenderConfig, ConfigError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::project_file::add_explicit_to_builder(builder, path)?;
        let builder = sources::environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }
}
