//! Module identity and on-disk layout
//!
//! Packaging decides almost everything about where a module keeps its
//! resources and where the manifest goes:
//!
//! | packaging | name          | source root          | prefix                  | manifest                                        |
//! |-----------|---------------|----------------------|-------------------------|-------------------------------------------------|
//! | `war`     | `webapp`      | `src/main/webapp`    | empty                   | `<build>/<artifact>/WEB-INF/lavender.properties` |
//! | other     | `<artifact>`  | `src/main/resources` | `modules/<artifact>/`   | `<build>/classes/META-INF/lavender.properties`   |

use crate::config::{LavenderConfig, ValidationError};
use crate::error::LavenderError;
use crate::tree::filter::split_patterns;
use std::path::{Path, PathBuf};

pub const PROPERTIES_FILE_NAME: &str = "lavender.properties";

/// Packaging kind of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packaging {
    Webapp,
    Library,
}

impl Packaging {
    /// `war` is a webapp, everything else a library
    pub fn from_kind(kind: &str) -> Self {
        if kind.trim() == "war" {
            Packaging::Webapp
        } else {
            Packaging::Library
        }
    }

    pub fn is_webapp(self) -> bool {
        self == Packaging::Webapp
    }

    /// Resource directory relative to the module base directory
    pub fn source_root(self) -> &'static str {
        match self {
            Packaging::Webapp => "src/main/webapp",
            Packaging::Library => "src/main/resources",
        }
    }

    fn config_dir(self) -> &'static str {
        match self {
            Packaging::Webapp => "WEB-INF",
            Packaging::Library => "META-INF",
        }
    }
}

/// Identity and scan configuration of one module
///
/// Derived once from packaging and configuration; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    name: String,
    packaging: Packaging,
    source_root: String,
    resource_path_prefix: String,
    scm_connection: String,
    scm_devel_connection: String,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
}

impl ModuleDescriptor {
    pub fn new(
        artifact_id: &str,
        packaging: Packaging,
        scm_connection: impl Into<String>,
        scm_devel_connection: impl Into<String>,
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
    ) -> Self {
        let (name, resource_path_prefix) = match packaging {
            Packaging::Webapp => ("webapp".to_string(), String::new()),
            Packaging::Library => (artifact_id.to_string(), format!("modules/{artifact_id}/")),
        };
        Self {
            name,
            packaging,
            source_root: packaging.source_root().to_string(),
            resource_path_prefix,
            scm_connection: scm_connection.into(),
            scm_devel_connection: scm_devel_connection.into(),
            include_patterns,
            exclude_patterns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_webapp(&self) -> bool {
        self.packaging.is_webapp()
    }

    pub fn source_root(&self) -> &str {
        &self.source_root
    }

    pub fn resource_path_prefix(&self) -> &str {
        &self.resource_path_prefix
    }

    pub fn scm_connection(&self) -> &str {
        &self.scm_connection
    }

    pub fn scm_devel_connection(&self) -> &str {
        &self.scm_devel_connection
    }

    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }
}

/// Filesystem locations of one module build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    base_dir: PathBuf,
    build_dir: PathBuf,
    artifact_id: String,
    packaging: Packaging,
}

impl ModuleLayout {
    /// `build_dir` is resolved against `base_dir` when relative.
    pub fn new(
        base_dir: impl Into<PathBuf>,
        build_dir: impl AsRef<Path>,
        artifact_id: impl Into<String>,
        packaging: Packaging,
    ) -> Self {
        let base_dir = base_dir.into();
        let build_dir = base_dir.join(build_dir.as_ref());
        Self {
            base_dir,
            build_dir,
            artifact_id: artifact_id.into(),
            packaging,
        }
    }

    /// Module base directory; also the SCM working copy location
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Directory whose files are indexed
    pub fn source_dir(&self) -> PathBuf {
        self.base_dir.join(self.packaging.source_root())
    }

    /// Where the generated manifest is written
    pub fn output_path(&self) -> PathBuf {
        let dir = match self.packaging {
            Packaging::Webapp => self.build_dir.join(&self.artifact_id).join("WEB-INF"),
            Packaging::Library => self.build_dir.join("classes").join("META-INF"),
        };
        dir.join(PROPERTIES_FILE_NAME)
    }

    /// Hand-written properties file that is no longer supported; must be absent or blank
    pub fn legacy_properties_path(&self) -> PathBuf {
        self.source_dir()
            .join(self.packaging.config_dir())
            .join(PROPERTIES_FILE_NAME)
    }
}

/// Descriptor and layout of the module being processed
#[derive(Debug, Clone)]
pub struct Module {
    pub descriptor: ModuleDescriptor,
    pub layout: ModuleLayout,
}

impl Module {
    /// Build the module from validated configuration.
    ///
    /// # Errors
    /// Returns [`LavenderError::Config`] listing every validation problem.
    pub fn from_config(config: &LavenderConfig, base_dir: &Path) -> Result<Self, LavenderError> {
        config.validate().map_err(validation_failed)?;
        Ok(Self::assemble(config, base_dir))
    }

    /// Build the module without requiring version-control settings.
    pub fn for_scan(config: &LavenderConfig, base_dir: &Path) -> Result<Self, LavenderError> {
        config.validate_module().map_err(validation_failed)?;
        Ok(Self::assemble(config, base_dir))
    }

    fn assemble(config: &LavenderConfig, base_dir: &Path) -> Self {
        let artifact_id = config.module.artifact_id.clone().unwrap_or_default();
        let packaging = Packaging::from_kind(&config.module.packaging);

        let descriptor = ModuleDescriptor::new(
            &artifact_id,
            packaging,
            config.scm.connection.clone().unwrap_or_default(),
            config.scm.developer_connection.clone().unwrap_or_default(),
            split_patterns(&config.module.includes),
            split_patterns(&config.module.excludes),
        );
        let layout = ModuleLayout::new(base_dir, &config.module.build_dir, artifact_id, packaging);

        Self { descriptor, layout }
    }
}

fn validation_failed(errors: Vec<ValidationError>) -> LavenderError {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    LavenderError::Config(messages.join("; "))
}
