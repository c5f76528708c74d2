//! CLI route: single route table and run context. Dispatches to the manifest builder and output.

use crate::config::{ConfigLoader, LavenderConfig};
use crate::error::LavenderError;
use crate::fs::{LocalFs, ResourceFs};
use crate::manifest::builder::ManifestBuilder;
use crate::manifest::properties::PropertiesWriter;
use crate::module::Module;
use crate::scm::{CommandScmProvider, RevisionResolver, ScmProvider};
use crate::tree::path::canonicalize_dir;
use crate::tree::walker::ScannerConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::cli::output::{format_scan_json, format_scan_text};
use crate::cli::parse::Commands;

/// Runtime context for CLI execution: base directory, loaded configuration and collaborators.
pub struct RunContext {
    base_dir: PathBuf,
    config: LavenderConfig,
    fs: Arc<dyn ResourceFs>,
    provider: Arc<dyn ScmProvider>,
}

impl RunContext {
    /// Create run context from base directory and optional config path. Uses ConfigLoader only.
    pub fn new(base_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, LavenderError> {
        let base_dir = canonicalize_dir(&base_dir)?;
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&base_dir)?
        };

        Ok(Self::with_parts(
            base_dir,
            config,
            Arc::new(LocalFs),
            Arc::new(CommandScmProvider),
        ))
    }

    /// Assemble a context from explicit parts.
    pub fn with_parts(
        base_dir: PathBuf,
        config: LavenderConfig,
        fs: Arc<dyn ResourceFs>,
        provider: Arc<dyn ScmProvider>,
    ) -> Self {
        Self {
            base_dir,
            config,
            fs,
            provider,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &LavenderConfig {
        &self.config
    }

    /// Execute a command and return the text to print on success.
    pub async fn execute(&self, command: &Commands) -> Result<String, LavenderError> {
        let start = Instant::now();
        let result = match command {
            Commands::Generate {
                module,
                scm_connection,
                scm_developer_connection,
                scm_timeout,
            } => {
                let mut config = self.config.clone();
                module.apply(&mut config);
                if let Some(ref connection) = scm_connection {
                    config.scm.connection = Some(connection.clone());
                }
                if let Some(ref connection) = scm_developer_connection {
                    config.scm.developer_connection = Some(connection.clone());
                }
                if let Some(secs) = scm_timeout {
                    config.scm.timeout_secs = *secs;
                }
                self.handle_generate(&config).await
            }
            Commands::Scan { module, format } => {
                let mut config = self.config.clone();
                module.apply(&mut config);
                self.handle_scan(&config, format).await
            }
        };
        info!(
            duration_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "Command finished"
        );
        result
    }

    async fn handle_generate(&self, config: &LavenderConfig) -> Result<String, LavenderError> {
        let module = Module::from_config(config, &self.base_dir)?;
        let writer = PropertiesWriter::new(Arc::clone(&self.fs), module.layout.output_path());

        let manifest = self
            .builder(config)
            .generate(&module.descriptor, &module.layout, &writer)
            .await?;

        Ok(format!(
            "generated {} ({} resources)",
            writer.destination().display(),
            manifest.resources().len()
        ))
    }

    async fn handle_scan(
        &self,
        config: &LavenderConfig,
        format: &str,
    ) -> Result<String, LavenderError> {
        if format != "text" && format != "json" {
            return Err(LavenderError::Config(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                format
            )));
        }
        let module = Module::for_scan(config, &self.base_dir)?;
        let builder = self.builder(config);
        let filter = builder.validate(&module.descriptor, &module.layout)?;
        let index = builder.index(&module.layout.source_dir(), &filter).await?;

        match format {
            "json" => Ok(format_scan_json(&index)),
            _ => Ok(format_scan_text(&index)),
        }
    }

    fn builder(&self, config: &LavenderConfig) -> ManifestBuilder {
        let resolver =
            RevisionResolver::new(Arc::clone(&self.provider)).with_timeout(config.scm.timeout());
        ManifestBuilder::new(Arc::clone(&self.fs), resolver)
            .with_workers(config.effective_workers())
            .with_scanner_config(ScannerConfig {
                follow_symlinks: config.follow_symlinks,
            })
    }
}
