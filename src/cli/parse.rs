//! CLI parse: clap types for Lavender. No behavior beyond applying flags to configuration.

use crate::config::LavenderConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Lavender CLI - resource manifest generator
#[derive(Parser)]
#[command(name = "lavender")]
#[command(about = "Generate fingerprinted resource manifests for build modules")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Module base directory
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Configuration file path (overrides <base-dir>/lavender.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the revision, fingerprint resources and write the manifest
    Generate {
        #[command(flatten)]
        module: ModuleArgs,

        /// SCM connection, e.g. scm:git:https://host/repo.git
        #[arg(long)]
        scm_connection: Option<String>,

        /// SCM developer connection
        #[arg(long)]
        scm_developer_connection: Option<String>,

        /// SCM timeout in seconds
        #[arg(long)]
        scm_timeout: Option<u64>,
    },
    /// Fingerprint resources without resolving a revision or writing anything
    Scan {
        #[command(flatten)]
        module: ModuleArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Module flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ModuleArgs {
    /// Module artifact id
    #[arg(long)]
    pub artifact_id: Option<String>,

    /// Packaging kind (war = webapp)
    #[arg(long)]
    pub packaging: Option<String>,

    /// Build output directory
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Comma-separated include globs
    #[arg(long)]
    pub includes: Option<String>,

    /// Comma-separated exclude globs
    #[arg(long)]
    pub excludes: Option<String>,

    /// Concurrent fingerprinting workers (0 = one per CPU)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Fail on symbolic links instead of following them
    #[arg(long)]
    pub no_follow_symlinks: bool,
}

impl ModuleArgs {
    /// Override configuration values with the flags that were given.
    pub fn apply(&self, config: &mut LavenderConfig) {
        if let Some(ref artifact_id) = self.artifact_id {
            config.module.artifact_id = Some(artifact_id.clone());
        }
        if let Some(ref packaging) = self.packaging {
            config.module.packaging = packaging.clone();
        }
        if let Some(ref build_dir) = self.build_dir {
            config.module.build_dir = build_dir.clone();
        }
        if let Some(ref includes) = self.includes {
            config.module.includes = includes.clone();
        }
        if let Some(ref excludes) = self.excludes {
            config.module.excludes = excludes.clone();
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.no_follow_symlinks {
            config.follow_symlinks = false;
        }
    }
}
