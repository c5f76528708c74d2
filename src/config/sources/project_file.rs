//! Project config file source: `<base_dir>/lavender.toml`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const PROJECT_CONFIG_FILE: &str = "lavender.toml";

/// Path of the project config file for a module base directory.
pub fn project_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(PROJECT_CONFIG_FILE)
}

/// Add the project config file to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = project_config_path(base_dir);
    if !path.is_file() {
        debug!(config_path = %path.display(), "No project configuration file");
        return Ok(builder);
    }
    Ok(builder.add_source(File::from(path).required(false)))
}

/// Add an explicitly requested config file; it must exist.
pub fn add_explicit_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path.to_path_buf()).required(true)))
}
