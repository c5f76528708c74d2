//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// These must agree with the serde defaults in [`crate::config`].
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("module.packaging", "jar")?
        .set_default("module.build_dir", "target")?
        .set_default("module.includes", "")?
        .set_default("module.excludes", "htdocs/**/*")?
        .set_default("scm.timeout_secs", 30)?
        .set_default("workers", 0)?
        .set_default("follow_symlinks", true)
}
