//! Environment source: `LAVENDER_<SECTION>__<KEY>` variables, e.g.
//! `LAVENDER_MODULE__ARTIFACT_ID` or `LAVENDER_SCM__TIMEOUT_SECS`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "LAVENDER";

/// Add environment overrides to builder.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
