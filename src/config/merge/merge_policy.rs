//! Base layer for every config build.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with the values every other layer overrides.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("prompt.policy", "builtin")?
        .set_default("logging.level", "info")
}
