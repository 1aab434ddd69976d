use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a [`crate::config::LanderConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// A discrete action outside the declared action space.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("action {0} is outside the action space 0..=3")]
pub struct ActionError(pub u8);
