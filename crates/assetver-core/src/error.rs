//! Configuration error types.

use std::path::PathBuf;

/// Errors raised while loading, validating, or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or contains unknown keys.
    #[error("invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Writing the default config as TOML failed.
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value the rewriter cannot work with.
    #[error("invalid value for `{field}`: {message}")]
    Validation { field: String, message: String },

    /// The site's base URL cannot be used to decide which assets are local.
    #[error("invalid site URL `{url}`: {message}")]
    SiteUrl { url: String, message: String },

    /// XDG base directories could not be resolved.
    #[error("cannot resolve XDG directories: {0}")]
    Xdg(#[from] xdg::BaseDirectoriesError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.to_owned(),
            message: message.into(),
        }
    }
}
