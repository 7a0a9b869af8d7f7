use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// What to do with a versioned asset served from another host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForeignHostPolicy {
    /// Leave the URL exactly as the host emitted it.
    #[default]
    Keep,
    /// Drop the `ver` query argument but do not touch the path.
    StripVersion,
}

/// Rewriter configuration loaded from `~/.config/assetver/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// When false the rewriter is never installed into the asset pipeline.
    pub enabled: bool,
    /// Literal that introduces the version in an emitted URL, e.g. `?ver=`.
    pub version_query_key_with_separator: String,
    /// Query key including its `=`, e.g. `ver=`.
    pub version_query_key: String,
    /// Registered version meaning "versioned elsewhere, leave alone".
    pub inline_version: String,
    /// Handles that always keep query-string versioning.
    pub skip_these_assets: BTreeSet<String>,
    /// Treatment of versioned assets on hosts other than the site's own.
    pub foreign_hosts: ForeignHostPolicy,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            version_query_key_with_separator: "?ver=".to_string(),
            version_query_key: "ver=".to_string(),
            inline_version: "inline".to_string(),
            skip_these_assets: ["admin-bar", "jquery-core", "jquery-migrate", "wp-embed"]
                .into_iter()
                .map(String::from)
                .collect(),
            foreign_hosts: ForeignHostPolicy::Keep,
        }
    }
}

impl RewriteConfig {
    /// Length of `version_query_key`, derived rather than configured.
    pub fn version_query_key_len(&self) -> usize {
        self.version_query_key.len()
    }

    /// Query parameter name without the trailing `=` (`ver`).
    pub fn version_param(&self) -> &str {
        self.version_query_key
            .strip_suffix('=')
            .unwrap_or(&self.version_query_key)
    }

    pub fn is_skipped(&self, handle: &str) -> bool {
        self.skip_these_assets.contains(handle)
    }

    /// Serializes the configuration in the on-disk format.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the rewriter cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        let key = &self.version_query_key;
        if self.version_query_key_len() < 2 || !key.ends_with('=') {
            return Err(ConfigError::validation(
                "version_query_key",
                format!("`{key}` must be a parameter name followed by `=`"),
            ));
        }
        if key.contains(['?', '&', '#', '/']) {
            return Err(ConfigError::validation(
                "version_query_key",
                format!("`{key}` must not contain URL delimiters"),
            ));
        }

        let expected = format!("?{key}");
        if self.version_query_key_with_separator != expected {
            return Err(ConfigError::validation(
                "version_query_key_with_separator",
                format!(
                    "`{}` does not match version_query_key; expected `{expected}`",
                    self.version_query_key_with_separator
                ),
            ));
        }

        if self.inline_version.trim().is_empty() {
            return Err(ConfigError::validation(
                "inline_version",
                "sentinel must not be empty",
            ));
        }

        if self.skip_these_assets.iter().any(|h| h.trim().is_empty()) {
            return Err(ConfigError::validation(
                "skip_these_assets",
                "handles must not be empty",
            ));
        }

        Ok(())
    }
}

pub fn config_path() -> ConfigResult<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetver")?;
    xdg_dirs
        .place_config_file("config.toml")
        .map_err(|source| ConfigError::Io {
            path: xdg_dirs.get_config_home().join("assetver").join("config.toml"),
            source,
        })
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> ConfigResult<RewriteConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RewriteConfig::default();
        write_default(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load and validate configuration from an explicit file.
pub fn load_from(path: &Path) -> ConfigResult<RewriteConfig> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: RewriteConfig = toml::from_str(&data).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    tracing::debug!(path = %path.display(), enabled = cfg.enabled, "loaded config");
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &RewriteConfig) -> ConfigResult<()> {
    let toml = cfg.to_toml()?;
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, toml).map_err(io_err)
}
