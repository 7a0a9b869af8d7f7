//! `assetver config` – show the resolved configuration or its location.

use anyhow::Result;
use assetver_core::config::{self, RewriteConfig};
use std::path::Path;

pub fn run_config(cfg: &RewriteConfig, explicit: Option<&Path>, path_only: bool) -> Result<()> {
    if path_only {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => config::config_path()?,
        };
        println!("{}", path.display());
        return Ok(());
    }

    print!("{}", cfg.to_toml()?);
    Ok(())
}
