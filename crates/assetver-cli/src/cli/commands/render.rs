//! `assetver render <manifest>` – emit every asset of a page manifest.

use anyhow::Result;
use assetver_core::config::RewriteConfig;
use assetver_core::manifest::AssetManifest;
use assetver_core::{install, FilterChain};
use std::path::Path;

pub fn run_render(cfg: RewriteConfig, path: &Path) -> Result<()> {
    let manifest = AssetManifest::from_path(path)?;
    let mut chain = FilterChain::new();
    install(cfg, &manifest.site_url, &mut chain)?;

    let rendered = manifest.render(&chain);
    if rendered.is_empty() {
        println!("No assets in manifest.");
        return Ok(());
    }

    println!("{:<7} {:<24} {}", "KIND", "HANDLE", "URL");
    for asset in rendered {
        println!(
            "{:<7} {:<24} {}",
            asset.kind.to_string(),
            asset.handle,
            asset.url
        );
    }
    Ok(())
}
