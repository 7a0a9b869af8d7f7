//! `assetver rewrite <url>` – print the URL the rewriter would emit.

use anyhow::Result;
use assetver_core::config::RewriteConfig;
use assetver_core::{
    install, AssetKind, AssetRegistry, FilterChain, HostView, RegisteredAsset, RequestContext,
};

use crate::cli::AssetArgs;

/// Registry holding only the asset described on the command line.
pub(super) fn single_asset_registry(args: &AssetArgs) -> AssetRegistry {
    let mut registry = AssetRegistry::new();
    registry.register(
        AssetKind::from(args.kind),
        &args.handle,
        RegisteredAsset {
            src: args.url.clone(),
            ver: args.ver.clone(),
        },
    );
    registry
}

pub fn run_rewrite(cfg: RewriteConfig, args: &AssetArgs) -> Result<()> {
    let mut chain = FilterChain::new();
    if install(cfg, &args.site_url, &mut chain)?.is_none() {
        tracing::info!("rewriting disabled; printing url unchanged");
    }

    let registry = single_asset_registry(args);
    let host = HostView::new(&registry, RequestContext { admin: args.admin });
    let url = chain.apply(args.kind.into(), &host, &args.url, &args.handle);
    println!("{url}");
    Ok(())
}
