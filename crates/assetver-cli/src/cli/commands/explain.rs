//! `assetver explain <url>` – show which check decides the outcome.

use anyhow::Result;
use assetver_core::config::RewriteConfig;
use assetver_core::url_model::AssetUrl;
use assetver_core::{AssetUrlRewriter, HostView, RequestContext};

use super::rewrite::single_asset_registry;
use crate::cli::AssetArgs;

pub fn run_explain(cfg: RewriteConfig, args: &AssetArgs) -> Result<()> {
    if !cfg.enabled {
        println!("disabled: rewriter is not installed");
        return Ok(());
    }

    let rewriter = AssetUrlRewriter::new(cfg, &args.site_url)?;
    let registry = single_asset_registry(args);
    let host = HostView::new(&registry, RequestContext { admin: args.admin });

    match AssetUrl::parse(&args.url) {
        Some(parsed) => println!("{}", describe_url(&parsed)),
        None => println!("url: unparsable"),
    }
    let decision = rewriter.decide(&host, &args.url, &args.handle);
    println!("{decision}");
    println!("{}", rewriter.rewrite(&host, &args.url, &args.handle));
    Ok(())
}

/// One-line summary of the parts the rewriter looks at.
pub(crate) fn describe_url(url: &AssetUrl) -> String {
    let host = if url.is_relative() {
        "(relative)"
    } else {
        url.host.as_deref().unwrap_or("-")
    };
    format!(
        "url: scheme={} host={} path={} query={} fragment={}",
        url.scheme.as_deref().unwrap_or("-"),
        host,
        url.path,
        url.query.as_deref().unwrap_or("-"),
        url.fragment.as_deref().unwrap_or("-"),
    )
}
