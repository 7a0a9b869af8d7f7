//! A visitor-facing page on `example.com` with a few registered assets.

use assetver_core::{
    AssetKind, AssetRegistry, AssetUrlRewriter, HostView, RegisteredAsset, RequestContext,
    RewriteConfig,
};

pub const SITE_URL: &str = "https://example.com";

pub fn rewriter() -> AssetUrlRewriter {
    AssetUrlRewriter::new(RewriteConfig::default(), SITE_URL).expect("default config is valid")
}

/// Registry with one script per `(handle, ver)` pair; `src` is irrelevant to lookups.
pub fn registry(entries: &[(&str, Option<&str>)]) -> AssetRegistry {
    let mut registry = AssetRegistry::new();
    for (handle, ver) in entries {
        registry.register(
            AssetKind::Script,
            handle,
            RegisteredAsset {
                src: format!("/js/{handle}.js"),
                ver: ver.map(str::to_string),
            },
        );
    }
    registry
}

pub fn visitor(registry: &AssetRegistry) -> HostView<'_> {
    HostView::new(registry, RequestContext { admin: false })
}

pub fn admin(registry: &AssetRegistry) -> HostView<'_> {
    HostView::new(registry, RequestContext { admin: true })
}
