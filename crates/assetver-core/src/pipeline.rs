//! Installing the rewriter into the host's asset output hooks.
//!
//! The host calls every source filter registered for a kind, lowest priority
//! first, right before it emits the `<script>` or `<link>` tag. The rewriter
//! registers late so it sees URLs after other filters have run.

use std::borrow::Cow;
use std::sync::Arc;

use crate::config::RewriteConfig;
use crate::error::ConfigResult;
use crate::host::{AssetHost, AssetKind};
use crate::rewriter::AssetUrlRewriter;

/// Priority the rewriter registers at.
pub const LATE_PRIORITY: i32 = 9999;

/// A filter over outgoing asset URLs.
pub trait SrcFilter {
    fn filter_src<'a>(&self, host: &dyn AssetHost, src: &'a str, handle: &str) -> Cow<'a, str>;
}

impl SrcFilter for AssetUrlRewriter {
    fn filter_src<'a>(&self, host: &dyn AssetHost, src: &'a str, handle: &str) -> Cow<'a, str> {
        self.rewrite(host, src, handle)
    }
}

pub type SharedSrcFilter = Arc<dyn SrcFilter + Send + Sync>;

/// Host-side registration point for source filters.
pub trait LoaderHooks {
    fn add_src_filter(&mut self, kind: AssetKind, priority: i32, filter: SharedSrcFilter);
}

/// Ordered source filters per asset kind.
#[derive(Default)]
pub struct FilterChain {
    scripts: Vec<(i32, SharedSrcFilter)>,
    styles: Vec<(i32, SharedSrcFilter)>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    fn filters(&self, kind: AssetKind) -> &[(i32, SharedSrcFilter)] {
        match kind {
            AssetKind::Script => &self.scripts,
            AssetKind::Style => &self.styles,
        }
    }

    pub fn len(&self, kind: AssetKind) -> usize {
        self.filters(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.styles.is_empty()
    }

    /// Runs `src` through every filter registered for `kind`.
    pub fn apply(&self, kind: AssetKind, host: &dyn AssetHost, src: &str, handle: &str) -> String {
        let mut current = src.to_string();
        for (_, filter) in self.filters(kind) {
            let next = filter.filter_src(host, &current, handle).into_owned();
            current = next;
        }
        current
    }
}

impl LoaderHooks for FilterChain {
    fn add_src_filter(&mut self, kind: AssetKind, priority: i32, filter: SharedSrcFilter) {
        let list = match kind {
            AssetKind::Script => &mut self.scripts,
            AssetKind::Style => &mut self.styles,
        };
        // Equal priorities keep registration order.
        let pos = list.partition_point(|(p, _)| *p <= priority);
        list.insert(pos, (priority, filter));
    }
}

/// Builds the rewriter and registers it for scripts and styles.
///
/// Returns `Ok(None)` without touching `hooks` when rewriting is disabled.
pub fn install(
    config: RewriteConfig,
    site_url: &str,
    hooks: &mut dyn LoaderHooks,
) -> ConfigResult<Option<Arc<AssetUrlRewriter>>> {
    if !config.enabled {
        tracing::info!("asset url rewriting disabled; rewriter not installed");
        return Ok(None);
    }

    let rewriter = Arc::new(AssetUrlRewriter::new(config, site_url)?);
    for kind in [AssetKind::Script, AssetKind::Style] {
        hooks.add_src_filter(kind, LATE_PRIORITY, rewriter.clone());
    }
    tracing::info!(local_host = rewriter.local_host(), "asset url rewriter installed");
    Ok(Some(rewriter))
}
