//! Host environment seen by the rewriter.
//!
//! The rewriter never owns asset registrations or request state; it asks the
//! host through [`AssetHost`]. [`AssetRegistry`] and [`HostView`] are an
//! in-memory host used by the CLI, the manifest renderer and tests.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Read-only view of the host for one request.
pub trait AssetHost {
    /// Whether the current request renders the administrative back end.
    fn is_admin(&self) -> bool;

    /// Version registered for `handle`, or `None` when the handle is unknown
    /// or was registered without a version.
    fn registered_version(&self, handle: &str) -> Option<&str>;
}

/// Kind of enqueued asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Script,
    Style,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Script => write!(f, "script"),
            AssetKind::Style => write!(f, "style"),
        }
    }
}

/// A registered script or stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredAsset {
    pub src: String,
    pub ver: Option<String>,
}

#[derive(Debug, Default)]
struct AssetTable {
    order: Vec<String>,
    assets: HashMap<String, RegisteredAsset>,
}

impl AssetTable {
    fn register(&mut self, handle: &str, asset: RegisteredAsset) -> bool {
        if self.assets.contains_key(handle) {
            return false;
        }
        self.order.push(handle.to_string());
        self.assets.insert(handle.to_string(), asset);
        true
    }
}

/// Registered scripts and styles, keyed by handle.
#[derive(Debug, Default)]
pub struct AssetRegistry {
    scripts: AssetTable,
    styles: AssetTable,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, kind: AssetKind) -> &AssetTable {
        match kind {
            AssetKind::Script => &self.scripts,
            AssetKind::Style => &self.styles,
        }
    }

    /// Registers an asset. Returns false (and keeps the first registration)
    /// when the handle is already taken for this kind.
    pub fn register(&mut self, kind: AssetKind, handle: &str, asset: RegisteredAsset) -> bool {
        let table = match kind {
            AssetKind::Script => &mut self.scripts,
            AssetKind::Style => &mut self.styles,
        };
        let added = table.register(handle, asset);
        if !added {
            tracing::debug!(%kind, handle, "handle already registered; keeping first");
        }
        added
    }

    pub fn get(&self, kind: AssetKind, handle: &str) -> Option<&RegisteredAsset> {
        self.table(kind).assets.get(handle)
    }

    /// Handles of `kind` in registration order.
    pub fn handles(&self, kind: AssetKind) -> impl Iterator<Item = &str> {
        self.table(kind).order.iter().map(String::as_str)
    }

    /// Registration for `handle`, scripts first, then styles.
    pub fn lookup(&self, handle: &str) -> Option<&RegisteredAsset> {
        self.get(AssetKind::Script, handle)
            .or_else(|| self.get(AssetKind::Style, handle))
    }

    /// URL the host emits for an asset before any filter runs: `src` with the
    /// registered version appended as the `ver` query argument.
    pub fn loader_src(&self, kind: AssetKind, handle: &str) -> Option<String> {
        let asset = self.get(kind, handle)?;
        Some(match asset.ver.as_deref() {
            Some(ver) if !ver.is_empty() => {
                let separator = if asset.src.contains('?') { '&' } else { '?' };
                format!("{}{separator}ver={ver}", asset.src)
            }
            _ => asset.src.clone(),
        })
    }
}

/// Per-request state supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub admin: bool,
}

/// Registry plus request context, presented to the rewriter as an [`AssetHost`].
#[derive(Debug, Clone, Copy)]
pub struct HostView<'a> {
    pub registry: &'a AssetRegistry,
    pub context: RequestContext,
}

impl<'a> HostView<'a> {
    pub fn new(registry: &'a AssetRegistry, context: RequestContext) -> Self {
        Self { registry, context }
    }
}

impl AssetHost for HostView<'_> {
    fn is_admin(&self) -> bool {
        self.context.admin
    }

    fn registered_version(&self, handle: &str) -> Option<&str> {
        self.registry.lookup(handle)?.ver.as_deref()
    }
}
