//! JSON description of one page render: the site, the request context and
//! every enqueued script and style.
//!
//! ```json
//! {
//!   "site_url": "https://example.com",
//!   "admin": false,
//!   "scripts": [{ "handle": "app", "src": "/js/app.js", "ver": "1.2.3" }],
//!   "styles": [{ "handle": "theme", "src": "/style.css", "ver": null }]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::host::{AssetKind, AssetRegistry, HostView, RegisteredAsset, RequestContext};
use crate::pipeline::FilterChain;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetManifest {
    pub site_url: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub scripts: Vec<ManifestAsset>,
    #[serde(default)]
    pub styles: Vec<ManifestAsset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestAsset {
    pub handle: String,
    pub src: String,
    #[serde(default)]
    pub ver: Option<String>,
}

/// One asset as the page would emit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedAsset {
    pub kind: AssetKind,
    pub handle: String,
    /// URL before filters ran.
    pub emitted: String,
    /// URL after filters ran.
    pub url: String,
}

impl AssetManifest {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data =
            fs::read_to_string(path).with_context(|| format!("read manifest {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("parse manifest {}", path.display()))
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(data)?;
        Ok(manifest)
    }

    pub fn context(&self) -> RequestContext {
        RequestContext { admin: self.admin }
    }

    pub fn to_registry(&self) -> AssetRegistry {
        let mut registry = AssetRegistry::new();
        let entries = self
            .scripts
            .iter()
            .map(|a| (AssetKind::Script, a))
            .chain(self.styles.iter().map(|a| (AssetKind::Style, a)));
        for (kind, asset) in entries {
            registry.register(
                kind,
                &asset.handle,
                RegisteredAsset {
                    src: asset.src.clone(),
                    ver: asset.ver.clone(),
                },
            );
        }
        registry
    }

    /// Emits every registered asset, scripts first, through `chain`.
    pub fn render(&self, chain: &FilterChain) -> Vec<RenderedAsset> {
        let registry = self.to_registry();
        let host = HostView::new(&registry, self.context());

        let mut out = Vec::with_capacity(self.scripts.len() + self.styles.len());
        for kind in [AssetKind::Script, AssetKind::Style] {
            for handle in registry.handles(kind) {
                let Some(emitted) = registry.loader_src(kind, handle) else {
                    continue;
                };
                let url = chain.apply(kind, &host, &emitted, handle);
                out.push(RenderedAsset {
                    kind,
                    handle: handle.to_string(),
                    emitted,
                    url,
                });
            }
        }
        tracing::debug!(assets = out.len(), "rendered manifest");
        out
    }
}
