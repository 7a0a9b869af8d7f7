//! Moves cache-busting versions of script and style URLs from the query
//! string into the file name (`app.js?ver=1.2` → `app.1.2.js`).

pub mod config;
pub mod error;
pub mod logging;

pub mod host;
pub mod manifest;
pub mod pipeline;
pub mod rewriter;
pub mod url_model;

pub use config::{ForeignHostPolicy, RewriteConfig};
pub use error::{ConfigError, ConfigResult};
pub use host::{AssetHost, AssetKind, AssetRegistry, HostView, RegisteredAsset, RequestContext};
pub use pipeline::{install, FilterChain, LoaderHooks, SrcFilter};
pub use rewriter::{AssetUrlRewriter, RewriteDecision, SkipReason};
