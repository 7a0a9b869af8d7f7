//! URL modeling for asset sources.
//!
//! Splits an asset URL into scheme, host, path and query the way the
//! rewriter needs them. Absolute, protocol-relative (`//cdn.example.com/x.js`)
//! and path-only (`/js/x.js`) forms are accepted; only the first two carry a
//! host.

mod path;
mod query;

pub use path::{file_name, file_stem, stem_ends_with_digit};
pub use query::{has_version_query, strip_query_param};

use url::{ParseError, Url};

/// Base used only to run path-only URLs through the `url` parser.
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// Parsed components of an asset URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrl {
    /// `None` for protocol-relative and path-only URLs.
    pub scheme: Option<String>,
    /// Lower-cased host; `None` for path-only URLs.
    pub host: Option<String>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl AssetUrl {
    /// Parses `raw`, returning `None` when it is not a usable URL.
    ///
    /// # Examples
    ///
    /// - `https://example.com/a.js?ver=1` → scheme `https`, host `example.com`
    /// - `//cdn.example.com/a.js` → no scheme, host `cdn.example.com`
    /// - `/a.js?ver=1` → no scheme, no host
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }

        if raw.starts_with("//") {
            let parsed = Url::parse(&format!("http:{raw}")).ok()?;
            parsed.host_str()?;
            return Some(Self::from_url(&parsed, None));
        }

        match Url::parse(raw) {
            Ok(parsed) => {
                if parsed.cannot_be_a_base() {
                    return None;
                }
                Some(Self::from_url(&parsed, Some(parsed.scheme().to_string())))
            }
            Err(ParseError::RelativeUrlWithoutBase) => {
                let base = Url::parse(RELATIVE_BASE).ok()?;
                let parsed = Url::options().base_url(Some(&base)).parse(raw).ok()?;
                let mut url = Self::from_url(&parsed, None);
                url.host = None;
                Some(url)
            }
            Err(_) => None,
        }
    }

    fn from_url(parsed: &Url, scheme: Option<String>) -> Self {
        Self {
            scheme,
            host: parsed.host_str().map(str::to_ascii_lowercase),
            path: parsed.path().to_string(),
            query: parsed.query().map(str::to_string),
            fragment: parsed.fragment().map(str::to_string),
        }
    }

    pub fn is_relative(&self) -> bool {
        self.host.is_none()
    }
}

/// Host portion of the site's base URL, used to tell local assets from foreign ones.
pub fn site_host(site_url: &str) -> Option<String> {
    let parsed = Url::parse(site_url).ok()?;
    parsed.host_str().map(str::to_ascii_lowercase)
}
