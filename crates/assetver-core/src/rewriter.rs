//! Moves an asset's version from the query string into its file name.
//!
//! `https://example.com/js/app.js?ver=1.2.3` becomes
//! `https://example.com/js/app.1.2.3.js`, so caches that ignore query strings
//! still see a new URL for every release.
//!
//! The rewrite never fails: whenever a URL is ambiguous, foreign, excluded or
//! unparsable it is returned exactly as given. [`RewriteDecision`] records
//! which check short-circuited.

use std::borrow::Cow;
use std::fmt;

use regex::Regex;

use crate::config::{ForeignHostPolicy, RewriteConfig};
use crate::error::{ConfigError, ConfigResult};
use crate::host::AssetHost;
use crate::url_model::{self, AssetUrl};

/// Recognized extensions, longest first so `.min.js` wins over `.js`.
const EXTENSIONS: &str = r"min\.js|min\.css|js|css";

/// Why a URL was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Request renders the administrative back end.
    AdminContext,
    /// Handle is in `skip_these_assets`.
    ExcludedHandle,
    /// No registration, or registered without a version.
    Unregistered,
    /// Registered version is the inline sentinel.
    InlineVersion,
    /// URL could not be parsed.
    Unparsable,
    /// Nothing to move: no `?ver=` in the URL.
    NoVersionQuery,
    /// File name already ends in a digit.
    AlreadyVersioned,
    /// Served from a host other than the site's own.
    ForeignHost,
    /// URL does not end in a recognized extension followed by the version query.
    UnrecognizedExtension,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::AdminContext => "admin context",
            SkipReason::ExcludedHandle => "excluded handle",
            SkipReason::Unregistered => "no registered version",
            SkipReason::InlineVersion => "inline version",
            SkipReason::Unparsable => "unparsable url",
            SkipReason::NoVersionQuery => "no version query",
            SkipReason::AlreadyVersioned => "already versioned",
            SkipReason::ForeignHost => "foreign host",
            SkipReason::UnrecognizedExtension => "unrecognized extension",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the checks for one asset URL. Slices borrow from the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteDecision<'a> {
    /// Emit `{prefix}.{version}.{extension}`.
    Rewrite {
        prefix: &'a str,
        version: &'a str,
        extension: &'a str,
    },
    /// Foreign host under [`ForeignHostPolicy::StripVersion`]: drop the `ver` argument.
    StripVersion,
    Skip(SkipReason),
}

impl fmt::Display for RewriteDecision<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteDecision::Rewrite {
                version, extension, ..
            } => write!(f, "rewrite version={version} extension={extension}"),
            RewriteDecision::StripVersion => write!(f, "strip version (foreign host)"),
            RewriteDecision::Skip(reason) => write!(f, "skip: {reason}"),
        }
    }
}

/// Rewrites asset URLs for one site. Immutable once built; share it by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct AssetUrlRewriter {
    config: RewriteConfig,
    local_host: String,
    pattern: Regex,
}

impl AssetUrlRewriter {
    /// Validates `config` and resolves the local host from `site_url`.
    pub fn new(config: RewriteConfig, site_url: &str) -> ConfigResult<Self> {
        config.validate()?;

        let local_host = url_model::site_host(site_url).ok_or_else(|| ConfigError::SiteUrl {
            url: site_url.to_string(),
            message: "expected an absolute URL with a host".to_string(),
        })?;

        let pattern = Regex::new(&format!(
            r"\.({EXTENSIONS}){}(.+)$",
            regex::escape(&config.version_query_key_with_separator)
        ))
        .map_err(|e| ConfigError::validation("version_query_key_with_separator", e.to_string()))?;

        tracing::debug!(local_host = %local_host, "asset url rewriter ready");

        Ok(Self {
            config,
            local_host,
            pattern,
        })
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    pub fn local_host(&self) -> &str {
        &self.local_host
    }

    /// Runs every check against `url` without building the result.
    pub fn decide<'a, H>(&self, host: &H, url: &'a str, handle: &str) -> RewriteDecision<'a>
    where
        H: AssetHost + ?Sized,
    {
        use RewriteDecision::Skip;

        if host.is_admin() {
            return Skip(SkipReason::AdminContext);
        }

        if self.config.is_skipped(handle) {
            return Skip(SkipReason::ExcludedHandle);
        }

        match host.registered_version(handle) {
            None | Some("") => return Skip(SkipReason::Unregistered),
            Some(ver) if ver == self.config.inline_version => {
                return Skip(SkipReason::InlineVersion)
            }
            Some(_) => {}
        }

        let Some(parsed) = AssetUrl::parse(url) else {
            return Skip(SkipReason::Unparsable);
        };

        let has_version = parsed
            .query
            .as_deref()
            .is_some_and(|q| url_model::has_version_query(q, &self.config.version_query_key));
        if !has_version {
            return Skip(SkipReason::NoVersionQuery);
        }

        if url_model::stem_ends_with_digit(&parsed.path) {
            return Skip(SkipReason::AlreadyVersioned);
        }

        // Both sides are lower-cased, so `EXAMPLE.com` is local.
        if let Some(asset_host) = parsed.host.as_deref() {
            if asset_host != self.local_host {
                return match self.config.foreign_hosts {
                    ForeignHostPolicy::Keep => Skip(SkipReason::ForeignHost),
                    ForeignHostPolicy::StripVersion => RewriteDecision::StripVersion,
                };
            }
        }

        let Some(caps) = self.pattern.captures(url) else {
            return Skip(SkipReason::UnrecognizedExtension);
        };
        match (caps.get(0), caps.get(1), caps.get(2)) {
            (Some(whole), Some(extension), Some(version)) => RewriteDecision::Rewrite {
                prefix: &url[..whole.start()],
                version: version.as_str(),
                extension: extension.as_str(),
            },
            _ => Skip(SkipReason::UnrecognizedExtension),
        }
    }

    /// Returns `url` with its version moved into the file name, or `url`
    /// unchanged when any check says to leave it alone.
    pub fn rewrite<'a, H>(&self, host: &H, url: &'a str, handle: &str) -> Cow<'a, str>
    where
        H: AssetHost + ?Sized,
    {
        match self.decide(host, url, handle) {
            RewriteDecision::Rewrite {
                prefix,
                version,
                extension,
            } => {
                let rewritten = format!("{prefix}.{version}.{extension}");
                tracing::debug!(handle, from = url, to = %rewritten, "moved asset version into path");
                Cow::Owned(rewritten)
            }
            RewriteDecision::StripVersion => {
                tracing::debug!(handle, url, "stripped version from foreign asset");
                url_model::strip_query_param(url, self.config.version_param())
            }
            RewriteDecision::Skip(reason) => {
                tracing::trace!(handle, url, %reason, "asset url left unchanged");
                Cow::Borrowed(url)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubHost {
        admin: bool,
        version: Option<&'static str>,
    }

    impl AssetHost for StubHost {
        fn is_admin(&self) -> bool {
            self.admin
        }

        fn registered_version(&self, _handle: &str) -> Option<&str> {
            self.version
        }
    }

    fn visitor(version: &'static str) -> StubHost {
        StubHost {
            admin: false,
            version: Some(version),
        }
    }

    fn rewriter() -> AssetUrlRewriter {
        AssetUrlRewriter::new(RewriteConfig::default(), "https://example.com").unwrap()
    }

    #[test]
    fn new_rejects_site_url_without_host() {
        let err = AssetUrlRewriter::new(RewriteConfig::default(), "/blog").unwrap_err();
        assert!(matches!(err, ConfigError::SiteUrl { .. }));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = RewriteConfig {
            version_query_key_with_separator: "&ver=".to_string(),
            ..RewriteConfig::default()
        };
        assert!(AssetUrlRewriter::new(cfg, "https://example.com").is_err());
    }

    #[test]
    fn rewrites_each_recognized_extension() {
        let r = rewriter();
        let host = visitor("7");
        let cases = [
            ("/a/app.js?ver=7", "/a/app.7.js"),
            ("/a/app.min.js?ver=7", "/a/app.7.min.js"),
            ("/a/site.css?ver=7", "/a/site.7.css"),
            ("/a/site.min.css?ver=7", "/a/site.7.min.css"),
        ];
        for (input, expected) in cases {
            assert_eq!(r.rewrite(&host, input, "h"), expected, "input {input}");
        }
    }

    #[test]
    fn decision_order_admin_first() {
        let r = rewriter();
        let host = StubHost {
            admin: true,
            version: None,
        };
        assert_eq!(
            r.decide(&host, "not a url", "jquery-core"),
            RewriteDecision::Skip(SkipReason::AdminContext)
        );
    }

    #[test]
    fn excluded_handle_before_lookup() {
        let r = rewriter();
        let host = StubHost {
            admin: false,
            version: None,
        };
        assert_eq!(
            r.decide(&host, "/js/jquery.js?ver=3", "jquery-core"),
            RewriteDecision::Skip(SkipReason::ExcludedHandle)
        );
    }

    #[test]
    fn unregistered_and_empty_versions_skip() {
        let r = rewriter();
        let unregistered = StubHost {
            admin: false,
            version: None,
        };
        assert_eq!(
            r.decide(&unregistered, "/app.js?ver=1", "app"),
            RewriteDecision::Skip(SkipReason::Unregistered)
        );
        assert_eq!(
            r.decide(&visitor(""), "/app.js?ver=1", "app"),
            RewriteDecision::Skip(SkipReason::Unregistered)
        );
    }

    #[test]
    fn inline_sentinel_skips() {
        let r = rewriter();
        assert_eq!(
            r.decide(&visitor("inline"), "/app.js?ver=inline", "app"),
            RewriteDecision::Skip(SkipReason::InlineVersion)
        );
    }

    #[test]
    fn unparsable_url_skips() {
        let r = rewriter();
        assert_eq!(
            r.decide(&visitor("1"), "https://exa mple.com/app.js?ver=1", "app"),
            RewriteDecision::Skip(SkipReason::Unparsable)
        );
    }

    #[test]
    fn version_query_anywhere_but_rewrite_needs_question_mark() {
        let r = rewriter();
        assert_eq!(
            r.decide(&visitor("1"), "/app.js?lang=en&ver=1", "app"),
            RewriteDecision::Skip(SkipReason::UnrecognizedExtension)
        );
        assert_eq!(
            r.rewrite(&visitor("1"), "/app.js?lang=en&ver=1", "app"),
            "/app.js?lang=en&ver=1"
        );
        assert_eq!(
            r.decide(&visitor("1"), "/app.js", "app"),
            RewriteDecision::Skip(SkipReason::NoVersionQuery)
        );
        assert_eq!(
            r.decide(&visitor("1"), "/app.js?fever=1", "app"),
            RewriteDecision::Skip(SkipReason::NoVersionQuery)
        );
    }

    #[test]
    fn unknown_extension_skips() {
        let r = rewriter();
        assert_eq!(
            r.decide(&visitor("1"), "/font.woff2?ver=1", "font"),
            RewriteDecision::Skip(SkipReason::UnrecognizedExtension)
        );
        assert_eq!(
            r.decide(&visitor("1"), "/image.svg?ver=1", "icon"),
            RewriteDecision::Skip(SkipReason::UnrecognizedExtension)
        );
        assert_eq!(
            r.decide(&visitor("1"), "/app.jsx?ver=1", "app"),
            RewriteDecision::Skip(SkipReason::UnrecognizedExtension)
        );
    }

    // Hosts compare in their lower-cased form, not byte-for-byte as emitted.
    #[test]
    fn host_comparison_ignores_case() {
        let r = rewriter();
        assert_eq!(
            r.rewrite(&visitor("2"), "https://EXAMPLE.com/app.js?ver=2", "app"),
            "https://EXAMPLE.com/app.2.js"
        );
    }

    #[test]
    fn strip_version_policy_for_foreign_hosts() {
        let cfg = RewriteConfig {
            foreign_hosts: ForeignHostPolicy::StripVersion,
            ..RewriteConfig::default()
        };
        let r = AssetUrlRewriter::new(cfg, "https://example.com").unwrap();
        let host = visitor("4");
        assert_eq!(
            r.rewrite(&host, "https://cdn.other.net/lib.js?ver=4", "lib"),
            "https://cdn.other.net/lib.js"
        );
        assert_eq!(
            r.rewrite(&host, "https://example.com/lib.js?ver=4", "lib"),
            "https://example.com/lib.4.js"
        );
    }

    #[test]
    fn strip_version_policy_handles_later_ver_argument() {
        let cfg = RewriteConfig {
            foreign_hosts: ForeignHostPolicy::StripVersion,
            ..RewriteConfig::default()
        };
        let r = AssetUrlRewriter::new(cfg, "https://example.com").unwrap();
        let url = "https://fonts.googleapis.com/css?family=Roboto&ver=4";
        assert_eq!(r.decide(&visitor("4"), url, "google-fonts"), RewriteDecision::StripVersion);
        assert_eq!(
            r.rewrite(&visitor("4"), url, "google-fonts"),
            "https://fonts.googleapis.com/css?family=Roboto"
        );
    }

    #[test]
    fn non_ascii_file_name_is_not_digit_suffixed() {
        let r = rewriter();
        assert_eq!(r.rewrite(&visitor("1"), "/js/café.js?ver=1", "cafe"), "/js/café.1.js");
    }

    #[test]
    fn custom_query_key() {
        let cfg = RewriteConfig {
            version_query_key: "v=".to_string(),
            version_query_key_with_separator: "?v=".to_string(),
            ..RewriteConfig::default()
        };
        let r = AssetUrlRewriter::new(cfg, "https://example.com").unwrap();
        let host = visitor("9");
        assert_eq!(r.rewrite(&host, "/app.js?v=9", "app"), "/app.9.js");
        assert_eq!(r.rewrite(&host, "/app.js?ver=9", "app"), "/app.js?ver=9");
    }

    #[test]
    fn decision_display() {
        let r = rewriter();
        let d = r.decide(&visitor("1.0"), "/app.min.js?ver=1.0", "app");
        assert_eq!(d.to_string(), "rewrite version=1.0 extension=min.js");
        assert_eq!(
            RewriteDecision::Skip(SkipReason::ForeignHost).to_string(),
            "skip: foreign host"
        );
    }
}
