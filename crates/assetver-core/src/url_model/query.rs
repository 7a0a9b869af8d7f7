//! Query-string helpers.

use std::borrow::Cow;

/// True when some argument of `query` starts with `key`, e.g. `ver=`.
///
/// The position does not matter: `family=Roboto&ver=4` has one.
pub fn has_version_query(query: &str, key: &str) -> bool {
    !key.is_empty() && query.split('&').any(|pair| pair.starts_with(key))
}

/// Removes every `param` argument from the query of `url`, keeping the
/// remaining arguments and any fragment. The `?` goes when nothing is left.
pub fn strip_query_param<'a>(url: &'a str, param: &str) -> Cow<'a, str> {
    let (head, fragment) = match url.find('#') {
        Some(i) => url.split_at(i),
        None => (url, ""),
    };
    let Some((base, query)) = head.split_once('?') else {
        return Cow::Borrowed(url);
    };

    let is_param = |pair: &&str| pair.split_once('=').map_or(*pair, |(k, _)| k) == param;
    if !query.split('&').any(|pair| is_param(&pair)) {
        return Cow::Borrowed(url);
    }

    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty() && !is_param(pair))
        .collect();

    let mut out = String::with_capacity(url.len());
    out.push_str(base);
    if !kept.is_empty() {
        out.push('?');
        out.push_str(&kept.join("&"));
    }
    out.push_str(fragment);
    Cow::Owned(out)
}
