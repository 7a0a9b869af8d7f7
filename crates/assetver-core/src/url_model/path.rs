//! File name checks on URL paths.

use percent_encoding::percent_decode_str;

/// Final segment of a URL path (may be empty when the path ends in `/`).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// File name up to its first `.`: `app.min.js` → `app`.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    name.split('.').next().unwrap_or(name)
}

/// True when the file stem ends in an ASCII digit, e.g. `jquery-3.min.js`.
///
/// Such names are treated as already carrying a version. The stem is
/// percent-decoded first, so `caf%C3%A9.js` is judged by its last
/// character `é`, not by the escape's trailing `9`.
pub fn stem_ends_with_digit(path: &str) -> bool {
    percent_decode_str(file_stem(path))
        .decode_utf8_lossy()
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit())
}
