use tracing::warn;

/// Final path segment of an emitted path or URL, accepting both separator styles.
pub fn base_file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Hash layout of emitted filenames for one asset kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashNaming<'a> {
    /// Whether emitted filenames carry a trailing hash segment.
    pub use_hash: bool,
    /// Separator between the logical name and the hash segment.
    pub separator: &'a str,
}

impl HashNaming<'_> {
    /// [`origin_name`] under this layout.
    pub fn origin_name(&self, emitted: &str) -> Option<String> {
        origin_name(emitted, self.use_hash, self.separator)
    }
}

/// Recover the logical name that markup referenced before the build inserted a hash.
///
/// Without hashing the base filename is already the logical name. With hashing the stem
/// is split on `separator`, the trailing hash segment dropped and the extension
/// reattached, so `js/main.page.a1b2c3.js` becomes `main.page.js`.
///
/// Returns `None` when nothing is left once the hash is removed. A bare extension would
/// otherwise compare equal to unrelated references, so callers treat it as no match.
pub fn origin_name(emitted: &str, use_hash: bool, separator: &str) -> Option<String> {
    let file = base_file_name(emitted);
    if file.is_empty() {
        return None;
    }
    if !use_hash {
        return Some(file.to_string());
    }

    let (stem, extension) = match file.rfind('.') {
        Some(idx) => file.split_at(idx),
        None => (file, ""),
    };

    if separator.is_empty() {
        warn!(emitted, "empty hash separator, cannot recover origin name");
        return None;
    }

    let mut segments: Vec<&str> = stem.split(separator).collect();
    segments.pop();
    let logical = segments.join(separator);
    if logical.is_empty() {
        warn!(
            emitted,
            separator, "hash occupies the whole file name, asset will not be matched"
        );
        return None;
    }

    Some(format!("{logical}{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_hash_segment() {
        assert_eq!(
            origin_name("main.page.9f8e7d.js", true, ".").as_deref(),
            Some("main.page.js")
        );
        assert_eq!(
            origin_name("js/main.9f8e7d.js", true, ".").as_deref(),
            Some("main.js")
        );
    }

    #[test]
    fn keeps_name_without_hashing() {
        assert_eq!(origin_name("main.js", false, ".").as_deref(), Some("main.js"));
        assert_eq!(
            origin_name("static/css/main.css", false, ".").as_deref(),
            Some("main.css")
        );
    }

    #[test]
    fn honours_custom_separator() {
        assert_eq!(
            origin_name("css/main-theme-c0ffee.css", true, "-").as_deref(),
            Some("main-theme.css")
        );
    }

    #[test]
    fn degenerate_names_never_match() {
        assert_eq!(origin_name("main.js", true, "."), None);
        assert_eq!(origin_name("a1b2c3.js", true, "-"), None);
        assert_eq!(origin_name(".js", true, "."), None);
        assert_eq!(origin_name("main.abc.js", true, ""), None);
        assert_eq!(origin_name("assets/", false, "."), None);
    }

    #[test]
    fn base_name_handles_both_separators() {
        assert_eq!(base_file_name("a/b/main.js"), "main.js");
        assert_eq!(base_file_name("a\\b\\main.js"), "main.js");
        assert_eq!(base_file_name("main.js"), "main.js");
    }
}
