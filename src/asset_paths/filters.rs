use regex::Regex;

use super::naming::base_file_name;
use crate::models::AssetKind;

/// Decides whether an emitted file is a main bundle that loose mode should retarget.
///
/// Built from configuration values, so every prefix is escaped before it becomes part of
/// the pattern. The rest of the name is restricted to ASCII word characters, dots and dashes. Incidental assets in the manifest (images, source maps, lazily loaded
/// chunks) fail the filter and are left alone.
#[derive(Debug, Clone)]
pub struct MainBundleFilter {
    pattern: Regex,
}

impl MainBundleFilter {
    /// Filter accepting `<prefix>...<ext>` for any of `prefixes`.
    pub fn new(prefixes: &[&str], kind: AssetKind) -> Result<Self, regex::Error> {
        let alternatives = prefixes
            .iter()
            .map(|prefix| regex::escape(prefix))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"^(?:{alternatives})[.\-0-9A-Za-z_]+\.{ext}$",
            ext = kind.extension()
        ))?;
        Ok(Self { pattern })
    }

    /// Whether the base filename of `emitted` looks like a main bundle.
    pub fn is_main_bundle(&self, emitted: &str) -> bool {
        self.pattern.is_match(base_file_name(emitted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_hashed_main_and_common_scripts() {
        let filter = MainBundleFilter::new(&["main", "common"], AssetKind::Script).unwrap();
        assert!(filter.is_main_bundle("js/main.a1b2c3.js"));
        assert!(filter.is_main_bundle("common.ff00.js"));
        assert!(filter.is_main_bundle("main-page_1.js"));
    }

    #[test]
    fn rejects_unrelated_assets() {
        let filter = MainBundleFilter::new(&["main"], AssetKind::Script).unwrap();
        assert!(!filter.is_main_bundle("js/lazy.a1b2c3.js"));
        assert!(!filter.is_main_bundle("main.a1b2c3.js.map"));
        assert!(!filter.is_main_bundle("main.a1b2c3.css"));
    }

    #[test]
    fn rejects_non_ascii_names() {
        let filter = MainBundleFilter::new(&["main"], AssetKind::Script).unwrap();
        assert!(!filter.is_main_bundle("main.é1.js"));
        assert!(!filter.is_main_bundle("js/main.ａｂｃ.js"));
        assert!(filter.is_main_bundle("js/main.abc.js"));
    }

    #[test]
    fn escapes_prefix_metacharacters() {
        let filter = MainBundleFilter::new(&["app+"], AssetKind::Style).unwrap();
        assert!(filter.is_main_bundle("app+.123.css"));
        assert!(!filter.is_main_bundle("appp.123.css"));
    }
}
