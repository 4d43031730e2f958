//! Text normalization applied before segmentation.
//!
//! Raw text is repaired, HTML-unescaped twice (captions are often escaped
//! twice on the way from a web page), whitespace-collapsed and lowercased.

use super::repair::TextRepair;

/// Collapse every whitespace run to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode HTML entities twice, so `&amp;amp;` becomes `&`.
///
/// Decoding follows the HTML5 rules: legacy entities may omit the semicolon,
/// named entities match by longest prefix, and C1 numeric references map to
/// their Windows-1252 characters.
pub fn unescape_html(text: &str) -> String {
    let once = htmlize::unescape(text);
    htmlize::unescape(once).into_owned()
}

/// Text normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    /// Encoding-artifact repair stage
    repair: TextRepair,
}

impl Normalizer {
    /// Create a new normalizer.
    pub fn new(repair: TextRepair) -> Self {
        Self { repair }
    }

    /// Repair and unescape `text`, then trim it.
    pub fn clean(&self, text: &str) -> String {
        let repaired = self.repair.fix_text(text);
        unescape_html(&repaired).trim().to_string()
    }

    /// Normalize text: clean, collapse whitespace and lowercase.
    pub fn normalize(&self, text: &str) -> String {
        collapse_whitespace(&self.clean(text)).to_lowercase()
    }

    /// Check if the repair stage is enabled.
    pub fn repairs_text(&self) -> bool {
        self.repair.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace(" \n "), "");
    }

    #[test]
    fn test_unescape_twice() {
        assert_eq!(unescape_html("fish &amp;amp; chips"), "fish & chips");
        assert_eq!(unescape_html("&lt;3"), "<3");
        assert_eq!(unescape_html("&#39;quoted&#39;"), "'quoted'");
    }

    #[test]
    fn test_unescape_html5_rules() {
        assert_eq!(unescape_html("a &amp b"), "a & b");
        assert_eq!(unescape_html("&copy 2020"), "\u{a9} 2020");
        assert_eq!(unescape_html("&#128;"), "\u{20ac}");
        assert_eq!(unescape_html("&#x93;hi&#x94;"), "\u{201c}hi\u{201d}");
        assert_eq!(unescape_html("&notit;"), "\u{ac}it;");
        assert_eq!(unescape_html("&bogus; & plain"), "&bogus; & plain");
    }

    #[test]
    fn test_normalize_legacy_entities() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("Fish &amp Chips &copy 2020"), "fish & chips \u{a9} 2020");
    }

    #[test]
    fn test_normalize() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("  Hello,\n  WORLD!  "), "hello, world!");
        assert_eq!(normalizer.normalize("Tom &amp;amp; Jerry"), "tom & jerry");
        assert_eq!(normalizer.normalize(""), "");
    }

    #[test]
    fn test_normalize_without_repair() {
        let normalizer = Normalizer::new(TextRepair::disabled());
        assert!(!normalizer.repairs_text());
        assert_eq!(normalizer.normalize("CAFÃ©"), "cafã©");
    }

    #[test]
    fn test_normalize_with_repair() {
        let normalizer = Normalizer::default();
        assert!(normalizer.repairs_text());
        assert_eq!(normalizer.normalize("CAFÃ©"), "café");
        assert_eq!(normalizer.normalize("Café and cafÃ©"), "café and café");
        assert_eq!(normalizer.normalize("naïve cafÃ©"), "naïve café");
    }
}
