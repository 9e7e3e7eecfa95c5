//! Wildcard patterns matched against scan-root-relative paths.
//!
//! Syntax is glob-like:
//! - `*` matches any characters within one path segment
//! - `**` matches any characters across segments, including none
//! - `?` matches exactly one non-separator character
//! - `[abc]` and `{a,b}` are character classes and alternations
//!
//! Matching is case-sensitive and `*` never crosses a `/`.

use globset::{GlobBuilder, GlobMatcher};
use std::fmt;
use tracing::warn;

/// A single compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    text: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Glob(GlobMatcher),
    /// Fallback for text the glob engine rejects: exact comparison only.
    Literal,
}

impl WildcardPattern {
    /// Compile a pattern. Never fails.
    ///
    /// The raw text is normalized first: surrounding whitespace is trimmed,
    /// `\` becomes `/`, a leading `/` is dropped and a trailing `/` is
    /// completed to `/**`. Text that still isn't a valid glob is matched
    /// literally.
    pub fn new(raw: &str) -> Self {
        let text = normalize(raw);

        let matcher = match GlobBuilder::new(&text).literal_separator(true).build() {
            Ok(glob) => Matcher::Glob(glob.compile_matcher()),
            Err(e) => {
                warn!("Invalid wildcard pattern '{}', matching literally: {}", text, e);
                Matcher::Literal
            }
        };

        Self { text, matcher }
    }

    /// Normalized pattern text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Return `true` if `path` (relative, `/`-separated) matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Glob(glob) => glob.is_match(path),
            Matcher::Literal => path == self.text,
        }
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn normalize(raw: &str) -> String {
    let mut text = raw.trim().replace('\\', "/");
    if let Some(stripped) = text.strip_prefix('/') {
        text = stripped.to_string();
    }
    if text.ends_with('/') {
        text.push_str("**");
    }
    text
}

/// Ordered, immutable group of wildcard patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<WildcardPattern>,
}

impl PatternSet {
    /// Compile every non-blank raw pattern, keeping configuration order.
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = raw
            .into_iter()
            .filter(|p| !p.as_ref().trim().is_empty())
            .map(|p| WildcardPattern::new(p.as_ref()))
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WildcardPattern> {
        self.patterns.iter()
    }

    /// Return `true` if at least one pattern matches `path`.
    pub fn matches_any(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a WildcardPattern;
    type IntoIter = std::slice::Iter<'a, WildcardPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_star_stays_in_segment() {
        let pattern = WildcardPattern::new("src/*.java");

        assert!(pattern.matches("src/Main.java"));
        assert!(!pattern.matches("src/pkg/Main.java"));
    }

    #[test]
    fn test_double_star_crosses_segments() {
        let pattern = WildcardPattern::new("**/*.java");

        assert!(pattern.matches("Main.java"));
        assert!(pattern.matches("src/Main.java"));
        assert!(pattern.matches("src/org/acme/Main.java"));
        assert!(!pattern.matches("src/Main.txt"));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let pattern = WildcardPattern::new("src/?.rs");

        assert!(pattern.matches("src/a.rs"));
        assert!(!pattern.matches("src/ab.rs"));
        assert!(!pattern.matches("src//.rs"));
    }

    #[test]
    fn test_case_sensitive() {
        let pattern = WildcardPattern::new("**/Generated/**");

        assert!(pattern.matches("src/Generated/Foo.java"));
        assert!(!pattern.matches("src/generated/Foo.java"));
    }

    #[test]
    fn test_trailing_slash_matches_whole_directory() {
        let pattern = WildcardPattern::new("target/");

        assert_eq!(pattern.as_str(), "target/**");
        assert!(pattern.matches("target/debug/app"));
        assert!(!pattern.matches("src/target.rs"));
    }

    #[test]
    fn test_backslashes_and_whitespace_normalized() {
        let pattern = WildcardPattern::new("  src\\gen\\*.java ");

        assert_eq!(pattern.to_string(), "src/gen/*.java");
        assert!(pattern.matches("src/gen/A.java"));
    }

    #[test]
    fn test_leading_slash_dropped() {
        let pattern = WildcardPattern::new("/docs/**");

        assert_eq!(pattern.as_str(), "docs/**");
        assert!(pattern.matches("docs/index.md"));
    }

    #[test]
    fn test_invalid_glob_matches_literally() {
        // Unclosed character class is rejected by the glob engine.
        let pattern = WildcardPattern::new("src/[abc");

        assert!(pattern.matches("src/[abc"));
        assert!(!pattern.matches("src/a"));
    }

    #[test]
    fn test_pattern_set_drops_blank_entries() {
        let set = PatternSet::new(["**/*.rs", "", "   ", "docs/"]);

        assert_eq!(set.len(), 2);
        let texts: Vec<_> = set.iter().map(|p| p.as_str()).collect();
        assert_eq!(texts, vec!["**/*.rs", "docs/**"]);
    }

    #[test]
    fn test_pattern_set_matches_any() {
        let set = PatternSet::new(["**/*.rs", "**/*.toml"]);

        assert!(set.matches_any("src/lib.rs"));
        assert!(set.matches_any("Cargo.toml"));
        assert!(!set.matches_any("README.md"));
    }

    #[test]
    fn test_empty_pattern_set_matches_nothing() {
        let set = PatternSet::new(Vec::<String>::new());

        assert!(set.is_empty());
        assert!(!set.matches_any("anything"));
    }
}
