//! Path filtering helpers (source/test inclusions and exclusions).

use crate::config::ExclusionSettings;
use crate::pattern::PatternSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Classification of a scanned file, selecting which pattern groups apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Source,
    Test,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Source => f.write_str("source"),
            FileKind::Test => f.write_str("test"),
        }
    }
}

/// Anything the filter can judge: a scan-root-relative path plus its kind.
pub trait Candidate {
    /// Path relative to the scan root, `/`-separated.
    fn relative_path(&self) -> &str;

    fn kind(&self) -> FileKind;

    /// Non-file resources (directories, packages) are never ignored.
    fn is_file(&self) -> bool {
        true
    }
}

/// Accept/ignore decision for scanned files.
///
/// Inclusions are an allow-list: when a group is non-empty a path must match
/// at least one of its patterns. Exclusions are applied afterwards and always
/// win. Source and test files use independent groups.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    source_inclusions: PatternSet,
    source_exclusions: PatternSet,
    test_inclusions: PatternSet,
    test_exclusions: PatternSet,
}

impl ExclusionFilter {
    /// Compile the effective pattern groups of `settings`.
    pub fn new(settings: &ExclusionSettings) -> Self {
        let source_inclusions = PatternSet::new(settings.source_inclusions());
        log_patterns("Included sources:", &source_inclusions);

        let source_exclusions = PatternSet::new(settings.source_exclusions());
        log_patterns("Excluded sources:", &source_exclusions);

        let test_inclusions = PatternSet::new(settings.test_inclusions());
        log_patterns("Included tests:", &test_inclusions);

        let test_exclusions = PatternSet::new(settings.test_exclusions());
        log_patterns("Excluded tests:", &test_exclusions);

        Self {
            source_inclusions,
            source_exclusions,
            test_inclusions,
            test_exclusions,
        }
    }

    /// Return `true` if a file at `path` of the given kind belongs in the scan.
    pub fn accept(&self, path: &str, kind: FileKind) -> bool {
        let inclusions = self.inclusions(kind);
        if !inclusions.is_empty() && !inclusions.matches_any(path) {
            return false;
        }

        !self.exclusions(kind).matches_any(path)
    }

    pub fn accept_candidate<C: Candidate + ?Sized>(&self, candidate: &C) -> bool {
        self.accept(candidate.relative_path(), candidate.kind())
    }

    /// Resource entry point: the negation of [`accept_candidate`] for files.
    ///
    /// [`accept_candidate`]: ExclusionFilter::accept_candidate
    pub fn is_ignored<C: Candidate + ?Sized>(&self, candidate: &C) -> bool {
        candidate.is_file() && !self.accept_candidate(candidate)
    }

    pub fn source_inclusions(&self) -> &PatternSet {
        &self.source_inclusions
    }

    pub fn source_exclusions(&self) -> &PatternSet {
        &self.source_exclusions
    }

    pub fn test_inclusions(&self) -> &PatternSet {
        &self.test_inclusions
    }

    pub fn test_exclusions(&self) -> &PatternSet {
        &self.test_exclusions
    }

    fn inclusions(&self, kind: FileKind) -> &PatternSet {
        match kind {
            FileKind::Test => &self.test_inclusions,
            FileKind::Source => &self.source_inclusions,
        }
    }

    fn exclusions(&self, kind: FileKind) -> &PatternSet {
        match kind {
            FileKind::Test => &self.test_exclusions,
            FileKind::Source => &self.source_exclusions,
        }
    }
}

fn log_patterns(title: &str, patterns: &PatternSet) {
    if patterns.is_empty() {
        return;
    }

    info!("{}", title);
    for pattern in patterns {
        info!("  {}", pattern);
    }
}
