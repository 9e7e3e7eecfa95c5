//! pathsieve-scanner: Walks source and test directories through the exclusion filter.

use pathsieve_core::{Candidate, Config, Error, ExclusionFilter, FileKind, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Scanned file information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedFile {
    /// Path relative to the base directory, `/`-separated.
    pub path: String,
    pub kind: FileKind,
    pub size: u64,
    pub mtime: i64,
}

impl Candidate for ScannedFile {
    fn relative_path(&self) -> &str {
        &self.path
    }

    fn kind(&self) -> FileKind {
        self.kind
    }
}

/// Outcome of a scan: accepted files sorted by path, plus what was dropped.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    pub files: Vec<ScannedFile>,
    pub ignored_sources: usize,
    pub ignored_tests: usize,
}

impl ScanReport {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Accepted files of the given kind.
    pub fn files_of(&self, kind: FileKind) -> impl Iterator<Item = &ScannedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }
}

/// A file found by the walk, before filtering.
struct Found {
    absolute: PathBuf,
    relative: String,
    kind: FileKind,
}

impl Candidate for Found {
    fn relative_path(&self) -> &str {
        &self.relative
    }

    fn kind(&self) -> FileKind {
        self.kind
    }
}

enum Outcome {
    Accepted(ScannedFile),
    Ignored(FileKind),
    Unreadable,
}

/// Scanner for one project base directory.
pub struct Scanner {
    config: Config,
    filter: ExclusionFilter,
}

impl Scanner {
    /// Create a new scanner with the given configuration.
    pub fn new(config: Config) -> Self {
        let filter = ExclusionFilter::new(&config.exclusions);
        Self { config, filter }
    }

    pub fn filter(&self) -> &ExclusionFilter {
        &self.filter
    }

    /// Scan all configured source and test directories.
    pub fn scan(&self) -> Result<ScanReport> {
        let base = &self.config.scan.base_dir;
        if !base.is_dir() {
            return Err(Error::Scanner(format!(
                "Base directory not found: {}",
                base.display()
            )));
        }

        info!("Starting filesystem scan of {}", base.display());
        let base = lexical_normalize(base);

        // File -> (root specificity, kind). A file reachable from several
        // roots takes the kind of the most specific one; ties go to tests.
        let mut found: BTreeMap<PathBuf, (usize, FileKind)> = BTreeMap::new();
        let roots = self
            .config
            .scan
            .source_dirs
            .iter()
            .map(|d| (d, FileKind::Source))
            .chain(self.config.scan.test_dirs.iter().map(|d| (d, FileKind::Test)));

        for (dir, kind) in roots {
            let root = lexical_normalize(&base.join(dir));
            let Some(below_base) = path_below(&base, &root) else {
                warn!(
                    "Skipping {} directory outside base {}: {}",
                    kind,
                    self.config.scan.base_dir.display(),
                    dir.display()
                );
                continue;
            };
            let root = on_disk(&root);
            if !root.is_dir() {
                warn!("Skipping missing {} directory: {}", kind, root.display());
                continue;
            }

            info!("Scanning {} root: {}", kind, root.display());
            let specificity = normal_components(below_base).count();
            for path in self.scan_root(root) {
                found
                    .entry(lexical_normalize(&path))
                    .and_modify(|entry| {
                        let more_specific = specificity > entry.0;
                        let tie_to_test = specificity == entry.0 && kind == FileKind::Test;
                        if more_specific || tie_to_test {
                            *entry = (specificity, kind);
                        }
                    })
                    .or_insert((specificity, kind));
            }
        }

        let candidates: Vec<Found> = found
            .into_iter()
            .filter_map(|(absolute, (_, kind))| {
                let Some(relative) = relative_path(&base, &absolute) else {
                    warn!(
                        "Skipping {} outside base {}",
                        absolute.display(),
                        self.config.scan.base_dir.display()
                    );
                    return None;
                };
                Some(Found {
                    absolute,
                    relative,
                    kind,
                })
            })
            .collect();

        debug!("Found {} candidate files", candidates.len());

        let outcomes: Vec<Outcome> = candidates
            .par_iter()
            .map(|candidate| {
                if self.filter.is_ignored(candidate) {
                    debug!("Ignoring {} file: {}", candidate.kind, candidate.relative);
                    return Outcome::Ignored(candidate.kind);
                }
                match self.scan_file(candidate) {
                    Some(file) => Outcome::Accepted(file),
                    None => Outcome::Unreadable,
                }
            })
            .collect();

        let mut report = ScanReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Accepted(file) => report.files.push(file),
                Outcome::Ignored(FileKind::Source) => report.ignored_sources += 1,
                Outcome::Ignored(FileKind::Test) => report.ignored_tests += 1,
                Outcome::Unreadable => {}
            }
        }
        report.files.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            "Scan complete: {} files accepted, {} sources and {} tests ignored",
            report.len(),
            report.ignored_sources,
            report.ignored_tests
        );

        Ok(report)
    }

    /// Walk a single root directory and return every regular file under it.
    fn scan_root(&self, root: &Path) -> Vec<PathBuf> {
        let files: Vec<PathBuf> = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!("Failed to read entry under {}: {}", root.display(), err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();

        debug!("Found {} files in {}", files.len(), root.display());
        files
    }

    /// Read metadata for an accepted file.
    fn scan_file(&self, found: &Found) -> Option<ScannedFile> {
        let metadata = match std::fs::metadata(&found.absolute) {
            Ok(m) => m,
            Err(e) => {
                warn!(
                    "Failed to read metadata for {}: {}",
                    found.absolute.display(),
                    e
                );
                return None;
            }
        };

        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        Some(ScannedFile {
            path: found.relative.clone(),
            kind: found.kind,
            size: metadata.len(),
            mtime,
        })
    }
}

fn normal_components<'a>(path: &'a Path) -> impl Iterator<Item = &'a std::ffi::OsStr> + 'a {
    path.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    })
}

/// Resolve `.` and `..` without touching the filesystem. A `..` that can't
/// be resolved is kept.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// A normalized relative path can be empty; on disk that is the working directory.
fn on_disk(path: &Path) -> &Path {
    if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    }
}

/// Remainder of `path` below `base`, or `None` if it isn't below it.
fn path_below<'a>(base: &Path, path: &'a Path) -> Option<&'a Path> {
    let stripped = path.strip_prefix(base).ok()?;
    if stripped
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return None;
    }
    Some(stripped)
}

/// `/`-joined path of `path` below `base`, or `None` if it isn't below it.
fn relative_path(base: &Path, path: &Path) -> Option<String> {
    let stripped = path_below(base, path)?;
    let parts: Vec<_> = normal_components(stripped)
        .map(|part| part.to_string_lossy())
        .collect();
    Some(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let base = Path::new("/project");
        let path = Path::new("/project/src/org/acme/Main.java");

        assert_eq!(
            relative_path(base, path).as_deref(),
            Some("src/org/acme/Main.java")
        );
    }

    #[test]
    fn test_relative_path_with_dot_base() {
        let base = Path::new(".");
        let path = Path::new("./src/lib.rs");

        assert_eq!(relative_path(base, path).as_deref(), Some("src/lib.rs"));
    }

    #[test]
    fn test_relative_path_outside_base() {
        assert_eq!(relative_path(Path::new("/a"), Path::new("/b/c")), None);
    }

    #[test]
    fn test_relative_path_rejects_parent_components() {
        let base = Path::new("/project");
        let path = Path::new("/project/../shared/b.rs");

        assert_eq!(relative_path(base, path), None);
    }

    #[test]
    fn test_lexical_normalize_resolves_dots() {
        assert_eq!(
            lexical_normalize(Path::new("/project/./src/../tests")),
            PathBuf::from("/project/tests")
        );
        assert_eq!(lexical_normalize(Path::new(".")), PathBuf::new());
        assert_eq!(
            lexical_normalize(Path::new("./../shared")),
            PathBuf::from("../shared")
        );
    }

    #[test]
    fn test_path_below_base() {
        let base = Path::new("/project");

        assert_eq!(
            path_below(base, Path::new("/project/src")),
            Some(Path::new("src"))
        );
        assert_eq!(path_below(base, Path::new("/elsewhere/src")), None);
        // An empty (normalized ".") base only admits paths without `..`.
        assert_eq!(path_below(Path::new(""), Path::new("../shared")), None);
        assert_eq!(
            path_below(Path::new(""), Path::new("src")),
            Some(Path::new("src"))
        );
    }

    #[test]
    fn test_normal_components_skip_cur_dir() {
        assert_eq!(normal_components(Path::new("./src/main")).count(), 2);
        assert_eq!(normal_components(Path::new(".")).count(), 0);
    }

    #[test]
    fn test_missing_base_dir_is_scanner_error() {
        let mut config = Config::default();
        config.scan.base_dir = PathBuf::from("/definitely/not/a/real/pathsieve/base");

        let err = Scanner::new(config).scan().unwrap_err();
        assert!(matches!(err, Error::Scanner(_)));
    }
}
