use crate::{
    candidate::{Candidate, has_candidate_extension},
    config::Config,
    error::{Error, Result},
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Statistics collected during scanning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ScanStats {
    /// Directory entries seen
    pub total_entries: usize,

    /// Entries selected for conversion
    pub candidates: usize,

    /// Entries that were not regular files
    pub skipped_entries: usize,

    /// Entries that could not be inspected
    pub errors: usize,
}

/// Lists one directory level and selects presentations.
pub(crate) struct Scanner {
    directory: PathBuf,
    extension_filter: String,
    output_suffix: String,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            directory: config.directory.clone(),
            extension_filter: config.extension_filter.clone(),
            output_suffix: config.output_suffix.clone(),
        }
    }

    /// Lists the directory and returns candidates in file-name order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if the directory does not exist
    /// and [`Error::InvalidPath`] if it cannot be resolved or listed.
    pub(crate) fn scan(&self) -> Result<(Vec<Candidate>, ScanStats)> {
        let directory = resolve_directory(&self.directory)?;
        let mut stats = ScanStats::default();
        let mut candidates = Vec::new();

        debug!("Listing {}", directory.display());

        let walker = WalkDir::new(&directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(directory_error(&directory, e.io_error().map(io::Error::kind)));
                }
                Err(e) => {
                    warn!("Failed to inspect entry: {}", e);
                    stats.errors += 1;
                    continue;
                }
            };

            stats.total_entries += 1;
            let path = entry.path();

            if !has_candidate_extension(path, &self.extension_filter) {
                trace!("Ignoring {}", path.display());
                continue;
            }

            if !entry.file_type().is_file() {
                debug!("Skipping non-file entry {}", path.display());
                stats.skipped_entries += 1;
                continue;
            }

            trace!("Selected {}", path.display());
            let input = directory.join(entry.file_name());
            candidates.push(Candidate::new(input, &self.output_suffix));
        }

        stats.candidates = candidates.len();

        debug!(
            "Scan complete: {} entries, {} candidates, {} skipped, {} errors",
            stats.total_entries, stats.candidates, stats.skipped_entries, stats.errors
        );

        Ok((candidates, stats))
    }
}

/// Resolves `path` to an absolute directory path.
fn resolve_directory(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|_| Error::invalid_path(path))?;

    match fs::metadata(&absolute) {
        Ok(meta) if meta.is_dir() => Ok(absolute),
        Ok(_) => Err(Error::invalid_path(absolute)),
        Err(e) => Err(directory_error(&absolute, Some(e.kind()))),
    }
}

fn directory_error(path: &Path, kind: Option<io::ErrorKind>) -> Error {
    match kind {
        Some(io::ErrorKind::NotFound) => Error::directory_not_found(path),
        _ => Error::invalid_path(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn create_test_config(root: &Path) -> Config {
        Config::builder().directory(root).build().unwrap()
    }

    #[test]
    fn test_scanner_selects_presentations() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.pptx").touch().unwrap();
        temp.child("b.txt").touch().unwrap();
        temp.child("c.ppt").touch().unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path()));
        let (candidates, stats) = scanner.scan().unwrap();

        let names: Vec<_> = candidates.iter().map(Candidate::file_name).collect();
        assert_eq!(names, vec!["a.pptx", "c.ppt"]);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.candidates, 2);
    }

    #[test]
    fn test_scanner_builds_absolute_paths() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("deck.pptx").touch().unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path()));
        let (candidates, _) = scanner.scan().unwrap();

        assert!(candidates[0].input.is_absolute());
        assert!(candidates[0]
            .output
            .to_string_lossy()
            .ends_with("deck.pptx_output.pdf"));
    }

    #[test]
    fn test_scanner_is_case_sensitive() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("upper.PPTX").touch().unwrap();
        temp.child("lower.pptx").touch().unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path()));
        let (candidates, _) = scanner.scan().unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].file_name(), "lower.pptx");
    }

    #[test]
    fn test_scanner_does_not_descend() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("nested/inner.pptx").write_str("slides").unwrap();
        temp.child("top.ppt").touch().unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path()));
        let (candidates, _) = scanner.scan().unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].file_name(), "top.ppt");
    }

    #[test]
    fn test_scanner_skips_directories_with_matching_names() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("folder.ppt").create_dir_all().unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path()));
        let (candidates, stats) = scanner.scan().unwrap();

        assert!(candidates.is_empty());
        assert_eq!(stats.skipped_entries, 1);
    }

    #[test]
    fn test_scanner_missing_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let scanner = Scanner::new(&create_test_config(&missing));
        let err = scanner.scan().unwrap_err();

        assert!(matches!(err, Error::DirectoryNotFound { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_scanner_file_instead_of_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("plain.txt").touch().unwrap();

        let scanner = Scanner::new(&create_test_config(&temp.path().join("plain.txt")));
        let err = scanner.scan().unwrap_err();

        assert!(matches!(err, Error::InvalidPath { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_scanner_empty_directory() {
        let temp = assert_fs::TempDir::new().unwrap();

        let scanner = Scanner::new(&create_test_config(temp.path()));
        let (candidates, stats) = scanner.scan().unwrap();

        assert!(candidates.is_empty());
        assert_eq!(stats, ScanStats::default());
    }
}
