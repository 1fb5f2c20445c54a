use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension substring that marks a presentation file.
pub const DEFAULT_EXTENSION_FILTER: &str = "ppt";

/// Suffix appended to a source path to form its output path.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_output.pdf";

/// A presentation selected for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Absolute path to the source presentation
    pub input: PathBuf,

    /// Destination path handed to the converter
    pub output: PathBuf,
}

impl Candidate {
    /// Creates a candidate whose output is `input` followed by `suffix`.
    #[must_use]
    pub fn new(input: PathBuf, suffix: &str) -> Self {
        let output = output_path_for(&input, suffix);
        Self { input, output }
    }

    /// Returns the source file name for display.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Returns true if the extension of `path` contains `filter`.
///
/// The check is case-sensitive. Leading dots never start an extension, so
/// `.pptx` and `..ppt` have none and never match.
#[must_use]
pub fn has_candidate_extension(path: &Path, filter: &str) -> bool {
    extension_of(path).is_some_and(|ext| ext.contains(filter))
}

/// Text after the last dot of the file name, when that dot follows at least
/// one non-dot character.
fn extension_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let dot = name.rfind('.')?;
    if name[..dot].bytes().all(|b| b == b'.') {
        return None;
    }
    Some(name[dot + 1..].to_string())
}

/// Appends `suffix` to the full path of `input`, extension included.
#[must_use]
pub fn output_path_for(input: &Path, suffix: &str) -> PathBuf {
    let mut raw = OsString::from(input.as_os_str());
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Appends `.{extension}` unless `path` already ends in `extension`.
///
/// Only the raw trailing characters are compared, so `deck_pdf` is left alone
/// while `deck.PDF` gains a second extension.
#[must_use]
pub fn normalize_destination(path: &Path, extension: &str) -> PathBuf {
    if path.as_os_str().as_encoded_bytes().ends_with(extension.as_bytes()) {
        return path.to_path_buf();
    }

    let mut raw = OsString::from(path.as_os_str());
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter() {
        assert!(has_candidate_extension(Path::new("a.pptx"), "ppt"));
        assert!(has_candidate_extension(Path::new("c.ppt"), "ppt"));
        assert!(has_candidate_extension(Path::new("deck.pptm"), "ppt"));
        assert!(has_candidate_extension(Path::new("archive.tar.ppt"), "ppt"));
        assert!(!has_candidate_extension(Path::new("b.txt"), "ppt"));
        assert!(!has_candidate_extension(Path::new("slides.PPTX"), "ppt"));
        assert!(!has_candidate_extension(Path::new("ppt"), "ppt"));
        assert!(!has_candidate_extension(Path::new(".pptx"), "ppt"));
        assert!(!has_candidate_extension(Path::new("..ppt"), "ppt"));
        assert!(!has_candidate_extension(Path::new("/data/...pptx"), "ppt"));
        assert!(has_candidate_extension(Path::new("a..ppt"), "ppt"));
        assert!(has_candidate_extension(Path::new(".hidden.pptx"), "ppt"));
        assert!(!has_candidate_extension(Path::new("ppt.key"), "ppt"));
    }

    #[test]
    fn test_output_path_keeps_source_extension() {
        let candidate = Candidate::new(PathBuf::from("/data/a.pptx"), DEFAULT_OUTPUT_SUFFIX);
        assert_eq!(candidate.output, PathBuf::from("/data/a.pptx_output.pdf"));
        assert_eq!(candidate.file_name(), "a.pptx");
    }

    #[test]
    fn test_normalize_leaves_output_suffix_alone() {
        let output = output_path_for(Path::new("/data/c.ppt"), DEFAULT_OUTPUT_SUFFIX);
        assert_eq!(
            normalize_destination(&output, "pdf"),
            PathBuf::from("/data/c.ppt_output.pdf")
        );
    }

    #[test]
    fn test_normalize_appends_missing_extension() {
        assert_eq!(
            normalize_destination(Path::new("/data/report"), "pdf"),
            PathBuf::from("/data/report.pdf")
        );
        assert_eq!(
            normalize_destination(Path::new("/data/report.PDF"), "pdf"),
            PathBuf::from("/data/report.PDF.pdf")
        );
        assert_eq!(
            normalize_destination(Path::new("/data/report_pdf"), "pdf"),
            PathBuf::from("/data/report_pdf")
        );
    }
}
