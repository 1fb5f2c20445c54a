//! LibreOffice backend for the automation seam.
//!
//! Each instance maps onto one `soffice --convert-to` invocation per saved
//! document. LibreOffice names its output after the source stem, so the export
//! lands in a private staging directory next to the destination and is then
//! moved into place.

use crate::automation::{Automation, ExportFormat, PresentationApp};
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, instrument, trace};

/// Program name used when no explicit path is configured.
pub const DEFAULT_SOFFICE_PROGRAM: &str = "soffice";

/// Environment variable that overrides the `soffice` program path.
pub const SOFFICE_ENV_VAR: &str = "PPT2PDF_SOFFICE";

/// Drives a locally installed LibreOffice.
#[derive(Debug, Clone)]
pub struct Soffice {
    program: PathBuf,
}

impl Soffice {
    /// Creates a backend that runs `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the program this backend runs.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for Soffice {
    fn default() -> Self {
        Self::new(DEFAULT_SOFFICE_PROGRAM)
    }
}

impl Automation for Soffice {
    type Instance = SofficeInstance;

    fn create_instance(&self) -> Result<Self::Instance> {
        if self.program.as_os_str().is_empty() {
            return Err(Error::automation("start", &self.program, "empty program path"));
        }

        debug!("Starting LibreOffice instance ({})", self.program.display());
        Ok(SofficeInstance {
            program: self.program.clone(),
            visible: false,
        })
    }
}

/// One LibreOffice session.
#[derive(Debug)]
pub struct SofficeInstance {
    program: PathBuf,
    visible: bool,
}

/// A presentation opened in a [`SofficeInstance`].
#[derive(Debug)]
pub struct SofficeDocument {
    source: PathBuf,
}

impl SofficeInstance {
    fn convert_args(&self, source: &Path, outdir: &Path, format: ExportFormat) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(7);
        if !self.visible {
            args.push("--headless".into());
        }
        args.push("--norestore".into());
        args.push("--convert-to".into());
        args.push(format.soffice_filter().into());
        args.push("--outdir".into());
        args.push(outdir.as_os_str().to_owned());
        args.push(source.as_os_str().to_owned());
        args
    }

    fn run_export(
        &self,
        source: &Path,
        destination: &Path,
        staging: &Path,
        format: ExportFormat,
    ) -> Result<()> {
        let args = self.convert_args(source, staging, format);
        trace!("Running {} {:?}", self.program.display(), args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| {
                Error::automation(
                    "save",
                    source,
                    format!("failed to run {}: {e}", self.program.display()),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::automation(
                "save",
                source,
                format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        let exported = staged_output(source, staging, format);
        if !exported.is_file() {
            return Err(Error::automation(
                "save",
                source,
                format!("no output produced at {}", exported.display()),
            ));
        }

        fs::rename(&exported, destination).map_err(|e| Error::io(destination, e))
    }
}

impl PresentationApp for SofficeInstance {
    type Document = SofficeDocument;

    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.visible = visible;
        Ok(())
    }

    fn open(&mut self, path: &Path) -> Result<Self::Document> {
        let meta = fs::metadata(path).map_err(|e| Error::automation("open", path, e.to_string()))?;
        if !meta.is_file() {
            return Err(Error::automation("open", path, "not a regular file"));
        }

        debug!("Opened {}", path.display());
        Ok(SofficeDocument {
            source: path.to_path_buf(),
        })
    }

    #[instrument(skip(self, document), fields(source = %document.source.display()))]
    fn save_as(
        &mut self,
        document: &mut Self::Document,
        path: &Path,
        format: ExportFormat,
    ) -> Result<()> {
        let staging = staging_dir(path);
        fs::create_dir_all(&staging).map_err(|e| Error::io(&staging, e))?;

        let result = self.run_export(&document.source, path, &staging, format);

        if let Err(e) = fs::remove_dir_all(&staging) {
            debug!("Could not remove {}: {}", staging.display(), e);
        }

        result?;
        debug!("Saved {} (format {})", path.display(), format.id());
        Ok(())
    }

    fn close(&mut self, document: Self::Document) -> Result<()> {
        debug!("Closed {}", document.source.display());
        Ok(())
    }

    fn quit(self) -> Result<()> {
        debug!("LibreOffice instance finished");
        Ok(())
    }
}

/// Private directory next to `destination` that receives the raw export.
fn staging_dir(destination: &Path) -> PathBuf {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    parent.join(format!(".ppt2pdf-{}", std::process::id()))
}

/// File LibreOffice writes for `source` inside `outdir`.
fn staged_output(source: &Path, outdir: &Path, format: ExportFormat) -> PathBuf {
    let mut name = OsString::from(source.file_stem().unwrap_or(source.as_os_str()));
    name.push(".");
    name.push(format.extension());
    outdir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_headless_unless_visible() {
        let mut instance = Soffice::default().create_instance().unwrap();
        let source = Path::new("/s/a.pptx");
        let staging = Path::new("/s/.stage");

        let args = instance.convert_args(source, staging, ExportFormat::Pdf);
        assert_eq!(args[0], "--headless");
        assert!(args.contains(&OsString::from("pdf:impress_pdf_Export")));
        assert_eq!(args.last().unwrap(), "/s/a.pptx");

        instance.set_visible(true).unwrap();
        let args = instance.convert_args(source, staging, ExportFormat::Pdf);
        assert!(!args.contains(&OsString::from("--headless")));
    }

    #[test]
    fn test_staged_output_uses_source_stem() {
        let staged = staged_output(
            Path::new("/s/deck.v2.pptx"),
            Path::new("/s/.stage"),
            ExportFormat::Pdf,
        );
        assert_eq!(staged, PathBuf::from("/s/.stage/deck.v2.pdf"));
    }

    #[test]
    fn test_staging_dir_sits_next_to_destination() {
        let staging = staging_dir(Path::new("/s/a.pptx_output.pdf"));
        assert_eq!(staging.parent(), Some(Path::new("/s")));
        assert!(staging.to_string_lossy().contains(".ppt2pdf-"));
    }

    #[test]
    fn test_open_missing_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let mut instance = Soffice::default().create_instance().unwrap();

        let err = instance.open(&temp.path().join("gone.pptx")).unwrap_err();
        assert!(err.is_automation());
    }

    #[test]
    fn test_save_with_missing_program() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.pptx").write_str("slides").unwrap();

        let backend = Soffice::new(temp.path().join("no-such-soffice"));
        let mut instance = backend.create_instance().unwrap();
        let mut doc = instance.open(&temp.path().join("a.pptx")).unwrap();
        let err = instance
            .save_as(&mut doc, &temp.path().join("a.pptx_output.pdf"), ExportFormat::Pdf)
            .unwrap_err();

        assert!(err.is_automation());
        assert!(!temp.path().join("a.pptx_output.pdf").exists());
        assert!(!staging_dir(&temp.path().join("a.pptx_output.pdf")).exists());
    }

    #[test]
    fn test_empty_program_rejected() {
        assert!(Soffice::new("").create_instance().is_err());
    }
}
