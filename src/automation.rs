//! Seam between the batch converter and the presentation application.
//!
//! The converter never talks to an application directly. It is handed an
//! [`Automation`] that starts instances, and drives each instance through the
//! fixed open / save / close / quit sequence of [`PresentationApp`].

use crate::error::Result;
use std::path::Path;

/// Numeric export-format identifier that selects PDF output.
pub const PDF_FORMAT_ID: i32 = 32;

/// Export format passed to [`PresentationApp::save_as`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Portable Document Format
    #[default]
    Pdf,
}

impl ExportFormat {
    /// Returns the numeric identifier understood by the application.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Pdf => PDF_FORMAT_ID,
        }
    }

    /// Returns the file extension produced by this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
        }
    }

    /// Returns the LibreOffice filter name for presentation export.
    #[must_use]
    pub const fn soffice_filter(self) -> &'static str {
        match self {
            Self::Pdf => "pdf:impress_pdf_Export",
        }
    }
}

/// Starts presentation application instances.
pub trait Automation {
    /// Instance type produced by [`Automation::create_instance`].
    type Instance: PresentationApp;

    /// Starts a fresh application instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the application cannot be started.
    fn create_instance(&self) -> Result<Self::Instance>;
}

/// A running presentation application instance.
pub trait PresentationApp {
    /// Handle to a document opened in this instance.
    type Document;

    /// Shows or hides the application window.
    ///
    /// # Errors
    ///
    /// Returns an error if the application rejects the request.
    fn set_visible(&mut self, visible: bool) -> Result<()>;

    /// Opens the presentation at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be opened.
    fn open(&mut self, path: &Path) -> Result<Self::Document>;

    /// Saves `document` to `path` in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    fn save_as(
        &mut self,
        document: &mut Self::Document,
        path: &Path,
        format: ExportFormat,
    ) -> Result<()>;

    /// Closes `document`.
    ///
    /// # Errors
    ///
    /// Returns an error if the application fails to close the document.
    fn close(&mut self, document: Self::Document) -> Result<()>;

    /// Terminates the instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the application fails to shut down.
    fn quit(self) -> Result<()>;
}
