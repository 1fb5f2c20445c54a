//! # ppt2pdf
//!
//! Batch-converts the presentations in a directory to PDF by driving a locally
//! installed presentation application.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ppt2pdf::{Config, Soffice};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .directory("./slides")
//!     .build()?;
//!
//! ppt2pdf::run(config, Soffice::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Scanner**: lists one directory level and keeps entries whose
//!    extension contains `ppt`
//! 2. **Converter**: for each candidate, starts an application instance, opens
//!    the file, saves it as `<source>_output.pdf`, closes it and quits
//! 3. **Automation**: the application behind a trait, so the LibreOffice
//!    backend can be swapped for any other implementation

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod candidate;
mod config;
mod converter;
mod error;
mod scanner;
mod soffice;

pub mod automation;

pub use automation::{Automation, ExportFormat, PDF_FORMAT_ID, PresentationApp};
pub use candidate::{
    Candidate, DEFAULT_EXTENSION_FILTER, DEFAULT_OUTPUT_SUFFIX, has_candidate_extension,
    normalize_destination, output_path_for,
};
pub use config::{Config, ConfigBuilder};
pub use converter::{BatchConverter, ConversionStats, convert_one};
pub use error::{DIRECTORY_ERROR_EXIT_CODE, Error, FATAL_ERROR_EXIT_CODE, Result};
pub use soffice::{
    DEFAULT_SOFFICE_PROGRAM, SOFFICE_ENV_VAR, Soffice, SofficeDocument, SofficeInstance,
};

/// Converts every presentation in the configured directory.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - The directory doesn't exist or cannot be listed
/// - The application fails on any presentation
pub fn run<A: Automation>(config: Config, automation: A) -> Result<ConversionStats> {
    BatchConverter::new(config, automation)?.convert_all()
}
