use crate::{
    automation::{Automation, ExportFormat, PresentationApp},
    candidate::{Candidate, normalize_destination},
    config::Config,
    error::Result,
    scanner::Scanner,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Statistics collected during a batch conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionStats {
    /// Directory that was converted
    pub directory: PathBuf,

    /// Directory entries seen
    pub total_entries: usize,

    /// Entries selected for conversion
    pub candidates: usize,

    /// Matching entries skipped because they are not regular files
    pub skipped_entries: usize,

    /// Entries that could not be inspected
    pub unreadable_entries: usize,

    /// Presentations converted
    pub converted: usize,

    /// PDFs written, or that would be written in dry run mode
    pub outputs: Vec<PathBuf>,

    /// Whether this was a dry run
    pub dry_run: bool,

    /// Total execution time
    pub duration: Duration,
}

impl ConversionStats {
    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║              Conversion Summary                       ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Entries Listed:       {:>8}                        ║",
            self.total_entries
        );
        println!(
            "║ Presentations:        {:>8}                        ║",
            self.candidates
        );
        println!(
            "║   - Skipped:          {:>8}                        ║",
            self.skipped_entries
        );
        println!(
            "║   - Unreadable:       {:>8}                        ║",
            self.unreadable_entries
        );
        println!(
            "║ Converted:            {:>8}                        ║",
            self.converted
        );
        println!(
            "║ Total:                {:>8.2}s                       ║",
            self.duration.as_secs_f64()
        );
        println!("╚═══════════════════════════════════════════════════════╝");
        for output in &self.outputs {
            println!("  {}", output.display());
        }
        if self.dry_run {
            println!("\n⚠ No files were written (dry run mode)");
        }
        println!();
    }
}

/// Converts one presentation to PDF.
///
/// Starts an instance from `automation`, shows it when `visible` is set,
/// opens `input`, saves it to `output` in `format`, closes the document and
/// quits the instance. `output` gains a `.pdf` extension unless it already
/// ends in `pdf`. Returns the destination actually written.
///
/// # Errors
///
/// Any failure of the application is returned as-is. A failed step leaves
/// the remaining steps undone, including quitting the instance.
#[instrument(skip(automation), fields(input = %input.display()))]
pub fn convert_one<A: Automation>(
    automation: &A,
    input: &Path,
    output: &Path,
    format: ExportFormat,
    visible: bool,
) -> Result<PathBuf> {
    let destination = normalize_destination(output, format.extension());

    let mut app = automation.create_instance()?;
    app.set_visible(visible)?;

    let mut document = app.open(input)?;
    app.save_as(&mut document, &destination, format)?;
    app.close(document)?;
    app.quit()?;

    debug!("Wrote {}", destination.display());
    Ok(destination)
}

/// Converts every presentation in a directory, one at a time.
pub struct BatchConverter<A> {
    config: Config,
    scanner: Scanner,
    automation: A,
}

impl<A: Automation> BatchConverter<A> {
    /// Creates a converter that drives `automation`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config, automation: A) -> Result<Self> {
        config.validate()?;

        let scanner = Scanner::new(&config);

        Ok(Self {
            config,
            scanner,
            automation,
        })
    }

    /// Lists the presentations that [`convert_all`](Self::convert_all) would convert.
    ///
    /// # Errors
    ///
    /// Returns a directory error if the directory cannot be listed.
    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        self.scanner.scan().map(|(candidates, _)| candidates)
    }

    /// Converts every candidate in the configured directory.
    ///
    /// The directory is listed once, then each candidate is converted in
    /// file-name order. The first failure ends the batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`](crate::Error::DirectoryNotFound) or
    /// [`Error::InvalidPath`](crate::Error::InvalidPath) if the directory cannot
    /// be listed, and the first conversion error otherwise.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ppt2pdf::{BatchConverter, Config, Soffice};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder().directory("./slides").build()?;
    /// let stats = BatchConverter::new(config, Soffice::default())?.convert_all()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(directory = %self.config.directory.display()))]
    pub fn convert_all(&self) -> Result<ConversionStats> {
        let start_time = Instant::now();

        let (candidates, scan_stats) = self.scanner.scan()?;
        info!(
            "Found {} presentation(s) among {} entries",
            candidates.len(),
            scan_stats.total_entries
        );

        let mut outputs = Vec::with_capacity(candidates.len());

        if self.config.dry_run {
            warn!("Dry run mode enabled - skipping conversion");
            outputs.extend(
                candidates
                    .iter()
                    .map(|c| normalize_destination(&c.output, self.config.format.extension())),
            );
        } else {
            for (index, candidate) in candidates.iter().enumerate() {
                info!(
                    "[{}/{}] Converting {}",
                    index + 1,
                    candidates.len(),
                    candidate.file_name()
                );
                let written = convert_one(
                    &self.automation,
                    &candidate.input,
                    &candidate.output,
                    self.config.format,
                    self.config.visible,
                )?;
                outputs.push(written);
            }
        }

        let duration = start_time.elapsed();
        let converted = if self.config.dry_run { 0 } else { outputs.len() };

        info!(
            "✓ Converted {} presentation(s) in {:.2}s",
            converted,
            duration.as_secs_f64()
        );

        Ok(ConversionStats {
            directory: self.config.directory.clone(),
            total_entries: scan_stats.total_entries,
            candidates: candidates.len(),
            skipped_entries: scan_stats.skipped_entries,
            unreadable_entries: scan_stats.errors,
            converted,
            outputs,
            dry_run: self.config.dry_run,
            duration,
        })
    }
}
