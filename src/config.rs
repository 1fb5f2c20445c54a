use crate::automation::ExportFormat;
use crate::candidate::{DEFAULT_EXTENSION_FILTER, DEFAULT_OUTPUT_SUFFIX};
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Configuration for a batch conversion.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory whose presentations are converted
    pub directory: PathBuf,

    /// Substring an extension must contain to be converted
    pub extension_filter: String,

    /// Suffix appended to each source path to name its PDF
    pub output_suffix: String,

    /// Export format requested from the application
    pub format: ExportFormat,

    /// Whether the application window is made visible
    pub visible: bool,

    /// Dry run mode (list candidates, convert nothing)
    pub dry_run: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use ppt2pdf::Config;
    ///
    /// let config = Config::builder()
    ///     .directory("./slides")
    ///     .dry_run(true)
    ///     .build()
    ///     .expect("valid configuration");
    /// assert!(config.dry_run);
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// The directory itself is checked when it is listed, so a missing
    /// directory surfaces as [`Error::DirectoryNotFound`] rather than here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory path is empty
    /// - The extension filter is empty
    /// - The output suffix is empty or contains a path separator
    pub fn validate(&self) -> Result<()> {
        if self.directory.as_os_str().is_empty() {
            return Err(Error::config("directory must not be empty"));
        }

        if self.extension_filter.is_empty() {
            return Err(Error::config("extension_filter must not be empty"));
        }

        if self.output_suffix.is_empty() {
            return Err(Error::config("output_suffix must not be empty"));
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(Error::config(format!(
                "output_suffix must not contain a path separator: {}",
                self.output_suffix
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            extension_filter: DEFAULT_EXTENSION_FILTER.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            format: ExportFormat::Pdf,
            visible: true,
            dry_run: false,
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    directory: Option<PathBuf>,
    extension_filter: Option<String>,
    output_suffix: Option<String>,
    format: Option<ExportFormat>,
    visible: Option<bool>,
    dry_run: bool,
}

impl ConfigBuilder {
    /// Sets the directory to convert.
    #[must_use]
    pub fn directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.directory = Some(path.into());
        self
    }

    /// Sets the extension substring that selects presentations.
    #[must_use]
    pub fn extension_filter(mut self, filter: impl Into<String>) -> Self {
        self.extension_filter = Some(filter.into());
        self
    }

    /// Sets the suffix appended to source paths.
    #[must_use]
    pub fn output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = Some(suffix.into());
        self
    }

    /// Sets the export format.
    #[must_use]
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Shows or hides the application window during conversion.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Enables dry run mode.
    #[must_use]
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            directory: self.directory.unwrap_or_else(|| PathBuf::from(".")),
            extension_filter: self
                .extension_filter
                .unwrap_or_else(|| DEFAULT_EXTENSION_FILTER.to_string()),
            output_suffix: self
                .output_suffix
                .unwrap_or_else(|| DEFAULT_OUTPUT_SUFFIX.to_string()),
            format: self.format.unwrap_or_default(),
            visible: self.visible.unwrap_or(true),
            dry_run: self.dry_run,
        };

        config.validate()?;
        Ok(config)
    }
}
