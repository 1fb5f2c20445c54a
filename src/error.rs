use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code used when the target directory cannot be listed.
pub const DIRECTORY_ERROR_EXIT_CODE: i32 = 2;

/// Exit code used for every other fatal error.
pub const FATAL_ERROR_EXIT_CODE: i32 = 1;

/// Error types for the ppt2pdf library.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// Target directory does not exist.
    #[error("The system cannot find directory '{}'", path.display())]
    DirectoryNotFound {
        /// Directory that was requested
        path: PathBuf,
    },

    /// Target path is malformed or does not name a listable directory.
    #[error(
        "The filename, directory name, or volume label syntax is incorrect: '{}'",
        path.display()
    )]
    InvalidPath {
        /// Path that was rejected
        path: PathBuf,
    },

    /// IO error with context about the file path.
    #[error("IO error accessing '{}': {message}", path.display())]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// The presentation application failed one of its operations.
    #[error("Presentation application failed to {operation} '{}': {message}", path.display())]
    Automation {
        /// Operation that failed (create, open, save, close, quit)
        operation: String,
        /// Document the operation was applied to
        path: PathBuf,
        /// Error message reported by the application
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },
}

impl Error {
    /// Creates a directory-not-found error.
    #[must_use]
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFound { path: path.into() }
    }

    /// Creates an invalid-path error.
    #[must_use]
    pub fn invalid_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an automation error for the given operation.
    #[must_use]
    pub fn automation(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        message: impl Into<String>,
    ) -> Self {
        Self::Automation {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if the error concerns the target directory itself.
    #[must_use]
    pub const fn is_directory_error(&self) -> bool {
        matches!(self, Self::DirectoryNotFound { .. } | Self::InvalidPath { .. })
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if the presentation application reported the failure.
    #[must_use]
    pub const fn is_automation(&self) -> bool {
        matches!(self, Self::Automation { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.is_directory_error() {
            DIRECTORY_ERROR_EXIT_CODE
        } else {
            FATAL_ERROR_EXIT_CODE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_message() {
        let err = Error::directory_not_found("/no/such/dir");
        assert!(err.is_directory_error());
        assert!(err.to_string().contains("/no/such/dir"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_path_message() {
        let err = Error::invalid_path("/tmp/file.txt");
        assert!(err.is_directory_error());
        assert!(err.to_string().contains("syntax is incorrect"));
        assert!(err.to_string().contains("/tmp/file.txt"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io("/tmp/deck.pptx", io_err);
        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/deck.pptx"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_automation_error() {
        let err = Error::automation("save", "/tmp/deck.pptx", "exit status 1");
        assert!(err.is_automation());
        assert!(!err.is_directory_error());
        assert_eq!(
            err.to_string(),
            "Presentation application failed to save '/tmp/deck.pptx': exit status 1"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_clone() {
        let err = Error::config("test");
        let cloned = err.clone();
        assert!(cloned.is_config());
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
