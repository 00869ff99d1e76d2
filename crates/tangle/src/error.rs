//! Error types for Tangle operations.
//!
//! ## Error Philosophy
//!
//! Tangle follows a "best effort" approach for catalogs:
//! - A malformed pragma line is skipped, not rejected
//! - An import that names nothing in the catalog is dropped, not reported
//! - A query for an unknown package or source returns nothing
//! - Only infrastructure failures (reading the catalog, writing reports,
//!   bad configuration) surface as an [`Error`]

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Tangle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for Tangle operations.
///
/// These errors represent failures that prevent the operation from
/// completing. The binary reports them and exits with a failure status.
#[derive(Debug, Error)]
pub enum Error {
    /// The pragma catalog could not be opened or read
    #[error("unable to read catalog {}: {source}", .path.display())]
    Catalog {
        /// Path of the catalog file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// File system operation failed (report output)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report data could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a catalog read error for the given path.
    #[must_use]
    pub fn catalog(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Catalog {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_error_display_includes_path() {
        let error = Error::catalog(
            "cats/missing.db",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );

        let display = error.to_string();
        assert!(display.contains("cats/missing.db"));
        assert!(display.contains("no such file"));
    }

    #[test]
    fn catalog_error_exposes_io_source() {
        let error = Error::catalog(
            "x.db",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );

        let source = std::error::Error::source(&error).expect("should have a source");
        assert_eq!(source.to_string(), "denied");
    }

    #[test]
    fn config_error_display() {
        let error = Error::Config("extension must not be empty".to_string());
        assert_eq!(
            error.to_string(),
            "configuration error: extension must not be empty"
        );
    }
}
