//! Domain-level error types for print-shop.
//!
//! All errors are typed with `thiserror` and carry a user-facing message,
//! since every one of them ends up in front of the customer or the operator.

use thiserror::Error;

/// A custom page-range expression could not be honoured.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RangeError {
    /// A range token referenced a page beyond the document's page count.
    #[error("Page {requested} exceeds the total page count ({total_pages})")]
    PageOutOfBounds { requested: u64, total_pages: u32 },
}

/// An order line could not be assembled from the current print settings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Nothing is selected for printing.
    #[error("No pages selected: please enter a valid page range")]
    EmptySelection,

    /// The page selection still carries a range error.
    #[error("Invalid page range: {0}")]
    UnresolvedRangeError(RangeError),
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to open or query the local store.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid or corrupted data in the store.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// User input rejected (checkout details, status transitions, ...).
    #[error("{message}")]
    Validation { message: String },

    /// Page range could not be resolved.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Order line could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a JSON parse error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_error_message() {
        let err = RangeError::PageOutOfBounds {
            requested: 10,
            total_pages: 5,
        };
        assert_eq!(
            err.to_string(),
            "Page 10 exceeds the total page count (5)"
        );
    }

    #[test]
    fn test_build_error_wraps_range_error() {
        let err: AppError = BuildError::UnresolvedRangeError(RangeError::PageOutOfBounds {
            requested: 7,
            total_pages: 3,
        })
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid page range: Page 7 exceeds the total page count (3)"
        );
    }
}
