//! Unified error types for chatlens.
//!
//! Parsing and analysis never fail on bad chat text: unmatched lines are
//! dropped and empty input yields empty results. [`ChatlensError`] only
//! covers the boundaries around the pipeline: reading files, decoding
//! bytes, loading configuration and compiling user-supplied patterns.

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::MessageTable;
///
/// fn load(text: &str) -> Result<MessageTable> {
///     Ok(MessageTable::from_export(text))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// An I/O error occurred.
    ///
    /// This typically happens when the export file, a stop-word file or a
    /// config file doesn't exist or can't be read.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input bytes are not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Invalid date in a filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A custom line pattern failed to compile.
    #[error("Invalid line pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending regular expression
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The configuration is structurally valid JSON but semantically wrong.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong
        message: String,
    },

    /// JSON parsing/serialization error.
    ///
    /// This can occur when loading a config file or rendering a report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "export text".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlensError {
    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatlensError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        ChatlensError::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ChatlensError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a UTF-8 error with the given context.
    pub fn utf8(context: impl Into<String>, source: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: context.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlensError::InvalidDate { .. })
    }

    /// Returns `true` if this is a pattern compilation error.
    pub fn is_invalid_pattern(&self) -> bool {
        matches!(self, ChatlensError::InvalidPattern { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ChatlensError::InvalidConfig { .. } | ChatlensError::Json(_)
        )
    }
}

/// Reads a file and decodes it as UTF-8, naming the file in decode errors.
pub(crate) fn read_utf8(path: &std::path::Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| ChatlensError::utf8(path.display().to_string(), e))
}

// ============================================================================
// Tests
// ============================================================================
