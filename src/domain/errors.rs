// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the INI configuration crate.
//!
//! This module defines the error types that can occur when reading INI documents,
//! retrieving options from them, and mirroring them into a host configuration.
//! All errors use `thiserror` for proper error handling and conversion.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use std::str::ParseBoolError;
use thiserror::Error;

/// The main error type for INI configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use hexini::domain::errors::IniError;
///
/// fn lookup() -> Result<String, IniError> {
///     Err(IniError::MissingOption {
///         section: "flask".to_string(),
///         option: "secret_key".to_string(),
///     })
/// }
///
/// assert!(lookup().unwrap_err().is_missing());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IniError {
    /// A file could not be opened or read. `read` skips such paths instead of failing.
    #[error("Configuration file '{}' is not readable: {source}", .path.display())]
    FileNotReadable {
        /// The path that could not be read
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A file exceeds the maximum size accepted by the loader.
    #[error("Configuration file '{}' too large: {size} bytes (max {max} bytes)", .path.display())]
    FileTooLarge {
        /// The offending path
        path: PathBuf,
        /// The size of the file in bytes
        size: u64,
        /// The maximum accepted size in bytes
        max: u64,
    },

    /// Failed to parse an INI document.
    #[error("Failed to parse INI document: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The requested section does not exist.
    #[error("No section: '{section}'")]
    MissingSection {
        /// The section that was not found
        section: String,
    },

    /// The requested option does not exist in the section or in `DEFAULT`.
    #[error("No option '{option}' in section: '{section}'")]
    MissingOption {
        /// The section that was searched
        section: String,
        /// The option that was not found
        option: String,
    },

    /// A section with this name already exists.
    #[error("Section '{section}' already exists")]
    DuplicateSection {
        /// The duplicated section name
        section: String,
    },

    /// The section name cannot be used here.
    #[error("Invalid section name: '{section}'")]
    InvalidSectionName {
        /// The rejected section name
        section: String,
    },

    /// Failed to convert a value to the type expected for its key.
    #[error("Failed to convert value for key '{key}' to type {target_type}: {source}")]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An interpolation placeholder names an option that does not exist.
    #[error(
        "Bad value substitution: option '{option}' in section '{section}' references missing option '{reference}'"
    )]
    InterpolationMissingOption {
        /// The section being interpolated
        section: String,
        /// The option whose value holds the reference
        option: String,
        /// The referenced option name
        reference: String,
    },

    /// A value contains a malformed interpolation placeholder.
    #[error("Interpolation syntax error in option '{option}' of section '{section}': {message}")]
    InterpolationSyntax {
        /// The section being interpolated
        section: String,
        /// The option whose value is malformed
        option: String,
        /// What was wrong with the value
        message: String,
    },

    /// Interpolation recursed deeper than allowed.
    #[error(
        "Recursion limit exceeded in value substitution: option '{option}' in section '{section}'"
    )]
    InterpolationDepth {
        /// The section being interpolated
        section: String,
        /// The option whose value recursed too deep
        option: String,
    },

    /// The host has no active application context to receive configuration.
    #[error("No active application context on host '{host}'")]
    UnboundContext {
        /// The name of the host that was not bound
        host: String,
    },

    /// An I/O error occurred while reading a stream.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IniError {
    /// Creates a TypeConversionError from a ParseIntError.
    pub fn from_parse_int_error(key: String, err: ParseIntError) -> Self {
        IniError::TypeConversionError {
            key,
            target_type: "integer".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseFloatError.
    pub fn from_parse_float_error(key: String, err: ParseFloatError) -> Self {
        IniError::TypeConversionError {
            key,
            target_type: "float".to_string(),
            source: Box::new(err),
        }
    }

    /// Creates a TypeConversionError from a ParseBoolError.
    pub fn from_parse_bool_error(key: String, err: ParseBoolError) -> Self {
        IniError::TypeConversionError {
            key,
            target_type: "boolean".to_string(),
            source: Box::new(err),
        }
    }

    /// Returns `true` for the errors a fallback value may stand in for.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            IniError::MissingSection { .. } | IniError::MissingOption { .. }
        )
    }
}

/// A specialized Result type for INI configuration operations.
pub type Result<T> = std::result::Result<T, IniError>;
