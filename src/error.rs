//! Error handling for uvmgen.
//! Defines the error type shared by every generation step and the result alias
//! used throughout the crate.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error types for generator operations.
///
/// Each variant carries enough context (path, section, field) for the caller
/// to correct the configuration or the template library.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file does not exist or is not a regular file.
    #[error("Configuration file '{}' not found.", .path.display())]
    ConfigNotFound { path: PathBuf },

    /// The configuration file could not be read or parsed.
    #[error("Failed to parse configuration '{}': {reason}.", .path.display())]
    ConfigParseError { path: PathBuf, reason: String },

    /// A required top-level section is absent.
    #[error("Missing required section '{0}' in configuration.")]
    MissingSection(String),

    /// A required field is absent from a section.
    #[error("Missing required field '{field}' in '{section}' section.")]
    MissingField { section: String, field: String },

    /// A field is present but holds a value of the wrong shape.
    #[error("Invalid value for '{section}.{field}': expected {expected}.")]
    InvalidField {
        section: String,
        field: String,
        expected: String,
    },

    /// A named template is missing from the template library.
    #[error("Template '{name}' not found at '{}'.", .path.display())]
    TemplateNotFound { name: String, path: PathBuf },

    /// A template file exists but could not be read.
    #[error("Failed to read template '{name}' at '{}': {source}.", .path.display())]
    TemplateReadError {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The substitution tokens could not be compiled into a pattern.
    #[error("Invalid substitution pattern: {0}.")]
    PatternError(#[from] regex::Error),

    /// A built-in artifact template failed to render.
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// A generated file could not be created or written.
    #[error("Failed to write '{}': {source}.", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be created or inspected.
    #[error("File system error at '{}': {source}.", .path.display())]
    FileSystemError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A step needs files that earlier steps have not produced.
    #[error("Cannot generate {step}: missing {}.", .missing.join(", "))]
    DependencyError { step: String, missing: Vec<String> },

    /// A step was invoked from a state other than its predecessor.
    #[error("Step '{step}' requires state '{expected}', but the run is in state '{actual}'.")]
    StepOrder {
        step: String,
        expected: String,
        actual: String,
    },
}

/// Broad classification of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Template,
    FileSystem,
    Dependency,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ConfigNotFound { .. }
            | Error::ConfigParseError { .. }
            | Error::MissingSection(_)
            | Error::MissingField { .. }
            | Error::InvalidField { .. } => ErrorKind::Config,
            Error::TemplateNotFound { .. }
            | Error::TemplateReadError { .. }
            | Error::PatternError(_)
            | Error::MinijinjaError(_) => ErrorKind::Template,
            Error::WriteError { .. } | Error::FileSystemError { .. } => ErrorKind::FileSystem,
            Error::DependencyError { .. } | Error::StepOrder { .. } => ErrorKind::Dependency,
        }
    }

    pub(crate) fn missing_field(section: &str, field: &str) -> Self {
        Error::MissingField {
            section: section.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_field(section: &str, field: &str, expected: &str) -> Self {
        Error::InvalidField {
            section: section.to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn write<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::WriteError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn file_system<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        Error::FileSystemError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
