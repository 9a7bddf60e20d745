//! Error handling for the appforge application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for appforge operations.
///
/// This enum represents all possible errors that can occur within the
/// application. It implements the standard Error trait through thiserror's
/// derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors that occur while loading or validating the catalog
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// The requested template id (or alias) does not exist in the catalog
    #[error("Template '{name}' not found in catalog (available: {available})")]
    TemplateNotFound { name: String, available: String },

    /// Invalid template selection in interactive mode
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Represents errors that occur while writing the output project
    #[error("Failed to materialize '{path}': {source}")]
    Materialize { path: String, source: io::Error },

    /// Represents errors in parsing or rewriting a package manifest
    #[error("Package manifest error in '{path}': {source}")]
    Manifest {
        path: String,
        source: serde_json::Error,
    },

    /// Represents errors in building exclusion patterns
    #[error("Exclusion pattern error: {0}")]
    Pattern(String),

    /// Represents errors that occur during user interaction
    #[error("Prompt error: {0}")]
    Prompt(String),
}

/// Convenience type alias for Results with appforge's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
