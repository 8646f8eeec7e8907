use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all pipcat operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PipcatError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed Pipfile.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check the module's Pipfile for syntax errors"))]
    Manifest { message: String },

    /// A package entry or configuration line failed validation.
    ///
    /// Scoped to the offending entry; callers skip it and continue.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A version constraint contained no parseable numeric run.
    #[error("Version error: {message}")]
    Version { message: String },

    /// An external tool (pyenv, pipenv) failed or produced unusable output.
    #[error("External tool failed: {message}")]
    Tool { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type PipcatResult<T> = miette::Result<T>;
