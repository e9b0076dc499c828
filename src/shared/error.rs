use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to tell a clean run apart from a run that
/// completed but could not enrich anything, and from hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the command completed (partial enrichment counts as success)
    Success = 0,
    /// Enrichment ran to the end but every attempted lookup failed
    EnrichmentIncomplete = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed input, unknown field, external tool failure, ...)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::EnrichmentIncomplete => write!(f, "Enrichment Incomplete (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors.
///
/// Structural errors (`Format`, `UnknownField`, `ExternalTool`, file errors)
/// abort a command. `InvalidIdentifier` and `Lookup` are raised per component
/// and are collected into the enrichment report instead of aborting the run.
#[derive(Debug, Clone, Error)]
pub enum SbomError {
    #[error("Unsupported or malformed SBOM: {path}\nDetails: {details}\n\n💡 Hint: Only CycloneDX JSON documents (spec version 1.2 to 1.6) are supported")]
    Format { path: PathBuf, details: String },

    #[error("Invalid package identifier '{identifier}': {reason}\n\n💡 Hint: Package URLs look like pkg:pypi/requests@2.31.0")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("Lookup failed for '{identifier}' after {attempts} attempt(s): {details}")]
    Lookup {
        identifier: String,
        attempts: u32,
        details: String,
    },

    #[error("Unknown field '{field}'\n\n💡 Hint: Available fields are: {available}")]
    UnknownField { field: String, available: String },

    #[error("External tool '{tool}' failed: {details}\n\n💡 Hint: Make sure '{tool}' is installed and available in your PATH")]
    ExternalTool { tool: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for configuration values and requests
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Interrupted by user, no output has been written")]
    Interrupted,
}
