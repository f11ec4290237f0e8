//! Error types for form generation

use std::path::PathBuf;

use formbind_fields::FieldsError;
use thiserror::Error;

/// Result type for whole-form and configuration operations
pub type Result<T> = std::result::Result<T, FormError>;

/// Errors surfaced by form-level operations.
///
/// Single-field operations never fail: missing tags, empty names and empty
/// values are silent no-ops.
#[derive(Debug, Error)]
pub enum FormError {
    /// Bean reflection, instantiation or property access failed
    #[error(transparent)]
    Fields(#[from] FieldsError),

    /// Configuration could not be extracted
    #[error("Failed to load form builder configuration: {source}")]
    Config { source: Box<figment::Error> },

    /// Configuration file has an extension we do not read
    #[error("Unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl From<figment::Error> for FormError {
    fn from(error: figment::Error) -> Self {
        FormError::Config {
            source: Box::new(error),
        }
    }
}
