//! Error types for template parsing

use thiserror::Error;

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Errors that can occur while building a template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template source is malformed
    #[error("template '{template}' line {line}: {message}")]
    Parse {
        template: String,
        line: usize,
        message: String,
    },

    /// A block was requested that the template does not declare
    #[error("template '{template}' has no block '{block}'")]
    UnknownBlock { template: String, block: String },
}
