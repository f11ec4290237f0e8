//! Error types for property metadata and bean access

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while reading beans or form definitions
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A value of the wrong shape was passed where a bean was expected
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A bean class could not produce an instance
    #[error("cannot instantiate bean '{type_name}': {reason}")]
    Instantiation { type_name: String, reason: String },

    /// Reading a property off a bean failed
    #[error("cannot read property '{property}' of bean '{type_name}': {message}")]
    PropertyAccess {
        type_name: String,
        property: String,
        message: String,
    },

    /// Form definition file not found
    #[error("form definition not found: {path}")]
    DefinitionNotFound { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON conversion error while reflecting a bean
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::Instantiation {
            type_name: "Account".into(),
            reason: "no default constructor".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot instantiate bean 'Account': no default constructor"
        );
    }

    #[test]
    fn test_property_access_error() {
        let err = FieldsError::PropertyAccess {
            type_name: "Account".into(),
            property: "login".into(),
            message: "getter failed".into(),
        };
        assert!(err.to_string().contains("login"));
        assert!(err.to_string().contains("getter failed"));
    }
}
