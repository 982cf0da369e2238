//! Error types for Pagesmith
//!
//! This module provides unified error handling across the builder engine,
//! including structural errors on the component list, hydration errors,
//! network and credit failures from the persistence gateway, and more.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Pagesmith
#[derive(Debug, Error)]
pub enum BuilderError {
    // ========================================================================
    // Structural Errors
    // ========================================================================
    /// No component with this id exists in the current list
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// An index is outside the bounds of the list it addresses
    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Component type name is not part of the catalog
    #[error("Unknown component type: '{0}'")]
    UnknownComponentType(String),

    // ========================================================================
    // Property Errors
    // ========================================================================
    /// Field is not part of the component type's schema
    #[error("Field '{field}' is not defined for component type '{kind}'")]
    UnknownField { kind: String, field: String },

    /// Value shape does not match what the field schema expects
    #[error("Field '{field}' expects {expected}, got {found}")]
    FieldTypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    // ========================================================================
    // Hydration / Validation Errors
    // ========================================================================
    /// Persisted project content could not be decoded
    #[error("Failed to hydrate project content: {0}")]
    Hydration(String),

    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Project not found
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// A save request is already in flight for this session
    #[error("A save is already in progress")]
    SaveInProgress,

    /// An export request is already in flight for this session
    #[error("An export is already in progress")]
    ExportInProgress,

    /// Export rejected because the local balance does not cover the cost
    #[error("Insufficient credits: balance {balance}, export costs {cost}")]
    InsufficientCredits { balance: u64, cost: u64 },

    // ========================================================================
    // Network Errors
    // ========================================================================
    /// Request to an external collaborator failed
    #[error("Network error: {0}")]
    Network(String),

    /// External collaborator answered with a non-success status
    #[error("Service responded with status {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Serialization / Configuration Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl BuilderError {
    /// Create a component-not-found error
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        BuilderError::ComponentNotFound(id.to_string())
    }

    /// Create a hydration error
    pub fn hydration(msg: impl Into<String>) -> Self {
        BuilderError::Hydration(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        BuilderError::Validation(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        BuilderError::Network(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        BuilderError::Internal(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        BuilderError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Structural errors refer to stale ids or indices and are safe to ignore
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            BuilderError::ComponentNotFound(_) | BuilderError::IndexOutOfRange { .. }
        )
    }

    /// Check if this error came from talking to an external service
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            BuilderError::Network(_) | BuilderError::ServiceStatus { .. }
        )
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BuilderError::Validation(_)
                | BuilderError::UnknownField { .. }
                | BuilderError::FieldTypeMismatch { .. }
                | BuilderError::UnknownComponentType(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            BuilderError::Io(_) | BuilderError::FileRead { .. } | BuilderError::FileWrite { .. }
        )
    }
}

/// Result type alias using BuilderError
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> BuilderResult<T>;
}

impl<T, E: Into<BuilderError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> BuilderResult<T> {
        self.map_err(|e| {
            let err: BuilderError = e.into();
            BuilderError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_structural_errors() {
        let err = BuilderError::not_found("hero-1");
        assert!(err.is_structural());
        assert!(!err.is_network());
        assert_eq!(err.to_string(), "Component not found: hero-1");

        let err = BuilderError::IndexOutOfRange { index: 5, len: 3 };
        assert!(err.is_structural());
        assert_eq!(err.to_string(), "Index 5 out of range for 3 items");
    }

    #[test]
    fn test_field_errors() {
        let err = BuilderError::UnknownField {
            kind: "hero".to_string(),
            field: "colour".to_string(),
        };
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Field 'colour' is not defined for component type 'hero'"
        );
    }

    #[test]
    fn test_credit_error() {
        let err = BuilderError::InsufficientCredits {
            balance: 150,
            cost: 200,
        };
        assert!(!err.is_network());
        assert_eq!(
            err.to_string(),
            "Insufficient credits: balance 150, export costs 200"
        );
    }

    #[test]
    fn test_network_classification() {
        assert!(BuilderError::network("connection refused").is_network());
        let err = BuilderError::ServiceStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert!(err.is_network());
        assert!(!err.is_structural());
    }

    #[test]
    fn test_error_with_context() {
        let err = BuilderError::with_context("Saving project", "Permission denied");
        assert_eq!(err.to_string(), "Saving project: Permission denied");

        let res: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.with_context("Writing config").unwrap_err();
        assert_eq!(err.to_string(), "Writing config: IO error: denied");
    }

    #[test]
    fn test_io_error_classification() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BuilderError = io_err.into();
        assert!(err.is_io());
    }
}
