//! Core traits for Pagesmith
//!
//! This module defines the traits that types throughout the workspace
//! implement to provide consistent behavior for validation, lookup by id,
//! and persistence.

use crate::error::BuilderResult;
use crate::types::ComponentId;
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use pagesmith_core::{Validatable, BuilderResult, BuilderError};
///
/// struct Settings {
///     export_cost: u64,
/// }
///
/// impl Validatable for Settings {
///     fn validate(&self) -> BuilderResult<()> {
///         if self.export_cost == 0 {
///             return Err(BuilderError::validation("export cost must be positive"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `BuilderError` describing the problem.
    fn validate(&self) -> BuilderResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for page nodes addressed by a component id
pub trait Identifiable {
    /// Get the unique identifier
    fn id(&self) -> &ComponentId;

    /// Check if this matches another identifier
    fn matches_id(&self, id: &ComponentId) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Trait for types that can be serialized to and deserialized from files
///
/// Project files are JSON documents; the trait provides string helpers
/// on top of serde.
pub trait Persistable: Serialize + DeserializeOwned + Sized {
    /// Get the file extension for this type (without the dot)
    fn file_extension() -> &'static str;

    /// Get the schema version for migration purposes
    fn schema_version() -> u32 {
        1
    }

    /// Save to a JSON string
    fn to_json(&self) -> BuilderResult<String> {
        serde_json::to_string_pretty(self).map_err(Into::into)
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> BuilderResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

// ============================================================================
// Tests
// ============================================================================
