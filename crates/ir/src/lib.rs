//! # Pagesmith IR
//!
//! This crate provides the page model for Pagesmith projects.
//! It contains the data structures needed to describe a page and the
//! static registry of component types a page is assembled from.
//!
//! ## Core Concepts
//!
//! - **Component**: one block on the page (`hero`, `pricing`, `footer`, ...) with an open data payload
//! - **ComponentKind**: the closed catalog of component types
//! - **Registry**: per-kind descriptors pairing a defaults factory with a field schema
//! - **ProjectContent**: the flat, ordered component list that gets persisted
//! - **Project**: a stored project whose content may arrive JSON-encoded
//!

// Module declarations
pub mod catalog;
pub mod component;
pub mod project;
pub mod registry;
pub mod schema;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use component::{Component, ComponentData, ComponentPatch, IdMinter};
pub use project::{PersistedContent, Project, ProjectContent};
pub use registry::{ComponentKind, KindDescriptor, create_default};
pub use schema::{FieldKind, FieldSpec, ItemShape};
pub use serialization::{load_project, save_project};
pub use validation::{ValidationResult, ValidationRule, Validator};

// Re-export core types that are commonly used with IR
pub use pagesmith_core::{
    BuilderError, BuilderResult, Category, ComponentId, Framework, ProjectId,
};

/// Current schema version for project files
pub const SCHEMA_VERSION: u32 = 1;

/// File extension for Pagesmith project files
pub const PROJECT_FILE_EXTENSION: &str = "pgs";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        BuilderError, BuilderResult, Category, Component, ComponentData, ComponentId,
        ComponentKind, ComponentPatch, FieldKind, FieldSpec, Framework, IdMinter,
        PersistedContent, Project, ProjectContent, ProjectId, create_default,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        assert_eq!(SCHEMA_VERSION, 1);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(PROJECT_FILE_EXTENSION, "pgs");
    }
}
