//! # Pagesmith Core
//!
//! Core types, traits, and error handling for Pagesmith.
//!
//! This crate provides the foundational building blocks used throughout
//! the Pagesmith workspace, including:
//!
//! - **Types**: Identifiers (`ComponentId`, `ProjectId`), palette categories and export frameworks
//! - **Traits**: Common behaviors like `Validatable`, `Persistable` and `Identifiable`
//! - **Errors**: Unified error handling with `BuilderError` and `BuilderResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{BuilderError, BuilderResult, ResultExt};
pub use traits::{Identifiable, Persistable, Validatable};
pub use types::{Category, ComponentId, Framework, ProjectId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
