//! # Pagesmith Builder
//!
//! Editing state engine for Pagesmith pages.
//!
//! ## Core Concepts
//!
//! - **BuilderStore**: the page being edited, with undo/redo history, selection and UI flags
//! - **DragCoordinator**: turns palette and canvas drags into store inserts and moves
//! - **PropertyEditor**: schema-checked field editing for one component
//! - **Gateway**: load, save and export through the project, export and credits services
//!
//! The store is synchronous and owns no IO; everything touching the network
//! goes through [`Gateway`].

pub mod config;
pub mod coordinator;
pub mod editor;
pub mod gateway;
pub mod history;
pub mod services;
pub mod store;

pub use config::BuilderConfig;
pub use coordinator::{Direction, DragCoordinator, DragSource, DropOutcome, DropTarget, IgnoreReason};
pub use editor::PropertyEditor;
pub use gateway::{CreditWallet, Gateway};
pub use history::{DEFAULT_HISTORY_LIMIT, History, Snapshot};
pub use services::{
    CreditsService, ExportArtifact, ExportService, FileProjectService, HttpServices,
    ProjectService,
};
pub use store::{BuilderStore, Panel, PanelVisibility, SaveTicket};

pub use pagesmith_core;
pub use pagesmith_ir;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
