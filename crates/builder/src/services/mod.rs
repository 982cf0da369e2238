//! External collaborators of the builder
//!
//! The gateway only talks to these traits. `HttpServices` implements all
//! three against the hosted API; `FileProjectService` keeps projects in a
//! local directory for offline work and tests.

pub mod file;
pub mod http;

pub use file::FileProjectService;
pub use http::HttpServices;

use pagesmith_core::{BuilderError, BuilderResult, Framework, ProjectId};
use pagesmith_ir::{Project, ProjectContent};
use std::path::{Path, PathBuf};

// =============================================================================
// EXPORT ARTIFACT
// =============================================================================

/// Downloadable export produced by the export service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Fallback file name when the service does not suggest one
    pub fn default_file_name(project: ProjectId, framework: Framework) -> String {
        format!("{}-{}.zip", project, framework)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact into `dir`, returning the written path
    pub fn write_to(&self, dir: impl AsRef<Path>) -> BuilderResult<PathBuf> {
        // Only the final path component of a suggested name is used
        let name = Path::new(&self.file_name)
            .file_name()
            .map(|n| n.to_os_string())
            .ok_or_else(|| BuilderError::validation(format!("Invalid file name: {}", self.file_name)))?;
        let path = dir.as_ref().join(name);
        std::fs::write(&path, &self.bytes).map_err(|e| BuilderError::FileWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path)
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Project storage
#[async_trait::async_trait]
pub trait ProjectService: Send + Sync {
    /// Fetch a project with its (possibly encoded) content
    async fn fetch_project(&self, id: ProjectId) -> BuilderResult<Project>;

    /// Replace a project's content, returning the stored project
    async fn update_project(&self, id: ProjectId, content: ProjectContent)
    -> BuilderResult<Project>;
}

/// Export generation
#[async_trait::async_trait]
pub trait ExportService: Send + Sync {
    /// Generate a downloadable export of the saved project
    async fn generate_export(
        &self,
        id: ProjectId,
        framework: Framework,
    ) -> BuilderResult<ExportArtifact>;
}

/// Account credits
#[async_trait::async_trait]
pub trait CreditsService: Send + Sync {
    /// Current balance
    async fn balance(&self) -> BuilderResult<u64>;

    /// Deduct `amount`, returning the authoritative new balance
    async fn deduct(&self, amount: u64) -> BuilderResult<u64>;
}

// =============================================================================
// TESTS
// =============================================================================
