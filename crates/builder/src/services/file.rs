//! Project service backed by a directory of project files
//!
//! Each project lives in `{dir}/{id}.pgs`. File IO runs on the blocking pool.

use super::ProjectService;
use pagesmith_core::{BuilderError, BuilderResult, ProjectId, ResultExt};
use pagesmith_ir::serialization::{ensure_extension, load_project, save_project};
use pagesmith_ir::{Project, ProjectContent};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local project storage
#[derive(Debug, Clone)]
pub struct FileProjectService {
    dir: PathBuf,
}

impl FileProjectService {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a project's file
    pub fn path_for(&self, id: ProjectId) -> PathBuf {
        ensure_extension(self.dir.join(id.to_string()))
    }

    /// Store a new project, returning its file path
    pub fn insert(&self, project: &Project) -> BuilderResult<PathBuf> {
        let path = self.path_for(project.id);
        save_project(project, &path)?;
        debug!(id = %project.id, path = %path.display(), "project stored");
        Ok(path)
    }
}

async fn blocking<T, F>(f: F) -> BuilderResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> BuilderResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BuilderError::internal(format!("file task failed: {}", e)))?
}

#[async_trait::async_trait]
impl ProjectService for FileProjectService {
    async fn fetch_project(&self, id: ProjectId) -> BuilderResult<Project> {
        let path = self.path_for(id);
        blocking(move || match load_project(&path) {
            Err(BuilderError::ProjectNotFound(_)) => Err(BuilderError::ProjectNotFound(id.to_string())),
            other => other,
        })
        .await
    }

    async fn update_project(
        &self,
        id: ProjectId,
        content: ProjectContent,
    ) -> BuilderResult<Project> {
        let path = self.path_for(id);
        blocking(move || {
            let mut project = load_project(&path)?;
            project.content = content.into();
            project.touch();
            save_project(&project, &path).with_context(format!("Saving project {}", id))?;
            Ok(project)
        })
        .await
    }
}
