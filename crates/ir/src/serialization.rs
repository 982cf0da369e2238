//! Serialization and deserialization for Pagesmith project files
//!
//! Local project files wrap a `Project` with version information. Content is
//! always written structured; encoded content read from older files is
//! decoded on load so that the file on disk is normalized after one save.

use crate::{Project, SCHEMA_VERSION};
use pagesmith_core::{BuilderError, BuilderResult, Category, Persistable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Constants
// ============================================================================

/// File extension for Pagesmith projects
pub const PROJECT_EXTENSION: &str = crate::PROJECT_FILE_EXTENSION;

// ============================================================================
// Project File Wrapper
// ============================================================================

/// Wrapper for project files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Schema version for migration purposes
    pub schema_version: u32,

    /// The project data
    pub project: Project,
}

impl ProjectFile {
    /// Create a new project file from a project
    pub fn new(project: Project) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            project,
        }
    }

    /// Check if migration is needed
    pub fn needs_migration(&self) -> bool {
        self.schema_version < SCHEMA_VERSION
    }

    /// Migrate to the latest schema version
    pub fn migrate(&mut self) -> BuilderResult<()> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(BuilderError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        self.schema_version = SCHEMA_VERSION;
        Ok(())
    }

    fn normalized(mut self) -> BuilderResult<Self> {
        let content = self.project.decoded_content()?;
        self.project.content = content.into();
        Ok(self)
    }
}

impl Persistable for ProjectFile {
    fn file_extension() -> &'static str {
        PROJECT_EXTENSION
    }

    fn schema_version() -> u32 {
        SCHEMA_VERSION
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a project to a file
///
/// # Example
///
/// ```rust,ignore
/// use pagesmith_ir::{Project, save_project};
///
/// let project = Project::new("Landing");
/// save_project(&project, "landing.pgs").unwrap();
/// ```
pub fn save_project(project: &Project, path: impl AsRef<Path>) -> BuilderResult<()> {
    let path = path.as_ref();
    let json = save_project_to_string(project).map_err(|e| BuilderError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| BuilderError::FileWrite {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| BuilderError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}

/// Save a project to a pretty-printed JSON string
pub fn save_project_to_string(project: &Project) -> BuilderResult<String> {
    ProjectFile::new(project.clone()).normalized()?.to_json()
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a project from a file
pub fn load_project(path: impl AsRef<Path>) -> BuilderResult<Project> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(BuilderError::ProjectNotFound(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| BuilderError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_project_from_string(&json).map_err(|e| match e {
        BuilderError::JsonSerialization(je) => BuilderError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid project file format: {}", je),
        },
        other => other,
    })
}

/// Load a project from a JSON string
///
/// Accepts both the versioned file wrapper and a bare project object.
pub fn load_project_from_string(json: &str) -> BuilderResult<Project> {
    if let Ok(mut file) = ProjectFile::from_json(json) {
        if file.needs_migration() {
            file.migrate()?;
        }
        return Ok(file.normalized()?.project);
    }

    let project: Project = serde_json::from_str(json)?;
    Ok(ProjectFile::new(project).normalized()?.project)
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Check if a file is a loadable Pagesmith project file
pub fn is_project_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if path.extension().is_none_or(|ext| ext != PROJECT_EXTENSION) {
        return false;
    }
    load_project(path).is_ok()
}

/// Get the default file name for a project
pub fn default_file_name(project_name: &str) -> String {
    let safe_name: String = project_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}.{}", safe_name.to_lowercase(), PROJECT_EXTENSION)
}

/// Ensure a path has the correct extension
pub fn ensure_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if path.extension().is_none_or(|e| e != PROJECT_EXTENSION) {
        let mut new_path = path.to_path_buf();
        new_path.set_extension(PROJECT_EXTENSION);
        new_path
    } else {
        path.to_path_buf()
    }
}

/// Create a backup of a project file before overwriting
pub fn backup_project(path: impl AsRef<Path>) -> BuilderResult<Option<PathBuf>> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    let backup_path = path.with_extension(format!("{}.backup", PROJECT_EXTENSION));

    std::fs::copy(path, &backup_path).map_err(|e| BuilderError::FileWrite {
        path: backup_path.clone(),
        message: format!("Failed to create backup: {}", e),
    })?;

    Ok(Some(backup_path))
}

/// Summary of a project file for listings
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPreview {
    pub name: String,
    pub component_count: usize,
    pub categories: Vec<Category>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Summarize a project file
pub fn preview_project(path: impl AsRef<Path>) -> BuilderResult<ProjectPreview> {
    let project = load_project(path)?;
    let content = project.decoded_content()?;

    let mut categories: Vec<Category> = Vec::new();
    for component in &content.components {
        let category = component.kind.category();
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    Ok(ProjectPreview {
        name: project.name,
        component_count: content.len(),
        categories,
        updated_at: project.updated_at,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Component, ComponentId, ComponentKind, PersistedContent, ProjectContent};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn landing() -> Project {
        Project::new("Landing").with_content(ProjectContent::new(vec![
            Component::with_defaults(ComponentId::from("navbar-1"), ComponentKind::Navbar),
            Component::with_defaults(ComponentId::from("hero-2"), ComponentKind::Hero),
            Component::with_defaults(ComponentId::from("footer-3"), ComponentKind::Footer),
        ]))
    }

    #[test]
    fn test_save_and_load_project() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("landing.pgs");

        let project = landing();
        save_project(&project, &path).unwrap();
        assert!(path.exists());

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.name, "Landing");
        assert_eq!(loaded.id, project.id);
        assert_eq!(
            loaded.decoded_content().unwrap(),
            project.decoded_content().unwrap()
        );
    }

    #[test]
    fn test_encoded_content_is_normalized() {
        let inner = landing().decoded_content().unwrap();
        let project = Project::new("Encoded")
            .with_content(PersistedContent::Encoded(inner.encode().unwrap()));

        let json = save_project_to_string(&project).unwrap();
        let loaded = load_project_from_string(&json).unwrap();
        assert!(matches!(loaded.content, PersistedContent::Structured(_)));
        assert_eq!(loaded.decoded_content().unwrap(), inner);
    }

    #[test]
    fn test_load_bare_project() {
        let project = landing();
        let bare = serde_json::to_string(&project).unwrap();
        let loaded = load_project_from_string(&bare).unwrap();
        assert_eq!(loaded.name, "Landing");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_project("/nonexistent/path/project.pgs");
        match result {
            Err(BuilderError::ProjectNotFound(path)) => assert!(path.contains("nonexistent")),
            other => panic!("Expected ProjectNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_future_schema() {
        let mut file = ProjectFile::new(landing());
        file.schema_version = SCHEMA_VERSION + 1;
        assert!(file.migrate().is_err());
        assert!(!file.needs_migration());
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_file_name("My Project"), "my_project.pgs");
        assert_eq!(default_file_name("Test!@#$%"), "test_____.pgs");
        assert_eq!(default_file_name("simple"), "simple.pgs");
    }

    #[test]
    fn test_ensure_extension() {
        for input in ["project", "project.pgs", "project.json"] {
            let path = ensure_extension(input);
            assert_eq!(path.extension().unwrap(), PROJECT_EXTENSION);
        }
    }

    #[test]
    fn test_backup_project() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.pgs");
        save_project(&landing(), &path).unwrap();

        let backup_path = backup_project(&path).unwrap();
        assert!(backup_path.is_some_and(|p| p.exists()));
        assert!(backup_project("/nonexistent/path.pgs").unwrap().is_none());
    }

    #[test]
    fn test_is_project_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("valid.pgs");
        save_project(&landing(), &path).unwrap();
        assert!(is_project_file(&path));

        let invalid_path = temp_dir.path().join("invalid.txt");
        std::fs::write(&invalid_path, "not a project").unwrap();
        assert!(!is_project_file(&invalid_path));
    }

    #[test]
    fn test_preview_project() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preview.pgs");
        save_project(&landing(), &path).unwrap();

        let preview = preview_project(&path).unwrap();
        assert_eq!(preview.name, "Landing");
        assert_eq!(preview.component_count, 3);
        assert_eq!(
            preview.categories,
            vec![Category::Navigation, Category::Hero, Category::Footer]
        );
    }
}
