//! Project definitions for Pagesmith
//!
//! A `Project` is what the project service stores: metadata plus the page
//! content. Content travels either as a structured `{ "components": [...] }`
//! object or as that object JSON-encoded in a string, and must be decoded
//! before it can seed a builder session.

use crate::Component;
use chrono::{DateTime, Utc};
use pagesmith_core::{BuilderError, BuilderResult, ProjectId, Validatable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ProjectContent
// ============================================================================

/// The persisted page: a flat, ordered component list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectContent {
    /// Components in render order
    #[serde(default)]
    pub components: Vec<Component>,
}

impl ProjectContent {
    /// Create content from a component list
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Check if the page has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Encode as a compact JSON string
    pub fn encode(&self) -> BuilderResult<String> {
        serde_json::to_string(self).map_err(Into::into)
    }

    /// Decode from a JSON string
    ///
    /// A blank string is treated as a brand new, empty page.
    pub fn decode(encoded: &str) -> BuilderResult<Self> {
        if encoded.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(encoded).map_err(|e| BuilderError::hydration(e.to_string()))
    }
}

// ============================================================================
// PersistedContent
// ============================================================================

/// Project content as handed over by storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersistedContent {
    /// JSON-encoded `ProjectContent`
    Encoded(String),
    /// Already structured content
    Structured(ProjectContent),
}

impl PersistedContent {
    /// Decode into structured content, failing loudly on malformed input
    pub fn decode(&self) -> BuilderResult<ProjectContent> {
        match self {
            PersistedContent::Encoded(encoded) => ProjectContent::decode(encoded),
            PersistedContent::Structured(content) => Ok(content.clone()),
        }
    }
}

impl Default for PersistedContent {
    fn default() -> Self {
        PersistedContent::Structured(ProjectContent::default())
    }
}

impl From<ProjectContent> for PersistedContent {
    fn from(content: ProjectContent) -> Self {
        PersistedContent::Structured(content)
    }
}

// ============================================================================
// Project
// ============================================================================

/// A stored project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier
    pub id: ProjectId,

    /// Project name
    pub name: String,

    /// Page content
    #[serde(default)]
    pub content: PersistedContent,

    /// Last modification timestamp, as reported by storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Create a new, empty project with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            content: PersistedContent::default(),
            updated_at: Some(Utc::now()),
        }
    }

    /// Set the content
    pub fn with_content(mut self, content: impl Into<PersistedContent>) -> Self {
        self.content = content.into();
        self
    }

    /// Decode the content
    pub fn decoded_content(&self) -> BuilderResult<ProjectContent> {
        self.content.decode()
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl Validatable for Project {
    fn validate(&self) -> BuilderResult<()> {
        if self.name.trim().is_empty() {
            return Err(BuilderError::validation("Project name cannot be empty"));
        }
        if self.name.len() > 100 {
            return Err(BuilderError::validation(
                "Project name too long (max 100 characters)",
            ));
        }
        self.decoded_content().map(|_| ())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentId, ComponentKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> ProjectContent {
        ProjectContent::new(vec![
            Component::with_defaults(ComponentId::from("navbar-1"), ComponentKind::Navbar),
            Component::with_defaults(ComponentId::from("hero-2"), ComponentKind::Hero),
        ])
    }

    #[test]
    fn test_content_encode_decode() {
        let content = sample();
        let encoded = content.encode().unwrap();
        assert_eq!(ProjectContent::decode(&encoded).unwrap(), content);
    }

    #[test]
    fn test_blank_encoded_content_is_empty_page() {
        assert!(ProjectContent::decode("").unwrap().is_empty());
        assert!(ProjectContent::decode("   ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_content_is_hydration_error() {
        let err = ProjectContent::decode("{\"components\": [").unwrap_err();
        assert!(matches!(err, BuilderError::Hydration(_)));

        let err = ProjectContent::decode("{\"components\": [{\"id\": \"x-1\", \"type\": \"nope\"}]}")
            .unwrap_err();
        assert!(matches!(err, BuilderError::Hydration(_)));
    }

    #[test]
    fn test_persisted_content_untagged() {
        let encoded: PersistedContent =
            serde_json::from_value(json!("{\"components\":[]}")).unwrap();
        assert!(matches!(encoded, PersistedContent::Encoded(_)));
        assert!(encoded.decode().unwrap().is_empty());

        let structured: PersistedContent = serde_json::from_value(json!({
            "components": [{ "id": "hero-1", "type": "hero", "data": { "title": "A" } }]
        }))
        .unwrap();
        let decoded = structured.decode().unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.components[0].data["title"], json!("A"));
    }

    #[test]
    fn test_project_defaults_to_empty_content() {
        let id = Uuid::new_v4();
        let project: Project =
            serde_json::from_value(json!({ "id": id, "name": "Landing" })).unwrap();
        assert!(project.decoded_content().unwrap().is_empty());
        assert!(project.updated_at.is_none());
    }

    #[test]
    fn test_project_validation() {
        assert!(Project::new("Landing").validate().is_ok());
        assert!(Project::new("  ").validate().is_err());

        let broken = Project::new("Broken").with_content(PersistedContent::Encoded("{".into()));
        assert!(broken.validate().is_err());
    }
}
