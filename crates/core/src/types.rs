//! Core types used throughout Pagesmith
//!
//! This module contains the identifiers and small closed enums shared by the
//! data model, the builder store and the persistence gateway.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Type alias for project identifiers handed out by the project service
pub type ProjectId = uuid::Uuid;

/// Identifier of a component on the page, formatted as `{type}-{timestamp}`
///
/// The timestamp is the creation time in milliseconds since the Unix epoch.
/// Ids are opaque once created; the parts are only inspected for display and
/// for seeding the id minter after hydration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    /// Build an id from a type name and a millisecond timestamp
    pub fn new(type_name: &str, timestamp_ms: i64) -> Self {
        Self(format!("{}-{}", type_name, timestamp_ms))
    }

    /// Wrap an existing id string without checking its format
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The type prefix of the id (everything before the last `-`)
    pub fn type_prefix(&self) -> Option<&str> {
        self.0.rsplit_once('-').map(|(prefix, _)| prefix)
    }

    /// The creation timestamp suffix, if the id follows the standard scheme
    pub fn timestamp_ms(&self) -> Option<i64> {
        self.0
            .rsplit_once('-')
            .and_then(|(_, suffix)| suffix.parse::<i64>().ok())
    }

    /// Creation time decoded from the id
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp_ms()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ComponentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Palette Categories
// ============================================================================

/// Palette grouping for component types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Navigation,
    Hero,
    Content,
    Features,
    Commerce,
    SocialProof,
    Forms,
    Media,
    Layout,
    Footer,
}

impl Category {
    /// Get the display name for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Navigation => "Navigation",
            Category::Hero => "Hero",
            Category::Content => "Content",
            Category::Features => "Features",
            Category::Commerce => "Commerce",
            Category::SocialProof => "Social Proof",
            Category::Forms => "Forms",
            Category::Media => "Media",
            Category::Layout => "Layout",
            Category::Footer => "Footer",
        }
    }

    /// All categories in palette order
    pub fn all() -> &'static [Category] {
        &[
            Category::Navigation,
            Category::Hero,
            Category::Content,
            Category::Features,
            Category::Commerce,
            Category::SocialProof,
            Category::Forms,
            Category::Media,
            Category::Layout,
            Category::Footer,
        ]
    }

    /// Parse a category from its kebab-case or display name
    pub fn parse(value: &str) -> Option<Category> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        Category::all()
            .iter()
            .copied()
            .find(|c| c.slug() == normalized)
    }

    /// Kebab-case identifier
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Navigation => "navigation",
            Category::Hero => "hero",
            Category::Content => "content",
            Category::Features => "features",
            Category::Commerce => "commerce",
            Category::SocialProof => "social-proof",
            Category::Forms => "forms",
            Category::Media => "media",
            Category::Layout => "layout",
            Category::Footer => "footer",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Export Frameworks
// ============================================================================

/// CSS framework the export service targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Tailwind,
    Bootstrap,
}

impl Framework {
    /// Wire name of the framework
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Tailwind => "tailwind",
            Framework::Bootstrap => "bootstrap",
        }
    }

    /// All supported frameworks
    pub fn all() -> &'static [Framework] {
        &[Framework::Tailwind, Framework::Bootstrap]
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Framework {
    type Err = crate::BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tailwind" => Ok(Framework::Tailwind),
            "bootstrap" => Ok(Framework::Bootstrap),
            other => Err(crate::BuilderError::validation(format!(
                "Unsupported export framework '{}'",
                other
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
