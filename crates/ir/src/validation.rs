//! Validation rules for Pagesmith page content
//!
//! Validation runs over a decoded `ProjectContent`. Errors mark content that
//! would break a builder session (duplicate or malformed ids); warnings flag
//! data the property editor would not know how to edit.

use crate::{ComponentKind, Project, ProjectContent};
use pagesmith_core::{BuilderError, BuilderResult};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Convert to BuilderResult (fails if any errors)
    pub fn to_result(self) -> BuilderResult<()> {
        if self.valid {
            Ok(())
        } else {
            let msg = self
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            Err(BuilderError::validation(msg))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "components[2].data.title")
    pub path: Option<String>,

    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
            suggestion: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a suggestion to the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    EmptyProjectName,
    InvalidProjectName,
    UndecodableContent,
    DuplicateComponentId,
    InvalidComponentId,
    Custom,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning code
    pub code: ValidationWarningCode,

    /// Human-readable warning message
    pub message: String,

    /// Path to the element
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    EmptyPage,
    IdPrefixMismatch,
    UnknownField,
    FieldShapeMismatch,
    Custom,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Get the rule description
    fn description(&self) -> &'static str;

    /// Validate page content and return the result
    fn validate(&self, content: &ProjectContent) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Content validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with default rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(ComponentIdsRule));
        validator.add_rule(Box::new(ComponentFieldsRule));
        validator.add_rule(Box::new(EmptyPageRule));
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Validate content with all rules
    pub fn validate(&self, content: &ProjectContent) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for rule in &self.rules {
            result.merge(rule.validate(content));
        }

        result
    }

    /// Validate a project: metadata, decodability, then content rules
    pub fn validate_project(&self, project: &Project) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if project.name.trim().is_empty() {
            result.add_error(ValidationError::new(
                ValidationErrorCode::EmptyProjectName,
                "Project name cannot be empty",
            ));
        } else if project.name.len() > 100 {
            result.add_error(
                ValidationError::new(
                    ValidationErrorCode::InvalidProjectName,
                    "Project name too long (max 100 characters)",
                )
                .with_suggestion("Use a shorter project name"),
            );
        }

        match project.decoded_content() {
            Ok(content) => result.merge(self.validate(&content)),
            Err(e) => result.add_error(
                ValidationError::new(ValidationErrorCode::UndecodableContent, e.to_string())
                    .with_path("content"),
            ),
        }

        result
    }
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: component ids are well-formed and unique
pub struct ComponentIdsRule;

impl ValidationRule for ComponentIdsRule {
    fn name(&self) -> &'static str {
        "component_ids"
    }

    fn description(&self) -> &'static str {
        "Validates that component ids follow {type}-{timestamp} and are unique"
    }

    fn validate(&self, content: &ProjectContent) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut seen: HashSet<&str> = HashSet::new();

        for (index, component) in content.components.iter().enumerate() {
            let path = format!("components[{}]", index);
            let id = component.id.as_str();

            if !is_valid_component_id(id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::InvalidComponentId,
                        format!("Component id '{}' is not of the form type-timestamp", id),
                    )
                    .with_path(&path),
                );
            } else if component.id.type_prefix() != Some(component.kind.name()) {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::IdPrefixMismatch,
                        format!(
                            "Component id '{}' does not start with its type '{}'",
                            id,
                            component.kind.name()
                        ),
                    )
                    .with_path(&path),
                );
            }

            if !seen.insert(id) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicateComponentId,
                        format!("Duplicate component id: '{}'", id),
                    )
                    .with_path(&path)
                    .with_suggestion("Duplicate the component instead of copying its id"),
                );
            }
        }

        result
    }
}

/// Rule: component data matches the kind's field schema
pub struct ComponentFieldsRule;

impl ValidationRule for ComponentFieldsRule {
    fn name(&self) -> &'static str {
        "component_fields"
    }

    fn description(&self) -> &'static str {
        "Warns about data keys the property editor does not know and mistyped values"
    }

    fn validate(&self, content: &ProjectContent) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for (index, component) in content.components.iter().enumerate() {
            for (key, value) in &component.data {
                let path = format!("components[{}].data.{}", index, key);
                match component.kind.field(key) {
                    None => result.add_warning(
                        ValidationWarning::new(
                            ValidationWarningCode::UnknownField,
                            format!("'{}' is not a field of {}", key, component.kind.label()),
                        )
                        .with_path(path),
                    ),
                    Some(spec) if !value.is_null() && !spec.kind.accepts(value) => result
                        .add_warning(
                            ValidationWarning::new(
                                ValidationWarningCode::FieldShapeMismatch,
                                format!(
                                    "expected {}, found {}",
                                    spec.kind.expected(),
                                    crate::schema::json_type_name(value)
                                ),
                            )
                            .with_path(path),
                        ),
                    Some(_) => {}
                }
            }
        }

        result
    }
}

/// Rule: warn about pages without components
pub struct EmptyPageRule;

impl ValidationRule for EmptyPageRule {
    fn name(&self) -> &'static str {
        "empty_page"
    }

    fn description(&self) -> &'static str {
        "Warns when the page has no components"
    }

    fn validate(&self, content: &ProjectContent) -> ValidationResult {
        let mut result = ValidationResult::ok();
        if content.is_empty() {
            result.add_warning(ValidationWarning::new(
                ValidationWarningCode::EmptyPage,
                "Page has no components",
            ));
        }
        result
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn component_id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*-[0-9]+$").ok())
        .as_ref()
}

/// Check if a string is a well-formed component id
pub fn is_valid_component_id(id: &str) -> bool {
    component_id_pattern().is_some_and(|re| re.is_match(id))
}

/// Check if a kind name is part of the catalog
pub fn is_known_kind(name: &str) -> bool {
    ComponentKind::from_name(name).is_some()
}

// ============================================================================
// Tests
// ============================================================================
