//! Field schema for the property editor
//!
//! A kind's schema is derived from its default data: the JSON shape of each
//! default value picks the editor widget, and a few key conventions refine
//! plain strings into colors, links, images, long text or fixed choices.

use crate::ComponentData;
use heck::ToTitleCase;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// FieldKind
// ============================================================================

/// How a field's value is edited and what JSON shape it holds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single line string
    Text,
    /// Multi-line string
    LongText,
    /// Any JSON number
    Number,
    /// Boolean switch
    Toggle,
    /// CSS color string
    Color,
    /// Link target
    Url,
    /// Image source
    Image,
    /// One of a fixed set of strings
    Select { options: Vec<String> },
    /// Ordered list of items
    List { item: ItemShape },
    /// Nested object with fixed keys
    Group { keys: Vec<String> },
}

impl FieldKind {
    /// Check whether a value has the shape this field stores
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text
            | FieldKind::LongText
            | FieldKind::Color
            | FieldKind::Url
            | FieldKind::Image => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Toggle => value.is_boolean(),
            FieldKind::Select { options } => value
                .as_str()
                .is_some_and(|s| options.iter().any(|o| o == s)),
            FieldKind::List { .. } => value.is_array(),
            FieldKind::Group { .. } => value.is_object(),
        }
    }

    /// Short description of the expected shape, for error messages
    pub fn expected(&self) -> String {
        match self {
            FieldKind::Text | FieldKind::LongText => "text".to_string(),
            FieldKind::Number => "a number".to_string(),
            FieldKind::Toggle => "a boolean".to_string(),
            FieldKind::Color => "a color".to_string(),
            FieldKind::Url => "a link".to_string(),
            FieldKind::Image => "an image source".to_string(),
            FieldKind::Select { options } => format!("one of [{}]", options.join(", ")),
            FieldKind::List { .. } => "a list".to_string(),
            FieldKind::Group { .. } => "an object".to_string(),
        }
    }
}

// ============================================================================
// ItemShape
// ============================================================================

/// Shape of the items inside a list field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum ItemShape {
    /// Plain strings
    Text,
    /// Plain numbers
    Number,
    /// Objects with a fixed set of keys
    Record { template: ComponentData },
    /// Anything (the default list was empty)
    Any,
}

impl ItemShape {
    fn infer(items: &[Value]) -> Self {
        match items.first() {
            Some(Value::String(_)) => ItemShape::Text,
            Some(Value::Number(_)) => ItemShape::Number,
            Some(Value::Object(first)) => ItemShape::Record {
                template: first.iter().map(|(k, v)| (k.clone(), blank(v))).collect(),
            },
            _ => ItemShape::Any,
        }
    }

    /// Check whether a value fits in this list
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ItemShape::Text => value.is_string(),
            ItemShape::Number => value.is_number(),
            ItemShape::Record { .. } => value.is_object(),
            ItemShape::Any => true,
        }
    }

    /// A blank item suitable for "add item" buttons
    pub fn blank_item(&self) -> Value {
        match self {
            ItemShape::Text | ItemShape::Any => Value::String(String::new()),
            ItemShape::Number => Value::from(0),
            ItemShape::Record { template } => Value::Object(template.clone()),
        }
    }

    /// Short description of the expected shape, for error messages
    pub fn expected(&self) -> &'static str {
        match self {
            ItemShape::Text => "a text item",
            ItemShape::Number => "a number item",
            ItemShape::Record { .. } => "an object item",
            ItemShape::Any => "any item",
        }
    }
}

fn blank(value: &Value) -> Value {
    match value {
        Value::String(_) => Value::String(String::new()),
        Value::Number(_) => Value::from(0),
        Value::Bool(_) => Value::Bool(false),
        Value::Array(_) => Value::Array(Vec::new()),
        Value::Object(map) => Value::Object(map.iter().map(|(k, v)| (k.clone(), blank(v))).collect()),
        Value::Null => Value::Null,
    }
}

// ============================================================================
// FieldSpec
// ============================================================================

/// One editable field of a component kind
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Key in the component's data payload
    pub key: String,
    /// Label shown in the property panel
    pub label: String,
    /// Editor widget and value shape
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Infer the spec for a key from its default value
    pub fn infer(key: &str, default: &Value) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_title_case(),
            kind: infer_kind(key, default),
        }
    }

    /// Item shape if this is a list field
    pub fn item_shape(&self) -> Option<&ItemShape> {
        match &self.kind {
            FieldKind::List { item } => Some(item),
            _ => None,
        }
    }
}

/// Derive a schema from a default data payload
pub fn infer_fields(defaults: &ComponentData) -> Vec<FieldSpec> {
    defaults
        .iter()
        .map(|(key, value)| FieldSpec::infer(key, value))
        .collect()
}

const LONG_TEXT_KEYS: &[&str] = &[
    "description",
    "content",
    "subtitle",
    "quote",
    "summary",
    "message",
    "answer",
    "excerpt",
    "html",
    "successMessage",
];

const IMAGE_KEYS: &[&str] = &["logo", "avatar", "src", "poster", "thumbnail"];

fn select_options(key: &str) -> Option<&'static [&'static str]> {
    match key {
        "alignment" => Some(&["left", "center", "right"]),
        "theme" => Some(&["light", "dark"]),
        "size" => Some(&["small", "medium", "large"]),
        "billingPeriod" => Some(&["monthly", "yearly"]),
        "aspectRatio" => Some(&["16:9", "4:3", "1:1", "21:9"]),
        "lineStyle" => Some(&["solid", "dashed", "dotted"]),
        _ => None,
    }
}

fn infer_kind(key: &str, default: &Value) -> FieldKind {
    match default {
        Value::Bool(_) => FieldKind::Toggle,
        Value::Number(_) => FieldKind::Number,
        Value::Array(items) => FieldKind::List {
            item: ItemShape::infer(items),
        },
        Value::Object(map) => FieldKind::Group {
            keys: map.keys().cloned().collect(),
        },
        Value::String(_) | Value::Null => infer_string_kind(key),
    }
}

fn infer_string_kind(key: &str) -> FieldKind {
    if let Some(options) = select_options(key) {
        return FieldKind::Select {
            options: options.iter().map(|o| o.to_string()).collect(),
        };
    }

    let lower = key.to_ascii_lowercase();
    if lower.ends_with("color") {
        FieldKind::Color
    } else if lower.contains("image") || IMAGE_KEYS.contains(&key) {
        FieldKind::Image
    } else if key.ends_with("Link") || key.ends_with("Url") || key == "url" || key == "href" {
        FieldKind::Url
    } else if LONG_TEXT_KEYS.contains(&key) {
        FieldKind::LongText
    } else {
        FieldKind::Text
    }
}

/// JSON type name of a value, for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_infer_basic_kinds() {
        assert_eq!(infer_kind("title", &json!("Hi")), FieldKind::Text);
        assert_eq!(infer_kind("subtitle", &json!("Hi")), FieldKind::LongText);
        assert_eq!(infer_kind("columns", &json!(3)), FieldKind::Number);
        assert_eq!(infer_kind("sticky", &json!(true)), FieldKind::Toggle);
        assert_eq!(infer_kind("backgroundColor", &json!("#fff")), FieldKind::Color);
        assert_eq!(infer_kind("buttonLink", &json!("#")), FieldKind::Url);
        assert_eq!(infer_kind("videoUrl", &json!("")), FieldKind::Url);
        assert_eq!(infer_kind("backgroundImage", &json!("")), FieldKind::Image);
        assert_eq!(infer_kind("avatar", &json!("")), FieldKind::Image);
    }

    #[test]
    fn test_infer_select() {
        let kind = infer_kind("alignment", &json!("center"));
        assert!(kind.accepts(&json!("left")));
        assert!(!kind.accepts(&json!("justify")));
        assert_eq!(kind.expected(), "one of [left, center, right]");
    }

    #[test]
    fn test_infer_lists() {
        let kind = infer_kind("links", &json!(["Home", "About"]));
        assert_eq!(kind, FieldKind::List { item: ItemShape::Text });

        let kind = infer_kind("plans", &json!([{ "name": "Pro", "price": 29, "highlighted": true }]));
        let FieldKind::List { item } = kind else {
            panic!("expected list");
        };
        assert_eq!(
            item.blank_item(),
            json!({ "name": "", "price": 0, "highlighted": false })
        );
        assert!(item.accepts(&json!({})));
        assert!(!item.accepts(&json!("text")));

        let kind = infer_kind("cells", &json!([]));
        assert_eq!(kind, FieldKind::List { item: ItemShape::Any });
    }

    #[test]
    fn test_infer_group() {
        let kind = infer_kind("style", &json!({ "borderRadius": 8, "shadow": false }));
        assert_eq!(
            kind,
            FieldKind::Group {
                keys: vec!["borderRadius".to_string(), "shadow".to_string()]
            }
        );
        assert!(kind.accepts(&json!({})));
        assert!(!kind.accepts(&json!([])));
    }

    #[test]
    fn test_field_spec_label() {
        let spec = FieldSpec::infer("buttonText", &json!("Go"));
        assert_eq!(spec.label, "Button Text");
        assert!(spec.item_shape().is_none());
    }

    #[test]
    fn test_accepts_rejects_wrong_shapes() {
        assert!(!FieldKind::Text.accepts(&json!(1)));
        assert!(!FieldKind::Number.accepts(&json!("1")));
        assert!(!FieldKind::Toggle.accepts(&Value::Null));
        assert_eq!(json_type_name(&json!([1])), "a list");
    }
}
