//! Property editor protocol
//!
//! A [`PropertyEditor`] edits the data of one component. Every edit reads the
//! component as it currently is in the store, builds a new data object and
//! goes through [`BuilderStore::update_component`], so each edit is one undo
//! step. The selection is an id, so the selected component the panel renders
//! is always the one the canvas shows.

use crate::store::BuilderStore;
use pagesmith_core::{BuilderError, BuilderResult, ComponentId};
use pagesmith_ir::schema::json_type_name;
use pagesmith_ir::{Component, ComponentData, ComponentKind, ComponentPatch, FieldKind, FieldSpec, ItemShape};
use serde_json::Value;
use tracing::debug;

/// Editor bound to one component of a store
#[derive(Debug)]
pub struct PropertyEditor<'a> {
    store: &'a mut BuilderStore,
    id: ComponentId,
    kind: ComponentKind,
}

impl<'a> PropertyEditor<'a> {
    /// Open the editor for a component and select it
    pub fn open(store: &'a mut BuilderStore, id: &ComponentId) -> BuilderResult<Self> {
        let kind = store
            .component(id)
            .map(|c| c.kind)
            .ok_or_else(|| BuilderError::not_found(id))?;
        store.select_component(id)?;
        Ok(Self {
            store,
            id: id.clone(),
            kind,
        })
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Fields shown in the panel
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.kind.fields()
    }

    /// The component as it is in the store
    pub fn component(&self) -> BuilderResult<&Component> {
        self.store
            .component(&self.id)
            .ok_or_else(|| BuilderError::not_found(&self.id))
    }

    /// Current value of a field, falling back to the registry default
    pub fn read_field(&self, key: &str) -> Value {
        self.component()
            .map(|c| c.field_or_default(key))
            .unwrap_or(Value::Null)
    }

    fn spec(&self, key: &str) -> BuilderResult<&'static FieldSpec> {
        self.kind.field(key).ok_or_else(|| BuilderError::UnknownField {
            kind: self.kind.name().to_string(),
            field: key.to_string(),
        })
    }

    /// Set one field
    pub fn update_field(&mut self, key: &str, value: Value) -> BuilderResult<()> {
        let spec = self.spec(key)?;
        if !spec.kind.accepts(&value) {
            return Err(mismatch(key, spec.kind.expected(), &value));
        }
        self.write_field(key, value)
    }

    fn write_field(&mut self, key: &str, value: Value) -> BuilderResult<()> {
        let mut data: ComponentData = self.component()?.data.clone();
        data.insert(key.to_string(), value);
        debug!(id = %self.id, field = key, "field updated");
        self.store
            .update_component(&self.id, ComponentPatch::data(data))
    }

    // ------------------------------------------------------------------------
    // List Fields
    // ------------------------------------------------------------------------

    fn list(&self, key: &str) -> BuilderResult<(&'static ItemShape, Vec<Value>)> {
        let spec = self.spec(key)?;
        let Some(shape) = spec.item_shape() else {
            return Err(BuilderError::FieldTypeMismatch {
                field: key.to_string(),
                expected: "a list".to_string(),
                found: spec.kind.expected(),
            });
        };
        match self.read_field(key) {
            Value::Array(items) => Ok((shape, items)),
            Value::Null => Ok((shape, Vec::new())),
            other => Err(mismatch(key, "a list".to_string(), &other)),
        }
    }

    /// Append an item to a list field, returning its index
    pub fn add_array_item(&mut self, key: &str, value: Value) -> BuilderResult<usize> {
        let (shape, mut items) = self.list(key)?;
        let index = items.len();
        check_item(key, index, shape, &value)?;
        items.push(value);
        self.write_field(key, Value::Array(items))?;
        Ok(index)
    }

    /// Append a blank item shaped like the field's default items
    pub fn add_blank_item(&mut self, key: &str) -> BuilderResult<usize> {
        let (shape, _) = self.list(key)?;
        self.add_array_item(key, shape.blank_item())
    }

    /// Replace the item at `index`
    pub fn update_array_item(&mut self, key: &str, index: usize, value: Value) -> BuilderResult<()> {
        let (shape, mut items) = self.list(key)?;
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or(BuilderError::IndexOutOfRange { index, len })?;
        check_item(key, index, shape, &value)?;
        *slot = value;
        self.write_field(key, Value::Array(items))
    }

    /// Set one key of an object item
    pub fn update_item_field(
        &mut self,
        key: &str,
        index: usize,
        item_key: &str,
        value: Value,
    ) -> BuilderResult<()> {
        let (_, items) = self.list(key)?;
        let len = items.len();
        let mut item = match items.into_iter().nth(index) {
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(mismatch(&format!("{}[{}]", key, index), "an object".to_string(), &other));
            }
            None => return Err(BuilderError::IndexOutOfRange { index, len }),
        };
        item.insert(item_key.to_string(), value);
        self.update_array_item(key, index, Value::Object(item))
    }

    /// Remove the item at `index`, returning it
    pub fn remove_array_item(&mut self, key: &str, index: usize) -> BuilderResult<Value> {
        let (_, mut items) = self.list(key)?;
        if index >= items.len() {
            return Err(BuilderError::IndexOutOfRange {
                index,
                len: items.len(),
            });
        }
        let removed = items.remove(index);
        self.write_field(key, Value::Array(items))?;
        Ok(removed)
    }

    // ------------------------------------------------------------------------
    // Group Fields
    // ------------------------------------------------------------------------

    /// Set a value inside an object field, creating intermediate objects
    pub fn set_nested(&mut self, key: &str, path: &[&str], value: Value) -> BuilderResult<()> {
        let spec = self.spec(key)?;
        if !matches!(spec.kind, FieldKind::Group { .. }) {
            return Err(BuilderError::FieldTypeMismatch {
                field: key.to_string(),
                expected: "an object".to_string(),
                found: spec.kind.expected(),
            });
        }
        let Some((leaf, parents)) = path.split_last() else {
            return Err(BuilderError::validation(format!(
                "Empty path for nested field '{}'",
                key
            )));
        };

        let mut root = match self.read_field(key) {
            Value::Object(map) => map,
            Value::Null => ComponentData::new(),
            other => return Err(mismatch(key, "an object".to_string(), &other)),
        };

        let mut node = &mut root;
        for (depth, segment) in parents.iter().enumerate() {
            let entry = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(ComponentData::new()));
            node = match entry {
                Value::Object(map) => map,
                other => {
                    let at = format!("{}.{}", key, parents[..=depth].join("."));
                    return Err(mismatch(&at, "an object".to_string(), other));
                }
            };
        }
        node.insert(leaf.to_string(), value);

        self.write_field(key, Value::Object(root))
    }
}

fn mismatch(field: &str, expected: String, found: &Value) -> BuilderError {
    BuilderError::FieldTypeMismatch {
        field: field.to_string(),
        expected,
        found: json_type_name(found).to_string(),
    }
}

fn check_item(key: &str, index: usize, shape: &ItemShape, value: &Value) -> BuilderResult<()> {
    if shape.accepts(value) {
        Ok(())
    } else {
        Err(mismatch(
            &format!("{}[{}]", key, index),
            shape.expected().to_string(),
            value,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
