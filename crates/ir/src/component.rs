//! Page components
//!
//! A `Component` is one block on the page: an id, a kind from the closed
//! catalog, and an open-ended data payload whose shape the kind's registry
//! descriptor defines. Components are never nested; layout kinds such as
//! `columns` keep their inner layout as plain data.

use crate::registry::ComponentKind;
use chrono::Utc;
use pagesmith_core::{ComponentId, Identifiable};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Data payload of a component
pub type ComponentData = serde_json::Map<String, Value>;

// ============================================================================
// Component
// ============================================================================

/// One block on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique id, `{type}-{timestamp}`
    pub id: ComponentId,

    /// Component type
    #[serde(rename = "type")]
    pub kind: ComponentKind,

    /// Field values; missing fields fall back to registry defaults
    #[serde(default)]
    pub data: ComponentData,
}

impl Component {
    /// Create a component from its parts
    pub fn new(id: ComponentId, kind: ComponentKind, data: ComponentData) -> Self {
        Self { id, kind, data }
    }

    /// Create a component of `kind` populated with registry defaults
    pub fn with_defaults(id: ComponentId, kind: ComponentKind) -> Self {
        Self::new(id, kind, kind.default_data())
    }

    /// Stored value of a field, if present
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Stored value of a field, or the registry default when missing
    pub fn field_or_default(&self, key: &str) -> Value {
        match self.data.get(key) {
            Some(value) => value.clone(),
            None => self
                .kind
                .default_data()
                .remove(key)
                .unwrap_or(Value::Null),
        }
    }

    /// A copy of this component with `patch` shallow-merged over it
    pub fn patched(&self, patch: &ComponentPatch) -> Component {
        let mut next = self.clone();
        if let Some(data) = &patch.data {
            next.data = data.clone();
        }
        next
    }

    /// Short human readable summary (first text-like field)
    pub fn summary(&self) -> String {
        ["title", "headline", "brand", "name", "text", "message", "companyName"]
            .iter()
            .find_map(|key| self.data.get(*key).and_then(Value::as_str))
            .map(|s| s.to_string())
            .unwrap_or_else(|| self.kind.label())
    }
}

impl Identifiable for Component {
    fn id(&self) -> &ComponentId {
        &self.id
    }
}

// ============================================================================
// ComponentPatch
// ============================================================================

/// Partial update for a component
///
/// `id` and `type` are immutable, so `data` is the only patchable part.
/// A present `data` replaces the payload wholesale; callers that change a
/// single field build the merged payload first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ComponentData>,
}

impl ComponentPatch {
    /// Patch replacing the data payload
    pub fn data(data: ComponentData) -> Self {
        Self { data: Some(data) }
    }

    /// Check if the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

// ============================================================================
// IdMinter
// ============================================================================

/// Mints `{type}-{timestamp}` ids that are unique within a session
///
/// Timestamps come from the wall clock in milliseconds but never repeat or go
/// backwards: a collision bumps the stamp by one. Observed ids stamped in the
/// future are skipped over instead of advancing the clock, so a bogus
/// persisted stamp cannot push minting past `i64::MAX`.
#[derive(Debug, Clone, Default)]
pub struct IdMinter {
    last: i64,
    ahead: HashSet<i64>,
}

impl IdMinter {
    /// Create a new minter
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh id for `kind`
    pub fn mint(&mut self, kind: ComponentKind) -> ComponentId {
        let mut stamp = Utc::now().timestamp_millis().max(self.last.saturating_add(1));
        while self.ahead.remove(&stamp) {
            stamp = stamp.saturating_add(1);
        }
        self.last = stamp;
        ComponentId::new(kind.name(), stamp)
    }

    /// Make sure future ids never reuse an existing one's stamp
    pub fn observe(&mut self, id: &ComponentId) {
        let Some(ts) = id.timestamp_ms() else {
            return;
        };
        if ts <= Utc::now().timestamp_millis() {
            self.last = self.last.max(ts);
        } else if ts > self.last {
            self.ahead.insert(ts);
        }
    }

    /// Observe every id in a component list
    pub fn observe_all<'a>(&mut self, components: impl IntoIterator<Item = &'a Component>) {
        for component in components {
            self.observe(&component.id);
        }
    }

    /// Forget all observed timestamps
    pub fn reset(&mut self) {
        self.last = 0;
        self.ahead.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
