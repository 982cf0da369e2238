//! Builder State Store
//!
//! The store is the system of record for one editing session. It owns the
//! ordered component list (as the snapshot at the history cursor), the
//! selection, the UI flags and the dirty/busy flags that the persistence
//! gateway drives.
//!
//! Every content mutation builds the next component list and hands it to
//! [`BuilderStore::set_components`], the only path that appends to history.
//! Structural mistakes (unknown ids, indices past the end) are reported as
//! errors before anything is touched, so they never leave a history entry.

use crate::config::BuilderConfig;
use crate::history::{History, Snapshot};
use pagesmith_core::{BuilderError, BuilderResult, ComponentId};
use pagesmith_ir::{
    Component, ComponentKind, ComponentPatch, IdMinter, Project, ProjectContent,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

// ============================================================================
// UI Flags
// ============================================================================

/// Side panels of the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Component palette
    Palette,
    /// Property editor
    Properties,
}

/// Which side panels are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelVisibility {
    pub palette: bool,
    pub properties: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            palette: true,
            properties: true,
        }
    }
}

impl PanelVisibility {
    /// Check if a panel is shown
    pub fn is_visible(&self, panel: Panel) -> bool {
        match panel {
            Panel::Palette => self.palette,
            Panel::Properties => self.properties,
        }
    }

    fn slot(&mut self, panel: Panel) -> &mut bool {
        match panel {
            Panel::Palette => &mut self.palette,
            Panel::Properties => &mut self.properties,
        }
    }
}

// ============================================================================
// Save Ticket
// ============================================================================

/// Proof that a save was started, carrying the revision it captured
///
/// Handing the ticket back to [`BuilderStore::finish_save`] clears the dirty
/// flag only if nothing was edited while the save was in flight.
#[derive(Debug)]
#[must_use = "a started save must be finished"]
pub struct SaveTicket {
    revision: u64,
}

impl SaveTicket {
    /// Revision of the content being saved
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

// ============================================================================
// BuilderStore
// ============================================================================

/// State of one editing session
#[derive(Debug)]
pub struct BuilderStore {
    history: History,
    selected: Option<ComponentId>,
    preview_mode: bool,
    panels: PanelVisibility,
    has_unsaved_changes: bool,
    is_saving: bool,
    is_exporting: bool,
    /// Bumped on every content change
    revision: u64,
    minter: IdMinter,
}

impl Default for BuilderStore {
    fn default() -> Self {
        Self::with_history_limit(crate::history::DEFAULT_HISTORY_LIMIT)
    }
}

impl BuilderStore {
    /// Create a store for a new editing session
    pub fn create(config: &BuilderConfig) -> Self {
        Self::with_history_limit(config.history_limit)
    }

    fn with_history_limit(limit: usize) -> Self {
        let mut history = History::with_limit(limit);
        history.seed(Snapshot::new());
        Self {
            history,
            selected: None,
            preview_mode: false,
            panels: PanelVisibility::default(),
            has_unsaved_changes: false,
            is_saving: false,
            is_exporting: false,
            revision: 0,
            minter: IdMinter::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------------

    /// Current component list in render order
    pub fn components(&self) -> &[Arc<Component>] {
        self.history.current().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.components().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components().is_empty()
    }

    /// Position of a component in the list
    pub fn index_of(&self, id: &ComponentId) -> Option<usize> {
        self.components().iter().position(|c| &c.id == id)
    }

    /// Look up a component by id
    pub fn component(&self, id: &ComponentId) -> Option<&Component> {
        self.components()
            .iter()
            .find(|c| &c.id == id)
            .map(|c| &**c)
    }

    fn require_index(&self, id: &ComponentId) -> BuilderResult<usize> {
        self.index_of(id).ok_or_else(|| BuilderError::not_found(id))
    }

    fn check_index(&self, index: usize) -> BuilderResult<()> {
        let len = self.len();
        if index < len {
            Ok(())
        } else {
            Err(BuilderError::IndexOutOfRange { index, len })
        }
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Replace the component list, recording a history entry
    ///
    /// This is the only path that appends to history. Any redo branch is
    /// discarded and the session becomes dirty.
    pub fn set_components(&mut self, next: Snapshot) {
        self.minter.observe_all(next.iter().map(|c| &**c));
        self.history.push(next);
        self.touch();
        self.prune_selection();
        debug!(
            components = self.len(),
            history = self.history.len(),
            "components updated"
        );
    }

    /// Insert a component at `index`, or append when `index` is `None`
    ///
    /// Returns the index the component landed at.
    pub fn add_component(
        &mut self,
        component: Component,
        index: Option<usize>,
    ) -> BuilderResult<usize> {
        let len = self.len();
        let index = index.unwrap_or(len);
        if index > len {
            return Err(BuilderError::IndexOutOfRange { index, len });
        }
        if self.index_of(&component.id).is_some() {
            return Err(BuilderError::validation(format!(
                "Component id already in use: {}",
                component.id
            )));
        }

        debug!(id = %component.id, index, "adding component");
        let mut next = self.components().to_vec();
        next.insert(index, Arc::new(component));
        self.set_components(next);
        Ok(index)
    }

    /// Apply a patch to one component
    pub fn update_component(&mut self, id: &ComponentId, patch: ComponentPatch) -> BuilderResult<()> {
        let index = self.require_index(id)?;
        if patch.is_empty() {
            return Ok(());
        }

        debug!(%id, "updating component");
        let mut next = self.components().to_vec();
        next[index] = Arc::new(next[index].patched(&patch));
        self.set_components(next);
        Ok(())
    }

    /// Remove a component, clearing the selection if it pointed at it
    pub fn delete_component(&mut self, id: &ComponentId) -> BuilderResult<Arc<Component>> {
        let index = self.require_index(id)?;

        debug!(%id, "deleting component");
        let mut next = self.components().to_vec();
        let removed = next.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.set_components(next);
        Ok(removed)
    }

    /// Move the component at `from` so that it ends up at `to`
    pub fn move_component(&mut self, from: usize, to: usize) -> BuilderResult<()> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        debug!(from, to, "moving component");
        let mut next = self.components().to_vec();
        let item = next.remove(from);
        next.insert(to, item);
        self.set_components(next);
        Ok(())
    }

    /// Copy a component's data under a fresh id, right after the original
    pub fn duplicate_component(&mut self, id: &ComponentId) -> BuilderResult<ComponentId> {
        let index = self.require_index(id)?;
        let source = Arc::clone(&self.components()[index]);
        let new_id = self.minter.mint(source.kind);

        debug!(%id, copy = %new_id, "duplicating component");
        let copy = Component::new(new_id.clone(), source.kind, source.data.clone());
        let mut next = self.components().to_vec();
        next.insert(index + 1, Arc::new(copy));
        self.set_components(next);
        Ok(new_id)
    }

    /// Create a component of `kind` with registry defaults and a fresh id
    ///
    /// The component is not inserted.
    pub fn mint_component(&mut self, kind: ComponentKind) -> Component {
        Component::with_defaults(self.minter.mint(kind), kind)
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Select a component
    pub fn select_component(&mut self, id: &ComponentId) -> BuilderResult<()> {
        self.require_index(id)?;
        self.selected = Some(id.clone());
        Ok(())
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Id of the selected component
    pub fn selected_id(&self) -> Option<&ComponentId> {
        self.selected.as_ref()
    }

    /// The selected component as it is in the current list
    pub fn selected_component(&self) -> Option<&Component> {
        self.selected.as_ref().and_then(|id| self.component(id))
    }

    fn prune_selection(&mut self) {
        if let Some(id) = &self.selected {
            if self.index_of(id).is_none() {
                debug!(%id, "selected component no longer present");
                self.selected = None;
            }
        }
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Step back one edit. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.after_history_move("undo");
        true
    }

    /// Step forward one edit. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if self.history.redo().is_none() {
            return false;
        }
        self.after_history_move("redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of history snapshots
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the snapshot currently shown
    pub fn history_cursor(&self) -> usize {
        self.history.cursor().unwrap_or(0)
    }

    fn after_history_move(&mut self, action: &str) {
        self.touch();
        self.prune_selection();
        debug!(
            action,
            cursor = self.history_cursor(),
            components = self.len(),
            "history moved"
        );
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Hydrate the session from a stored project
    ///
    /// Seeds history with exactly one snapshot and leaves the session clean.
    /// Malformed content is an error and leaves the store untouched.
    pub fn initialize_from_project(&mut self, project: &Project) -> BuilderResult<()> {
        let content = project.decoded_content()?;
        self.load_content(content)?;
        debug!(project = %project.id, name = %project.name, "store initialized from project");
        Ok(())
    }

    /// Hydrate the session from decoded content
    pub fn load_content(&mut self, content: ProjectContent) -> BuilderResult<()> {
        check_unique_ids(&content)?;

        self.minter.reset();
        self.minter.observe_all(&content.components);
        self.history
            .seed(content.components.into_iter().map(Arc::new).collect());
        self.selected = None;
        self.has_unsaved_changes = false;
        self.revision += 1;
        Ok(())
    }

    /// Clear everything back to a blank session
    pub fn reset(&mut self) {
        let revision = self.revision + 1;
        *self = Self::with_history_limit(self.history.limit());
        self.revision = revision;
        debug!("store reset");
    }

    /// End the session
    pub fn dispose(self) {
        debug!(components = self.len(), dirty = self.has_unsaved_changes, "store disposed");
    }

    /// Content to persist
    pub fn serialize(&self) -> ProjectContent {
        ProjectContent::new(self.components().iter().map(|c| Component::clone(c)).collect())
    }

    // ------------------------------------------------------------------------
    // Save / Export State
    // ------------------------------------------------------------------------

    fn touch(&mut self) {
        self.has_unsaved_changes = true;
        self.revision += 1;
    }

    /// Whether there are edits not yet persisted
    pub fn has_unsaved_changes(&self) -> bool {
        self.has_unsaved_changes
    }

    /// Content revision, bumped on every change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn is_exporting(&self) -> bool {
        self.is_exporting
    }

    /// Mark a save as started
    pub fn begin_save(&mut self) -> BuilderResult<SaveTicket> {
        if self.is_saving {
            return Err(BuilderError::SaveInProgress);
        }
        self.is_saving = true;
        Ok(SaveTicket {
            revision: self.revision,
        })
    }

    /// Mark a save as finished
    ///
    /// Returns `true` if the session is clean afterwards.
    pub fn finish_save(&mut self, ticket: SaveTicket, succeeded: bool) -> bool {
        self.is_saving = false;
        if succeeded && ticket.revision == self.revision {
            self.has_unsaved_changes = false;
        } else if succeeded {
            debug!(
                saved = ticket.revision,
                current = self.revision,
                "edits made during save, staying dirty"
            );
        }
        !self.has_unsaved_changes
    }

    /// Mark the current content as persisted
    pub fn mark_saved(&mut self) {
        self.has_unsaved_changes = false;
    }

    /// Mark an export as started
    pub fn begin_export(&mut self) -> BuilderResult<()> {
        if self.is_exporting {
            return Err(BuilderError::ExportInProgress);
        }
        self.is_exporting = true;
        Ok(())
    }

    /// Mark an export as finished
    pub fn finish_export(&mut self) {
        self.is_exporting = false;
    }

    // ------------------------------------------------------------------------
    // Preview / Panels
    // ------------------------------------------------------------------------

    pub fn preview_mode(&self) -> bool {
        self.preview_mode
    }

    /// Toggle preview mode, returning the new value
    pub fn toggle_preview(&mut self) -> bool {
        self.preview_mode = !self.preview_mode;
        self.preview_mode
    }

    pub fn set_preview(&mut self, enabled: bool) {
        self.preview_mode = enabled;
    }

    pub fn panels(&self) -> PanelVisibility {
        self.panels
    }

    /// Toggle a side panel, returning whether it is now shown
    pub fn toggle_panel(&mut self, panel: Panel) -> bool {
        let slot = self.panels.slot(panel);
        *slot = !*slot;
        *slot
    }

    pub fn set_panel(&mut self, panel: Panel, visible: bool) {
        *self.panels.slot(panel) = visible;
    }
}

fn check_unique_ids(content: &ProjectContent) -> BuilderResult<()> {
    let mut seen = HashSet::new();
    for component in &content.components {
        if !seen.insert(&component.id) {
            return Err(BuilderError::hydration(format!(
                "duplicate component id '{}'",
                component.id
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
