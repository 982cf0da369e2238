//! Drag and drop coordination
//!
//! Two gestures reach the store through here: dragging a palette entry onto
//! the page inserts a new component, and dragging an existing component onto
//! another one reorders them. Indices are resolved by id when the drop
//! happens, so the outcome always reflects the latest list. Stale ids never
//! fail; they turn into [`DropOutcome::Ignored`].

use crate::store::BuilderStore;
use pagesmith_core::ComponentId;
use pagesmith_ir::ComponentKind;
use std::fmt;
use tracing::debug;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A palette entry, not yet a component
    Palette(ComponentKind),
    /// A component already on the page
    Canvas(ComponentId),
}

/// Where the drag was released
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Empty canvas area
    Canvas,
    /// An existing component
    Component(ComponentId),
}

/// Keyboard reorder direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Why a drop did not change anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    NoActiveDrag,
    SameTarget,
    DroppedOnCanvas,
    UnknownSource(ComponentId),
    UnknownTarget(ComponentId),
    AtBoundary,
    Rejected(String),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NoActiveDrag => write!(f, "no drag in progress"),
            IgnoreReason::SameTarget => write!(f, "dropped on itself"),
            IgnoreReason::DroppedOnCanvas => write!(f, "component dropped on empty canvas"),
            IgnoreReason::UnknownSource(id) => write!(f, "dragged component {} is gone", id),
            IgnoreReason::UnknownTarget(id) => write!(f, "drop target {} is gone", id),
            IgnoreReason::AtBoundary => write!(f, "already at the edge of the page"),
            IgnoreReason::Rejected(msg) => write!(f, "rejected: {}", msg),
        }
    }
}

/// Result of a drop or nudge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// A new component was inserted and selected
    Inserted { id: ComponentId, index: usize },
    /// An existing component moved
    Moved {
        id: ComponentId,
        from: usize,
        to: usize,
    },
    /// Nothing changed
    Ignored(IgnoreReason),
}

impl DropOutcome {
    /// Whether the store was changed
    pub fn is_applied(&self) -> bool {
        !matches!(self, DropOutcome::Ignored(_))
    }
}

/// Tracks the drag in progress and applies drops to a store
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    active: Option<DragSource>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging, replacing any drag already in progress
    pub fn begin(&mut self, source: DragSource) {
        debug!(?source, "drag started");
        self.active = Some(source);
    }

    /// Abandon the current drag
    pub fn cancel(&mut self) -> Option<DragSource> {
        self.active.take()
    }

    /// The drag in progress
    pub fn active(&self) -> Option<&DragSource> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Release the current drag over `target`
    pub fn drop_on(&mut self, target: DropTarget, store: &mut BuilderStore) -> DropOutcome {
        let Some(source) = self.active.take() else {
            return DropOutcome::Ignored(IgnoreReason::NoActiveDrag);
        };

        let outcome = match source {
            DragSource::Palette(kind) => insert_from_palette(kind, &target, store),
            DragSource::Canvas(id) => match target {
                DropTarget::Canvas => DropOutcome::Ignored(IgnoreReason::DroppedOnCanvas),
                DropTarget::Component(target_id) => reorder(id, &target_id, store),
            },
        };

        debug!(?outcome, "drop handled");
        outcome
    }

    /// Move a component one slot up or down
    ///
    /// Any pointer drag in progress is cancelled.
    pub fn nudge(
        &mut self,
        id: &ComponentId,
        direction: Direction,
        store: &mut BuilderStore,
    ) -> DropOutcome {
        self.active = None;

        let Some(from) = store.index_of(id) else {
            return DropOutcome::Ignored(IgnoreReason::UnknownSource(id.clone()));
        };
        let to = match direction {
            Direction::Up => from.checked_sub(1),
            Direction::Down => Some(from + 1).filter(|to| *to < store.len()),
        };
        let Some(to) = to else {
            return DropOutcome::Ignored(IgnoreReason::AtBoundary);
        };

        apply_move(id.clone(), from, to, store)
    }
}

fn insert_from_palette(
    kind: ComponentKind,
    target: &DropTarget,
    store: &mut BuilderStore,
) -> DropOutcome {
    // Unknown targets fall back to appending
    let index = match target {
        DropTarget::Canvas => None,
        DropTarget::Component(target_id) => store.index_of(target_id),
    };

    let component = store.mint_component(kind);
    let id = component.id.clone();
    let inserted = store
        .add_component(component, index)
        .and_then(|index| store.select_component(&id).map(|()| index));
    match inserted {
        Ok(index) => DropOutcome::Inserted { id, index },
        Err(e) => DropOutcome::Ignored(IgnoreReason::Rejected(e.to_string())),
    }
}

fn reorder(id: ComponentId, target_id: &ComponentId, store: &mut BuilderStore) -> DropOutcome {
    if &id == target_id {
        return DropOutcome::Ignored(IgnoreReason::SameTarget);
    }
    let Some(from) = store.index_of(&id) else {
        return DropOutcome::Ignored(IgnoreReason::UnknownSource(id));
    };
    let Some(to) = store.index_of(target_id) else {
        return DropOutcome::Ignored(IgnoreReason::UnknownTarget(target_id.clone()));
    };
    apply_move(id, from, to, store)
}

fn apply_move(id: ComponentId, from: usize, to: usize, store: &mut BuilderStore) -> DropOutcome {
    match store.move_component(from, to) {
        Ok(()) => DropOutcome::Moved { id, from, to },
        Err(e) => DropOutcome::Ignored(IgnoreReason::Rejected(e.to_string())),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuilderConfig;
    use pagesmith_ir::{Component, ProjectContent};
    use pretty_assertions::assert_eq;

    fn store() -> BuilderStore {
        let mut store = BuilderStore::create(&BuilderConfig::default());
        store
            .load_content(ProjectContent::new(vec![
                Component::with_defaults(ComponentId::from("navbar-1"), ComponentKind::Navbar),
                Component::with_defaults(ComponentId::from("hero-2"), ComponentKind::Hero),
                Component::with_defaults(ComponentId::from("footer-3"), ComponentKind::Footer),
            ]))
            .unwrap();
        store
    }

    fn ids(store: &BuilderStore) -> Vec<String> {
        store.components().iter().map(|c| c.id.to_string()).collect()
    }

    fn id(s: &str) -> ComponentId {
        ComponentId::from(s)
    }

    #[test]
    fn test_palette_drop_on_canvas_appends_and_selects() {
        let mut store = store();
        let mut drag = DragCoordinator::new();
        drag.begin(DragSource::Palette(ComponentKind::Pricing));

        let outcome = drag.drop_on(DropTarget::Canvas, &mut store);
        let DropOutcome::Inserted { id: new_id, index } = outcome else {
            panic!("expected insert, got {:?}", outcome);
        };
        assert_eq!(index, 3);
        assert_eq!(store.selected_id(), Some(&new_id));
        assert_eq!(store.selected_component().unwrap().kind, ComponentKind::Pricing);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_palette_drop_on_component_inserts_at_its_index() {
        let mut store = store();
        let mut drag = DragCoordinator::new();
        drag.begin(DragSource::Palette(ComponentKind::Spacer));

        let outcome = drag.drop_on(DropTarget::Component(id("hero-2")), &mut store);
        let DropOutcome::Inserted { id: new_id, index } = outcome else {
            panic!("expected insert, got {:?}", outcome);
        };
        assert_eq!(index, 1);
        assert_eq!(store.components()[2].id, id("hero-2"));
        assert_eq!(store.selected_id(), Some(&new_id));
        assert_eq!(store.index_of(&new_id), Some(1));
    }

    #[test]
    fn test_palette_drop_on_unknown_component_appends() {
        let mut store = store();
        let mut drag = DragCoordinator::new();
        drag.begin(DragSource::Palette(ComponentKind::Spacer));

        let outcome = drag.drop_on(DropTarget::Component(id("gone-9")), &mut store);
        assert!(matches!(outcome, DropOutcome::Inserted { index: 3, .. }));
    }

    #[test]
    fn test_canvas_reorder() {
        let mut store = store();
        let mut drag = DragCoordinator::new();
        drag.begin(DragSource::Canvas(id("navbar-1")));

        let outcome = drag.drop_on(DropTarget::Component(id("footer-3")), &mut store);
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                id: id("navbar-1"),
                from: 0,
                to: 2
            }
        );
        assert_eq!(ids(&store), vec!["hero-2", "footer-3", "navbar-1"]);
    }

    #[test]
    fn test_reorder_uses_indices_at_drop_time() {
        let mut store = store();
        let mut drag = DragCoordinator::new();
        drag.begin(DragSource::Canvas(id("footer-3")));

        // List changes mid-drag
        store.move_component(0, 2).unwrap();
        let outcome = drag.drop_on(DropTarget::Component(id("hero-2")), &mut store);
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                id: id("footer-3"),
                from: 1,
                to: 0
            }
        );
    }

    #[test]
    fn test_ignored_drops_do_not_mutate() {
        let mut store = store();
        let mut drag = DragCoordinator::new();
        let history = store.history_len();

        assert_eq!(
            drag.drop_on(DropTarget::Canvas, &mut store),
            DropOutcome::Ignored(IgnoreReason::NoActiveDrag)
        );

        drag.begin(DragSource::Canvas(id("hero-2")));
        assert_eq!(
            drag.drop_on(DropTarget::Component(id("hero-2")), &mut store),
            DropOutcome::Ignored(IgnoreReason::SameTarget)
        );

        drag.begin(DragSource::Canvas(id("gone-1")));
        assert!(matches!(
            drag.drop_on(DropTarget::Component(id("hero-2")), &mut store),
            DropOutcome::Ignored(IgnoreReason::UnknownSource(_))
        ));

        drag.begin(DragSource::Canvas(id("hero-2")));
        assert!(matches!(
            drag.drop_on(DropTarget::Component(id("gone-2")), &mut store),
            DropOutcome::Ignored(IgnoreReason::UnknownTarget(_))
        ));

        drag.begin(DragSource::Canvas(id("hero-2")));
        assert_eq!(
            drag.drop_on(DropTarget::Canvas, &mut store),
            DropOutcome::Ignored(IgnoreReason::DroppedOnCanvas)
        );

        assert_eq!(store.history_len(), history);
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_cancel() {
        let mut drag = DragCoordinator::new();
        drag.begin(DragSource::Palette(ComponentKind::Hero));
        assert_eq!(drag.active(), Some(&DragSource::Palette(ComponentKind::Hero)));
        assert_eq!(drag.cancel(), Some(DragSource::Palette(ComponentKind::Hero)));
        assert!(drag.active().is_none());
    }

    #[test]
    fn test_nudge() {
        let mut store = store();
        let mut drag = DragCoordinator::new();

        assert!(drag.nudge(&id("hero-2"), Direction::Up, &mut store).is_applied());
        assert_eq!(ids(&store), vec!["hero-2", "navbar-1", "footer-3"]);

        assert_eq!(
            drag.nudge(&id("hero-2"), Direction::Up, &mut store),
            DropOutcome::Ignored(IgnoreReason::AtBoundary)
        );
        assert_eq!(
            drag.nudge(&id("footer-3"), Direction::Down, &mut store),
            DropOutcome::Ignored(IgnoreReason::AtBoundary)
        );
        assert!(drag.nudge(&id("navbar-1"), Direction::Down, &mut store).is_applied());
        assert_eq!(ids(&store), vec!["hero-2", "footer-3", "navbar-1"]);
    }

    #[test]
    fn test_ignore_reason_display() {
        assert_eq!(
            IgnoreReason::UnknownTarget(id("hero-9")).to_string(),
            "drop target hero-9 is gone"
        );
    }
}
