//! Node storage and component construction.

use serde_json::{Map, Value};
use slotmap::new_key_type;

use crate::events::EventEmitter;
use crate::state::ObservableState;
use crate::types::{Axis, Lifecycle, Position, Size};

use super::tree::ComponentTree;

new_key_type! {
    /// Handle to a component owned by a [`ComponentTree`].
    ///
    /// Handles stay valid for the life of the tree that issued them;
    /// removal detaches a component, it never deallocates it.
    pub struct ComponentId;
}

// =============================================================================
// Behavior
// =============================================================================

/// Per-variant component behavior.
///
/// The engine performs the base behavior itself — lifecycle bookkeeping,
/// emitting events on the component, container propagation — and these
/// hooks are the override points. `on_event` reports whether it consumed
/// the event; that return value is the explicit replacement for
/// super-call chaining, and a consumed event never reaches the base
/// path.
///
/// Hooks receive the tree and the component's own id. While a hook runs,
/// the hook itself is detached from its node; a re-entrant cascade that
/// reaches the same component again (say, a state write inside
/// `on_event` re-rendering it) proceeds without the hook for the
/// duration of the call.
pub trait Behavior {
    /// Intercept an event delivered to this component. Return `true` to
    /// consume it and stop propagation.
    fn on_event(
        &mut self,
        tree: &mut ComponentTree,
        id: ComponentId,
        event: &str,
        payload: &Value,
    ) -> bool {
        let _ = (tree, id, event, payload);
        false
    }

    /// Produce the component's visual output. The engine has no output
    /// medium of its own; hosts implement this against theirs.
    fn render(&mut self, tree: &ComponentTree, id: ComponentId) {
        let _ = (tree, id);
    }

    /// Runs after the component and its subtree have mounted.
    fn on_mount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        let _ = (tree, id);
    }

    /// Runs after the component and its subtree have unmounted.
    fn on_unmount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
        let _ = (tree, id);
    }
}

/// Layout configuration carried by containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerLayout {
    pub direction: Axis,
    /// Cells between adjacent visible children along the primary axis.
    pub spacing: u16,
}

// =============================================================================
// Node
// =============================================================================

pub(crate) struct Node {
    pub(crate) id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) props: Map<String, Value>,
    pub(crate) state: ObservableState,
    pub(crate) events: EventEmitter<Value>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) mounted: bool,
    pub(crate) visible: bool,
    pub(crate) position: Position,
    pub(crate) size: Size,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: Vec<ComponentId>,
    /// `Some` iff the node is a container.
    pub(crate) layout: Option<ContainerLayout>,
    /// `Option` so hooks can be taken out while the tree is mutably
    /// borrowed during dispatch.
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

// =============================================================================
// Component builder
// =============================================================================

/// Blueprint for a component, consumed by [`ComponentTree::insert`].
///
/// The construction contract is an optional id plus an optional property
/// bag; a component's `name` is read from `props["name"]`.
#[derive(Default)]
pub struct Component {
    id: Option<String>,
    props: Map<String, Value>,
    layout: Option<ContainerLayout>,
    behavior: Option<Box<dyn Behavior>>,
    initial_state: Vec<(String, Value)>,
}

impl Component {
    /// A plain (leaf) component.
    pub fn new() -> Self {
        Self::default()
    }

    /// A container; lays children out along the vertical axis by default.
    pub fn container() -> Self {
        Self {
            layout: Some(ContainerLayout::default()),
            ..Self::default()
        }
    }

    /// A container with a vertical primary axis.
    pub fn vstack() -> Self {
        Self::container().direction(Axis::Vertical)
    }

    /// A container with a horizontal primary axis.
    pub fn hstack() -> Self {
        Self::container().direction(Axis::Horizontal)
    }

    /// Identity, globally unique within whatever tree the component gets
    /// attached to.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the whole property bag.
    pub fn with_props(mut self, props: Map<String, Value>) -> Self {
        self.props = props;
        self
    }

    /// Set one property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Seed the component's observable state; no change events fire.
    pub fn state(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.initial_state.push((key.into(), value.into()));
        self
    }

    /// Primary axis. Implies `container()`.
    pub fn direction(mut self, direction: Axis) -> Self {
        self.layout.get_or_insert_with(ContainerLayout::default).direction = direction;
        self
    }

    /// Spacing between visible children, in cells; negative inputs clamp
    /// to zero. Implies `container()`.
    pub fn spacing(mut self, spacing: i32) -> Self {
        self.layout.get_or_insert_with(ContainerLayout::default).spacing =
            spacing.clamp(0, i32::from(u16::MAX)) as u16;
        self
    }

    /// Attach custom behavior hooks.
    pub fn behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    pub(crate) fn into_node(self) -> Node {
        let name = self.props.get("name").and_then(Value::as_str).map(str::to_string);
        Node {
            id: self.id,
            name,
            props: self.props,
            state: ObservableState::with_values(self.initial_state),
            events: EventEmitter::new(),
            lifecycle: Lifecycle::Created,
            mounted: false,
            visible: true,
            position: Position::default(),
            size: Size::default(),
            parent: None,
            children: Vec::new(),
            layout: self.layout,
            behavior: self.behavior,
        }
    }
}
