//! The component tree: structure, identity invariants, lifecycle, and
//! event delivery.
//!
//! Components live in a slotmap arena. Parents hold their children as an
//! ordered list of keys; each child keeps a single non-owning back-link,
//! so the ownership graph is acyclic by construction while root-walks
//! and whole-tree id searches stay cheap.
//!
//! Everything runs synchronously on the calling stack: an event, the
//! state write it causes, and the update/render/layout cascade that
//! follows all finish before the original call returns. A state write
//! from inside an update can recurse into another update before the
//! first completes; recursion bounded by the tree is tolerated, cycles
//! are the caller's to avoid.

use std::collections::HashMap;

use serde_json::{Map, Value};
use slotmap::SlotMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::events::{EventEmitter, HandlerId, names};
use crate::state::StateChange;
use crate::types::{Lifecycle, Position, Size};

use super::node::{Behavior, Component, ComponentId, Node};

/// Owner of a forest of components.
///
/// Freshly inserted components are detached roots; [`add_child`]
/// assembles them into hierarchies. Every operation is keyed by the
/// [`ComponentId`] returned from [`insert`], and ids stay valid for the
/// life of the tree — removal detaches, it never deallocates.
///
/// [`add_child`]: Self::add_child
/// [`insert`]: Self::insert
#[derive(Default)]
pub struct ComponentTree {
    pub(crate) nodes: SlotMap<ComponentId, Node>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached component, returning its handle.
    pub fn insert(&mut self, component: Component) -> ComponentId {
        self.nodes.insert(component.into_node())
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Attach `child` (and its subtree) under `parent`.
    ///
    /// Rejected, leaving the tree exactly as it was: attaching a node
    /// that already has a different parent, attaching a node above
    /// itself, a non-empty `name` colliding with a sibling, or any id in
    /// the attached subtree colliding with an id anywhere in `parent`'s
    /// tree. Re-adding a current child is a silent no-op. On success the
    /// child is appended to the ordered child list and, if `parent` is
    /// mounted, mounted immediately.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<()> {
        if self.nodes[child].parent == Some(parent) {
            return Ok(());
        }
        if self.nodes[child].parent.is_some() {
            return Err(Error::AlreadyAttached);
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(Error::IntoOwnSubtree);
        }
        if let Some(name) = self.nodes[child].name.as_deref()
            && !name.is_empty()
        {
            let taken = self.nodes[parent]
                .children
                .iter()
                .any(|&sibling| self.nodes[sibling].name.as_deref() == Some(name));
            if taken {
                return Err(Error::DuplicateName(name.to_string()));
            }
        }
        // Every id in the incoming subtree must be new to the whole tree
        // the parent belongs to.
        let root = self.root(parent);
        let mut pending = vec![child];
        while let Some(node) = pending.pop() {
            if let Some(id) = self.nodes[node].id.as_deref()
                && self.find_by_id(root, id).is_some()
            {
                return Err(Error::DuplicateId(id.to_string()));
            }
            pending.extend(self.nodes[node].children.iter().copied());
        }

        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        debug!(child = ?self.nodes[child].id, parent = ?self.nodes[parent].id, "child attached");
        if self.nodes[parent].mounted {
            self.mount(child);
        }
        Ok(())
    }

    /// Detach `child` from `parent`; returns `false` when `child` is not
    /// one of `parent`'s children. A mounted parent unmounts the subtree
    /// first. The detached subtree stays owned by the tree and its ids
    /// immediately return to availability.
    pub fn remove_child(&mut self, parent: ComponentId, child: ComponentId) -> bool {
        let Some(position) = self.nodes[parent].children.iter().position(|&c| c == child) else {
            return false;
        };
        if self.nodes[parent].mounted {
            self.unmount(child);
        }
        self.nodes[parent].children.remove(position);
        self.nodes[child].parent = None;
        debug!(child = ?self.nodes[child].id, parent = ?self.nodes[parent].id, "child detached");
        true
    }

    /// First component whose id equals `id`, searching `from` and then
    /// its subtree depth-first.
    pub fn find_by_id(&self, from: ComponentId, id: &str) -> Option<ComponentId> {
        if self.nodes[from].id.as_deref() == Some(id) {
            return Some(from);
        }
        for &child in &self.nodes[from].children {
            if let Some(found) = self.find_by_id(child, id) {
                return Some(found);
            }
        }
        None
    }

    /// Topmost ancestor of `id`; `id` itself when detached.
    pub fn root(&self, mut id: ComponentId) -> ComponentId {
        while let Some(parent) = self.nodes[id].parent {
            id = parent;
        }
        id
    }

    /// Whether `candidate` sits somewhere on `node`'s parent chain.
    fn is_ancestor(&self, candidate: ComponentId, mut node: ComponentId) -> bool {
        while let Some(parent) = self.nodes[node].parent {
            if parent == candidate {
                return true;
            }
            node = parent;
        }
        false
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// The component's user-assigned id, if any.
    pub fn component_id(&self, id: ComponentId) -> Option<&str> {
        self.nodes[id].id.as_deref()
    }

    /// The component's sibling-unique name (from `props["name"]`), if any.
    pub fn name(&self, id: ComponentId) -> Option<&str> {
        self.nodes[id].name.as_deref()
    }

    pub fn props(&self, id: ComponentId) -> &Map<String, Value> {
        &self.nodes[id].props
    }

    pub fn parent(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes[id].parent
    }

    /// Direct children, in insertion order.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        &self.nodes[id].children
    }

    pub fn lifecycle(&self, id: ComponentId) -> Lifecycle {
        self.nodes[id].lifecycle
    }

    pub fn is_mounted(&self, id: ComponentId) -> bool {
        self.nodes[id].mounted
    }

    pub fn is_visible(&self, id: ComponentId) -> bool {
        self.nodes[id].visible
    }

    pub fn is_container(&self, id: ComponentId) -> bool {
        self.nodes[id].layout.is_some()
    }

    pub fn position(&self, id: ComponentId) -> Position {
        self.nodes[id].position
    }

    pub fn size(&self, id: ComponentId) -> Size {
        self.nodes[id].size
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mount the component and its current subtree, pre-order.
    ///
    /// Idempotent: mounting a mounted component is a no-op, and a
    /// component that has unmounted stays unmounted for good.
    pub fn mount(&mut self, id: ComponentId) {
        if self.nodes[id].mounted || self.nodes[id].lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.nodes[id].mounted = true;
        self.nodes[id].lifecycle = Lifecycle::Mounted;
        debug!(component = ?self.nodes[id].id, "mounted");
        self.nodes[id].events.emit(names::MOUNT, &Value::Null);
        let children = self.nodes[id].children.clone();
        for child in children {
            self.mount(child);
        }
        self.with_behavior(id, |tree, behavior| behavior.on_mount(tree, id));
    }

    /// Unmount the subtree, children first (post-order). Idempotent.
    pub fn unmount(&mut self, id: ComponentId) {
        if !self.nodes[id].mounted {
            return;
        }
        let children = self.nodes[id].children.clone();
        for child in children {
            self.unmount(child);
        }
        self.nodes[id].mounted = false;
        self.nodes[id].lifecycle = Lifecycle::Unmounted;
        debug!(component = ?self.nodes[id].id, "unmounted");
        self.nodes[id].events.emit(names::UNMOUNT, &Value::Null);
        self.with_behavior(id, |tree, behavior| behavior.on_unmount(tree, id));
    }

    /// Run an update cycle: mark `Updated`, notify, re-render. Containers
    /// recalculate layout afterwards, so layout is consistent immediately
    /// after any mounted update. No-op unless mounted.
    pub fn update(&mut self, id: ComponentId) {
        if !self.nodes[id].mounted {
            return;
        }
        self.nodes[id].lifecycle = Lifecycle::Updated;
        self.nodes[id].events.emit(names::UPDATE, &Value::Null);
        self.render(id);
        if self.nodes[id].layout.is_some() {
            self.calculate_layout(id);
        }
    }

    /// Render the component: notify observers, run the behavior's render
    /// hook, then (containers only) render visible children in insertion
    /// order. Hidden subtrees are skipped wholesale.
    pub fn render(&mut self, id: ComponentId) {
        self.nodes[id].events.emit(names::RENDER, &Value::Null);
        self.with_behavior(id, |tree, behavior| behavior.render(tree, id));
        if self.nodes[id].layout.is_some() {
            let children = self.nodes[id].children.clone();
            for child in children {
                if self.nodes[child].visible {
                    self.render(child);
                }
            }
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe to events emitted by this component.
    pub fn on(&self, id: ComponentId, event: &str, handler: impl FnMut(&Value) + 'static) -> HandlerId {
        self.nodes[id].events.on(event, handler)
    }

    /// Subscribe for a single delivery.
    pub fn once(&self, id: ComponentId, event: &str, handler: impl FnMut(&Value) + 'static) -> HandlerId {
        self.nodes[id].events.once(event, handler)
    }

    pub fn off(&self, id: ComponentId, event: &str, handler: HandlerId) {
        self.nodes[id].events.off(event, handler)
    }

    pub fn off_all(&self, id: ComponentId, event: &str) {
        self.nodes[id].events.off_all(event)
    }

    /// Emit an event on this component alone, without propagation.
    pub fn emit(&self, id: ComponentId, event: &str, payload: &Value) {
        self.nodes[id].events.emit(event, payload)
    }

    /// Deliver an externally sourced event.
    ///
    /// The component's behavior gets first refusal; a consumed event
    /// goes no further. Otherwise the base behavior runs — the event is
    /// emitted on the component for observers — and containers then
    /// propagate to visible children in reverse insertion order
    /// (last-added first, modeling z-order), stopping at the first
    /// consumer. Returns whether anyone consumed the event.
    pub fn handle_event(&mut self, id: ComponentId, event: &str, payload: &Value) -> bool {
        let consumed = self
            .with_behavior(id, |tree, behavior| behavior.on_event(tree, id, event, payload))
            .unwrap_or(false);
        if consumed {
            return true;
        }
        self.nodes[id].events.emit(event, payload);
        if self.nodes[id].layout.is_some() {
            let children = self.nodes[id].children.clone();
            for child in children.into_iter().rev() {
                if self.nodes[child].visible && self.handle_event(child, event, payload) {
                    return true;
                }
            }
        }
        false
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Set one state key. An actual change on a mounted component
    /// triggers an update cycle; equal values do nothing.
    pub fn set_state(&mut self, id: ComponentId, key: &str, value: impl Into<Value>) {
        if self.nodes[id].state.set(key, value) && self.nodes[id].mounted {
            self.update(id);
        }
    }

    /// Apply several state entries at once: one batch notification, at
    /// most one update cycle.
    pub fn merge_state(
        &mut self,
        id: ComponentId,
        entries: impl IntoIterator<Item = (String, Value)>,
    ) {
        if self.nodes[id].state.update(entries) && self.nodes[id].mounted {
            self.update(id);
        }
    }

    pub fn state_get(&self, id: ComponentId, key: &str) -> Option<Value> {
        self.nodes[id].state.get(key)
    }

    pub fn state_all(&self, id: ComponentId) -> HashMap<String, Value> {
        self.nodes[id].state.get_all()
    }

    pub fn state_previous(&self, id: ComponentId, key: &str) -> Option<Value> {
        self.nodes[id].state.get_previous(key)
    }

    /// Observe this component's state changes.
    pub fn observe_state(
        &self,
        id: ComponentId,
        handler: impl FnMut(&StateChange) + 'static,
    ) -> HandlerId {
        self.nodes[id].state.on_change(handler)
    }

    pub fn unobserve_state(&self, id: ComponentId, handler: HandlerId) {
        self.nodes[id].state.off_change(handler)
    }

    /// Emitter for this component's state-change notifications.
    pub fn state_events(&self, id: ComponentId) -> &EventEmitter<StateChange> {
        self.nodes[id].state.emitter()
    }

    // =========================================================================
    // Geometry & visibility
    // =========================================================================

    /// Move the component. A real move on a mounted component triggers an
    /// update cycle.
    pub fn set_position(&mut self, id: ComponentId, row: u16, col: u16) {
        let position = Position::new(row, col);
        if self.nodes[id].position == position {
            return;
        }
        self.nodes[id].position = position;
        if self.nodes[id].mounted {
            self.update(id);
        }
    }

    /// Resize the component; same trigger rule as
    /// [`set_position`](Self::set_position).
    pub fn set_size(&mut self, id: ComponentId, height: u16, width: u16) {
        let size = Size::new(height, width);
        if self.nodes[id].size == size {
            return;
        }
        self.nodes[id].size = size;
        if self.nodes[id].mounted {
            self.update(id);
        }
    }

    /// Show or hide the component. Only an actual flip triggers an
    /// update; a hidden component stays in the child list but is skipped
    /// by layout, rendering, and propagation.
    pub fn set_visible(&mut self, id: ComponentId, visible: bool) {
        if self.nodes[id].visible == visible {
            return;
        }
        self.nodes[id].visible = visible;
        if self.nodes[id].mounted {
            self.update(id);
        }
    }

    // =========================================================================
    // Behavior dispatch
    // =========================================================================

    /// Take the node's behavior out, run `f`, put it back. Returns `None`
    /// when the node has no behavior (or it is already out on the stack).
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut Self, &mut dyn Behavior) -> R,
    ) -> Option<R> {
        let mut behavior = self.nodes[id].behavior.take()?;
        let result = f(&mut *self, behavior.as_mut());
        self.nodes[id].behavior = Some(behavior);
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::{Value, json};

    use super::*;
    use crate::types::{Axis, Lifecycle};

    fn log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn watch(tree: &ComponentTree, id: ComponentId, event: &'static str, seen: &Rc<RefCell<Vec<String>>>) {
        let sink = seen.clone();
        tree.on(id, event, move |_| sink.borrow_mut().push(event.to_string()));
    }

    #[test]
    fn test_fresh_component_defaults() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());

        assert_eq!(tree.component_id(id), None);
        assert!(tree.props(id).is_empty());
        assert_eq!(tree.lifecycle(id), Lifecycle::Created);
        assert_eq!(tree.parent(id), None);
        assert!(tree.children(id).is_empty());
        assert!(!tree.is_mounted(id));
        assert!(tree.is_visible(id));
        assert_eq!(tree.position(id), Position::new(0, 0));
        assert_eq!(tree.size(id), Size::new(0, 0));
        assert!(!tree.is_container(id));
    }

    #[test]
    fn test_builder_carries_identity_and_props() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(
            Component::new()
                .with_id("test")
                .prop("key", "value")
                .prop("name", "first"),
        );

        assert_eq!(tree.component_id(id), Some("test"));
        assert_eq!(tree.name(id), Some("first"));
        assert_eq!(tree.props(id)["key"], json!("value"));
    }

    #[test]
    fn test_lifecycle_transitions_and_events() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = log();
        watch(&tree, id, names::MOUNT, &seen);
        watch(&tree, id, names::UPDATE, &seen);
        watch(&tree, id, names::UNMOUNT, &seen);

        tree.mount(id);
        assert!(tree.is_mounted(id));
        assert_eq!(tree.lifecycle(id), Lifecycle::Mounted);

        tree.update(id);
        assert_eq!(tree.lifecycle(id), Lifecycle::Updated);

        tree.unmount(id);
        assert!(!tree.is_mounted(id));
        assert_eq!(tree.lifecycle(id), Lifecycle::Unmounted);

        assert_eq!(*seen.borrow(), vec!["mount", "update", "unmount"]);
    }

    #[test]
    fn test_mount_and_unmount_are_idempotent() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = log();
        watch(&tree, id, names::MOUNT, &seen);
        watch(&tree, id, names::UNMOUNT, &seen);

        tree.mount(id);
        tree.mount(id);
        assert_eq!(*seen.borrow(), vec!["mount"]);

        tree.unmount(id);
        tree.unmount(id);
        assert_eq!(*seen.borrow(), vec!["mount", "unmount"]);
    }

    #[test]
    fn test_no_remount_after_unmount() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());

        tree.mount(id);
        tree.unmount(id);
        tree.mount(id);

        assert!(!tree.is_mounted(id));
        assert_eq!(tree.lifecycle(id), Lifecycle::Unmounted);
    }

    #[test]
    fn test_update_is_a_no_op_while_unmounted() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());

        tree.update(id);
        assert_eq!(tree.lifecycle(id), Lifecycle::Created);
    }

    #[test]
    fn test_state_change_triggers_update_when_mounted() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = log();
        watch(&tree, id, names::UPDATE, &seen);

        tree.set_state(id, "key", "value");
        assert!(seen.borrow().is_empty());

        tree.mount(id);
        tree.set_state(id, "key", "changed");
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(tree.state_get(id, "key"), Some(json!("changed")));

        // Equal write: no second update.
        tree.set_state(id, "key", "changed");
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_merge_state_runs_one_update_cycle() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = log();
        watch(&tree, id, names::UPDATE, &seen);

        tree.mount(id);
        tree.merge_state(
            id,
            [
                ("a".to_string(), json!(1)),
                ("b".to_string(), json!(2)),
            ],
        );
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(tree.state_all(id).len(), 2);
    }

    #[test]
    fn test_geometry_setters_trigger_update_only_on_change() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = log();
        watch(&tree, id, names::UPDATE, &seen);

        tree.mount(id);

        tree.set_position(id, 10, 20);
        assert_eq!(tree.position(id), Position::new(10, 20));
        assert_eq!(seen.borrow().len(), 1);

        tree.set_position(id, 10, 20);
        assert_eq!(seen.borrow().len(), 1);

        tree.set_size(id, 30, 40);
        assert_eq!(tree.size(id), Size::new(30, 40));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_visibility_flip_triggers_update() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = log();
        watch(&tree, id, names::UPDATE, &seen);

        tree.mount(id);
        assert!(tree.is_visible(id));

        tree.set_visible(id, false);
        assert!(!tree.is_visible(id));
        assert_eq!(seen.borrow().len(), 1);

        tree.set_visible(id, true);
        assert_eq!(seen.borrow().len(), 2);

        tree.set_visible(id, true);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_add_and_remove_children() {
        let mut tree = ComponentTree::new();
        let parent = tree.insert(Component::new().with_id("parent"));
        let child1 = tree.insert(Component::new().with_id("child1"));
        let child2 = tree.insert(Component::new().with_id("child2"));

        tree.add_child(parent, child1).unwrap();
        tree.add_child(parent, child2).unwrap();

        assert_eq!(tree.parent(child1), Some(parent));
        assert_eq!(tree.children(parent), &[child1, child2]);

        assert!(tree.remove_child(parent, child1));
        assert_eq!(tree.parent(child1), None);
        assert_eq!(tree.children(parent), &[child2]);

        // Not a child: no-op.
        assert!(!tree.remove_child(parent, child1));
    }

    #[test]
    fn test_readding_a_current_child_is_a_no_op() {
        let mut tree = ComponentTree::new();
        let parent = tree.insert(Component::new());
        let child = tree.insert(Component::new());

        tree.add_child(parent, child).unwrap();
        tree.add_child(parent, child).unwrap();
        assert_eq!(tree.children(parent).len(), 1);
    }

    #[test]
    fn test_attaching_elsewhere_requires_detaching_first() {
        let mut tree = ComponentTree::new();
        let first = tree.insert(Component::new());
        let second = tree.insert(Component::new());
        let child = tree.insert(Component::new());

        tree.add_child(first, child).unwrap();
        let err = tree.add_child(second, child).unwrap_err();
        assert!(matches!(err, Error::AlreadyAttached));

        tree.remove_child(first, child);
        tree.add_child(second, child).unwrap();
        assert_eq!(tree.parent(child), Some(second));
    }

    #[test]
    fn test_attaching_above_itself_is_rejected() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::new());
        let branch = tree.insert(Component::new());
        tree.add_child(root, branch).unwrap();

        assert!(matches!(tree.add_child(branch, root), Err(Error::IntoOwnSubtree)));
        assert!(matches!(tree.add_child(root, root), Err(Error::IntoOwnSubtree)));
        assert_eq!(tree.children(branch).len(), 0);
    }

    #[test]
    fn test_mount_cascades_through_the_hierarchy() {
        let mut tree = ComponentTree::new();
        let parent = tree.insert(Component::new());
        let child1 = tree.insert(Component::new());
        let child2 = tree.insert(Component::new());
        tree.add_child(parent, child1).unwrap();
        tree.add_child(parent, child2).unwrap();

        tree.mount(parent);
        assert!(tree.is_mounted(parent));
        assert!(tree.is_mounted(child1));
        assert!(tree.is_mounted(child2));

        // A child added to a mounted parent mounts immediately.
        let child3 = tree.insert(Component::new());
        tree.add_child(parent, child3).unwrap();
        assert!(tree.is_mounted(child3));

        tree.unmount(parent);
        assert!(!tree.is_mounted(parent));
        assert!(!tree.is_mounted(child1));
        assert!(!tree.is_mounted(child2));
        assert!(!tree.is_mounted(child3));
    }

    #[test]
    fn test_unmount_runs_children_first() {
        let mut tree = ComponentTree::new();
        let parent = tree.insert(Component::new());
        let child = tree.insert(Component::new());
        tree.add_child(parent, child).unwrap();
        tree.mount(parent);

        let seen = log();
        let sink = seen.clone();
        tree.on(parent, names::UNMOUNT, move |_| sink.borrow_mut().push("parent".into()));
        let sink = seen.clone();
        tree.on(child, names::UNMOUNT, move |_| sink.borrow_mut().push("child".into()));

        tree.unmount(parent);
        assert_eq!(*seen.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_removing_a_child_from_a_mounted_parent_unmounts_it() {
        let mut tree = ComponentTree::new();
        let parent = tree.insert(Component::new());
        let child = tree.insert(Component::new());
        tree.add_child(parent, child).unwrap();
        tree.mount(parent);

        tree.remove_child(parent, child);
        assert!(!tree.is_mounted(child));
        assert_eq!(tree.lifecycle(child), Lifecycle::Unmounted);
    }

    #[test]
    fn test_sibling_names_must_be_unique() {
        let mut tree = ComponentTree::new();
        let parent = tree.insert(Component::new());
        let child1 = tree.insert(Component::new().prop("name", "test"));
        let child2 = tree.insert(Component::new().prop("name", "test"));
        let child3 = tree.insert(Component::new().prop("name", "other"));

        tree.add_child(parent, child1).unwrap();
        let err = tree.add_child(parent, child2).unwrap_err();
        assert!(matches!(err, Error::DuplicateName(name) if name == "test"));

        // The rejected child was not attached.
        tree.add_child(parent, child3).unwrap();
        assert_eq!(tree.children(parent), &[child1, child3]);
    }

    #[test]
    fn test_ids_must_be_unique_across_the_tree() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::new());
        let child1 = tree.insert(Component::new().with_id("test"));
        tree.add_child(root, child1).unwrap();

        let child2 = tree.insert(Component::new().with_id("test"));
        assert!(matches!(tree.add_child(root, child2), Err(Error::DuplicateId(_))));

        // Same id into a different branch of the same tree: still rejected.
        let branch = tree.insert(Component::new());
        tree.add_child(root, branch).unwrap();
        let child3 = tree.insert(Component::new().with_id("test"));
        assert!(matches!(tree.add_child(branch, child3), Err(Error::DuplicateId(_))));

        let child4 = tree.insert(Component::new().with_id("other"));
        tree.add_child(branch, child4).unwrap();
    }

    #[test]
    fn test_subtree_attachment_checks_descendant_ids() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::new());
        let branch = tree.insert(Component::new());
        tree.add_child(root, branch).unwrap();
        let existing = tree.insert(Component::new().with_id("unique"));
        tree.add_child(root, existing).unwrap();

        // A detached subtree whose descendant reuses "unique".
        let subtree_root = tree.insert(Component::new());
        let subtree_child = tree.insert(Component::new().with_id("unique"));
        tree.add_child(subtree_root, subtree_child).unwrap();

        let err = tree.add_child(branch, subtree_root).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(id) if id == "unique"));
        assert!(tree.children(branch).is_empty());
        assert_eq!(tree.parent(subtree_root), None);
    }

    #[test]
    fn test_removed_ids_return_to_availability() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::new());
        let first = tree.insert(Component::new().with_id("test"));
        tree.add_child(root, first).unwrap();
        tree.remove_child(root, first);

        let second = tree.insert(Component::new().with_id("test"));
        tree.add_child(root, second).unwrap();
        assert_eq!(tree.find_by_id(root, "test"), Some(second));
    }

    #[test]
    fn test_find_by_id_searches_depth_first() {
        let mut tree = ComponentTree::new();
        let root = tree.insert(Component::new().with_id("root"));
        let branch = tree.insert(Component::new());
        let leaf = tree.insert(Component::new().with_id("leaf"));
        tree.add_child(root, branch).unwrap();
        tree.add_child(branch, leaf).unwrap();

        assert_eq!(tree.find_by_id(root, "root"), Some(root));
        assert_eq!(tree.find_by_id(root, "leaf"), Some(leaf));
        assert_eq!(tree.find_by_id(root, "missing"), None);
        assert_eq!(tree.root(leaf), root);
    }

    #[test]
    fn test_handle_event_emits_on_self_and_reports_unhandled() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = log();
        let sink = seen.clone();
        tree.on(id, "custom_event", move |payload| {
            sink.borrow_mut().push(payload["value"].to_string());
        });

        let handled = tree.handle_event(id, "custom_event", &json!({ "value": "test" }));
        assert!(!handled);
        assert_eq!(*seen.borrow(), vec!["\"test\""]);
    }

    #[test]
    fn test_behavior_consumes_events_and_skips_the_base_emit() {
        struct Clicker;
        impl Behavior for Clicker {
            fn on_event(
                &mut self,
                tree: &mut ComponentTree,
                id: ComponentId,
                event: &str,
                _payload: &Value,
            ) -> bool {
                if event == "click" {
                    tree.set_state(id, "clicks", 1);
                    return true;
                }
                false
            }
        }

        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new().behavior(Clicker));
        let seen = log();
        watch(&tree, id, "click", &seen);

        assert!(tree.handle_event(id, "click", &Value::Null));
        assert_eq!(tree.state_get(id, "clicks"), Some(json!(1)));
        // Consumed: observers of the raw event never saw it.
        assert!(seen.borrow().is_empty());

        assert!(!tree.handle_event(id, "other", &Value::Null));
    }

    #[test]
    fn test_behavior_mount_hooks_run() {
        struct Hooked;
        impl Behavior for Hooked {
            fn on_mount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
                tree.set_state(id, "mounted_hook", true);
            }
            fn on_unmount(&mut self, tree: &mut ComponentTree, id: ComponentId) {
                tree.set_state(id, "unmounted_hook", true);
            }
        }

        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new().behavior(Hooked));

        tree.mount(id);
        assert_eq!(tree.state_get(id, "mounted_hook"), Some(json!(true)));

        tree.unmount(id);
        assert_eq!(tree.state_get(id, "unmounted_hook"), Some(json!(true)));
    }

    #[test]
    fn test_state_observers_see_changes_made_through_the_tree() {
        let mut tree = ComponentTree::new();
        let id = tree.insert(Component::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        tree.observe_state(id, move |change| sink.borrow_mut().push(change.clone()));

        tree.set_state(id, "key", "value");
        assert_eq!(seen.borrow().len(), 1);
        assert!(matches!(&seen.borrow()[0], StateChange::Set { key, .. } if key == "key"));

        assert_eq!(tree.state_previous(id, "key"), Some(Value::Null));
    }

    #[test]
    fn test_axis_presets() {
        let mut tree = ComponentTree::new();
        let vstack = tree.insert(Component::vstack());
        let hstack = tree.insert(Component::hstack());

        assert_eq!(tree.layout_direction(vstack), Some(Axis::Vertical));
        assert_eq!(tree.layout_direction(hstack), Some(Axis::Horizontal));
        assert!(tree.is_container(vstack));
    }
}
