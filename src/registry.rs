//! Named-state registry and application event bus.
//!
//! Both are process-wide singletons in spirit, but neither is a global:
//! the host constructs them once at startup and passes handles around.
//! Handles are cheap clones over a shared interior, so every clone
//! observes the same states and the same subscribers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::events::{EventEmitter, HandlerId};
use crate::state::ObservableState;

// =============================================================================
// StateRegistry
// =============================================================================

/// Registry of named [`ObservableState`] containers.
///
/// A name is created at most once for the registry's lifetime; every
/// acquisition of that name returns the same shared container.
#[derive(Clone, Default)]
pub struct StateRegistry {
    states: Rc<RefCell<HashMap<String, Rc<ObservableState>>>>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the state `name`, seeded with `initial`. Fails when the
    /// name is already taken.
    pub fn create(
        &self,
        name: &str,
        initial: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<Rc<ObservableState>> {
        let mut states = self.states.borrow_mut();
        if states.contains_key(name) {
            return Err(Error::DuplicateState(name.to_string()));
        }
        let state = Rc::new(ObservableState::with_values(initial));
        states.insert(name.to_string(), Rc::clone(&state));
        Ok(state)
    }

    /// Fetch the state `name`. Fails when it was never created.
    pub fn get(&self, name: &str) -> Result<Rc<ObservableState>> {
        self.states
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownState(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.borrow().contains_key(name)
    }
}

// =============================================================================
// EventBus
// =============================================================================

/// Application-wide event bus: one shared emitter behind cheap clones.
///
/// Handlers registered through any clone observe emissions from every
/// other clone.
#[derive(Clone, Default)]
pub struct EventBus {
    emitter: Rc<EventEmitter<Value>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, event: &str, handler: impl FnMut(&Value) + 'static) -> HandlerId {
        self.emitter.on(event, handler)
    }

    pub fn once(&self, event: &str, handler: impl FnMut(&Value) + 'static) -> HandlerId {
        self.emitter.once(event, handler)
    }

    pub fn off(&self, event: &str, handler: HandlerId) {
        self.emitter.off(event, handler)
    }

    pub fn off_all(&self, event: &str) {
        self.emitter.off_all(event)
    }

    pub fn emit(&self, event: &str, payload: &Value) {
        self.emitter.emit(event, payload)
    }
}
