//! Observable key/value state.
//!
//! [`ObservableState`] stores [`serde_json::Value`]s, keeps the
//! immediately preceding value per key, and notifies subscribers through
//! an [`EventEmitter`] whenever a value actually changes. Writes that
//! leave a value equal are no-ops and emit nothing; a missing key reads
//! as `Value::Null` for the purpose of that comparison.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::events::{EventEmitter, HandlerId, names};

// =============================================================================
// StateChange
// =============================================================================

/// Change notification payload.
///
/// [`ObservableState::set`] produces `Set`; [`ObservableState::update`]
/// produces a single `Batch` when at least one key changed. The two
/// shapes are never interchangeable, so consumers can always tell a
/// single-key write from a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    /// One key changed through `set`.
    Set {
        key: String,
        value: Value,
        /// `Value::Null` when the key was previously unset.
        old_value: Value,
    },
    /// At least one key changed through `update`.
    Batch {
        /// The keys that actually changed, in application order.
        keys: Vec<String>,
        /// The full mapping that was applied, unchanged entries included.
        updates: HashMap<String, Value>,
    },
}

// =============================================================================
// ObservableState
// =============================================================================

/// Key/value store with change notifications and one level of history.
///
/// Interior mutability throughout: the store mutates through `&self`, so
/// shared handles (`Rc<ObservableState>`) are first-class.
#[derive(Default)]
pub struct ObservableState {
    values: RefCell<HashMap<String, Value>>,
    previous: RefCell<HashMap<String, Value>>,
    emitter: EventEmitter<StateChange>,
}

impl fmt::Debug for ObservableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableState")
            .field("values", &self.values)
            .field("previous", &self.previous)
            .finish_non_exhaustive()
    }
}

impl ObservableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-seeded with `initial` values. Seeding is not a
    /// change: nothing is emitted and no history is recorded.
    pub fn with_values(initial: impl IntoIterator<Item = (String, Value)>) -> Self {
        let state = Self::new();
        state.values.borrow_mut().extend(initial);
        state
    }

    /// Current value for `key`, or `None` when unset.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    /// Set one key, returning whether the value actually changed.
    ///
    /// An actual change stores the old value as the key's previous value
    /// and emits one [`StateChange::Set`]; an equal value changes
    /// nothing and emits nothing.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let old_value = self.get(key).unwrap_or(Value::Null);
        if old_value == value {
            return false;
        }
        self.previous.borrow_mut().insert(key.to_string(), old_value.clone());
        self.values.borrow_mut().insert(key.to_string(), value.clone());
        self.emitter.emit(
            names::STATE_CHANGE,
            &StateChange::Set {
                key: key.to_string(),
                value,
                old_value,
            },
        );
        true
    }

    /// Apply several entries with the same change-detection rule as
    /// [`set`](Self::set), in order. When at least one key changed,
    /// exactly one [`StateChange::Batch`] fires carrying every changed
    /// key and the full mapping that was applied. Returns whether
    /// anything changed.
    pub fn update(&self, entries: impl IntoIterator<Item = (String, Value)>) -> bool {
        let entries: Vec<(String, Value)> = entries.into_iter().collect();
        let mut changed = Vec::new();
        for (key, value) in &entries {
            let old_value = self.get(key).unwrap_or(Value::Null);
            if old_value == *value {
                continue;
            }
            self.previous.borrow_mut().insert(key.clone(), old_value);
            self.values.borrow_mut().insert(key.clone(), value.clone());
            changed.push(key.clone());
        }
        if changed.is_empty() {
            return false;
        }
        let updates: HashMap<String, Value> = entries.into_iter().collect();
        self.emitter.emit(
            names::STATE_CHANGE,
            &StateChange::Batch { keys: changed, updates },
        );
        true
    }

    /// Snapshot copy of all current values.
    pub fn get_all(&self) -> HashMap<String, Value> {
        self.values.borrow().clone()
    }

    /// Last known prior value for `key`; `None` until the key first
    /// changes.
    pub fn get_previous(&self, key: &str) -> Option<Value> {
        self.previous.borrow().get(key).cloned()
    }

    /// Subscribe to change notifications.
    pub fn on_change(&self, handler: impl FnMut(&StateChange) + 'static) -> HandlerId {
        self.emitter.on(names::STATE_CHANGE, handler)
    }

    /// Remove a subscription made with [`on_change`](Self::on_change).
    pub fn off_change(&self, id: HandlerId) {
        self.emitter.off(names::STATE_CHANGE, id)
    }

    /// The underlying emitter, for `once` and bulk removal.
    pub fn emitter(&self) -> &EventEmitter<StateChange> {
        &self.emitter
    }
}
