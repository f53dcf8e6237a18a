//! Ordered publish/subscribe primitive.
//!
//! [`EventEmitter`] keeps one handler list per event name, invoked in
//! registration order. Registration returns a [`HandlerId`] token used
//! for removal. `emit` works on a snapshot of the list taken up front,
//! so handlers registered or removed mid-flight do not affect a delivery
//! already in progress.
//!
//! Failure contract: nothing in this module fails. Unknown event names
//! and stale tokens are silent no-ops — resilience over strictness on
//! the hot dispatch path.
//!
//! Re-entrancy: a handler may register, remove, or emit freely. The one
//! unsupported shape is a handler emitting an event that reaches *itself*
//! again while it is still running; handler bodies are exclusively
//! borrowed for the duration of a call.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Event names used throughout the framework.
pub mod names {
    // Lifecycle events
    pub const MOUNT: &str = "mount";
    pub const UNMOUNT: &str = "unmount";
    pub const UPDATE: &str = "update";
    pub const RENDER: &str = "render";
    pub const STATE_CHANGE: &str = "state_change";

    // Input events
    pub const KEY_PRESS: &str = "key_press";
    pub const MOUSE_CLICK: &str = "mouse_click";
    pub const MOUSE_MOVE: &str = "mouse_move";

    // Window events
    pub const RESIZE: &str = "resize";
    pub const FOCUS: &str = "focus";
    pub const BLUR: &str = "blur";
}

// =============================================================================
// Types
// =============================================================================

/// Token identifying one registration; returned by [`EventEmitter::on`]
/// and [`EventEmitter::once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type SharedHandler<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Entry<T> {
    id: HandlerId,
    once: bool,
    handler: SharedHandler<T>,
}

// Manual impl: `T` itself need not be Clone.
impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            once: self.once,
            handler: Rc::clone(&self.handler),
        }
    }
}

struct Registry<T> {
    handlers: HashMap<String, Vec<Entry<T>>>,
    next_id: u64,
}

// =============================================================================
// EventEmitter
// =============================================================================

/// Ordered publish/subscribe emitter.
///
/// Single threaded; interior mutability lets registration and emission
/// work through `&self`, which is what allows handlers to mutate the
/// emitter they are being delivered from.
pub struct EventEmitter<T> {
    registry: RefCell<Registry<T>>,
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(Registry {
                handlers: HashMap::new(),
                next_id: 0,
            }),
        }
    }

    /// Register `handler` for `event`. Handlers fire in registration
    /// order relative to others on the same event name; registering the
    /// same closure twice yields two independent entries.
    pub fn on(&self, event: &str, handler: impl FnMut(&T) + 'static) -> HandlerId {
        self.register(event, false, handler)
    }

    /// Register a handler that deregisters itself before its first
    /// delivery; it fires at most once across any number of emissions.
    pub fn once(&self, event: &str, handler: impl FnMut(&T) + 'static) -> HandlerId {
        self.register(event, true, handler)
    }

    fn register(&self, event: &str, once: bool, handler: impl FnMut(&T) + 'static) -> HandlerId {
        let mut registry = self.registry.borrow_mut();
        let id = HandlerId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.entry(event.to_string()).or_default().push(Entry {
            id,
            once,
            handler: Rc::new(RefCell::new(handler)),
        });
        id
    }

    /// Remove one registration. Unknown events or tokens are no-ops.
    pub fn off(&self, event: &str, id: HandlerId) {
        let mut registry = self.registry.borrow_mut();
        if let Some(entries) = registry.handlers.get_mut(event) {
            entries.retain(|entry| entry.id != id);
        }
    }

    /// Remove every handler registered for `event`.
    pub fn off_all(&self, event: &str) {
        self.registry.borrow_mut().handlers.remove(event);
    }

    /// Invoke every handler currently registered for `event`, in
    /// registration order, passing `payload`. No-op when none are
    /// registered.
    pub fn emit(&self, event: &str, payload: &T) {
        let snapshot: Vec<Entry<T>> = match self.registry.borrow().handlers.get(event) {
            Some(entries) => entries.clone(),
            None => return,
        };
        for entry in snapshot {
            if entry.once {
                // Consume the registration first; a re-entrant emit must
                // not deliver the same once-handler twice.
                let mut registry = self.registry.borrow_mut();
                let Some(entries) = registry.handlers.get_mut(event) else {
                    continue;
                };
                let Some(position) = entries.iter().position(|e| e.id == entry.id) else {
                    continue;
                };
                entries.remove(position);
                drop(registry);
            }
            (entry.handler.borrow_mut())(payload);
        }
    }

    /// Number of handlers currently registered for `event`.
    pub fn handler_count(&self, event: &str) -> usize {
        self.registry.borrow().handlers.get(event).map_or(0, Vec::len)
    }
}
