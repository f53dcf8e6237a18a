//! # arbor-tui
//!
//! Reactive component-tree engine for terminal UIs.
//!
//! A hierarchy of stateful components that mount, receive events, mutate
//! observable state, and re-render in response. The engine owns the
//! tree, the lifecycle state machine, event propagation, and layout; it
//! never touches the terminal. Hosts implement [`Behavior::render`]
//! against their own output medium and feed input through
//! [`ComponentTree::handle_event`] on the root.
//!
//! ## Architecture
//!
//! Components live in an arena ([`ComponentTree`]) and are addressed by
//! [`ComponentId`]; parents own an ordered child list, children keep a
//! non-owning back-link. Everything is single threaded and synchronous:
//! an event, the state write it causes, and the update/render/layout
//! cascade that follows all finish on the calling stack.
//!
//! ```text
//! handle_event → behavior hook → state write → update → render → layout
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Lifecycle, Axis, Position, Size)
//! - [`events`] - Ordered publish/subscribe emitter
//! - [`state`] - Observable key/value state
//! - [`engine`] - Component tree, lifecycle, layout
//! - [`registry`] - Named-state registry and event bus handles

pub mod engine;
pub mod error;
pub mod events;
pub mod registry;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{Behavior, Component, ComponentId, ComponentTree, ContainerLayout};

pub use error::{Error, Result};

pub use events::{EventEmitter, HandlerId, names};

pub use registry::{EventBus, StateRegistry};

pub use state::{ObservableState, StateChange};
