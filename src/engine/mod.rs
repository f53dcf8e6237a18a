//! The component tree engine.
//!
//! [`ComponentTree`] owns every node and drives the lifecycle state
//! machine; [`Component`] describes one node before insertion;
//! [`Behavior`] is the per-variant override surface.

mod layout;
mod node;
mod tree;

pub use node::{Behavior, Component, ComponentId, ContainerLayout};
pub use tree::ComponentTree;
