//! Crate-wide error type.
//!
//! Every variant is a local, synchronous, caller-surfaced failure; none
//! is retried or swallowed. The event path (`on`/`off`/`emit`) and the
//! lifecycle methods deliberately never fail — see [`crate::events`].

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the component tree and the registries.
#[derive(Debug, Error)]
pub enum Error {
    /// A layout direction string was neither "vertical" nor "horizontal".
    #[error("layout direction must be \"vertical\" or \"horizontal\", got {0:?}")]
    InvalidDirection(String),

    /// A sibling with the same non-empty name already exists.
    #[error("a child named {0:?} already exists")]
    DuplicateName(String),

    /// A component with the same id already exists in the tree.
    #[error("a component with id {0:?} already exists in the tree")]
    DuplicateId(String),

    /// The child is already attached to a different parent.
    #[error("component is already attached to a parent")]
    AlreadyAttached,

    /// Attaching here would make a component its own ancestor.
    #[error("cannot attach a component inside its own subtree")]
    IntoOwnSubtree,

    /// A container-only operation was called on a plain component.
    #[error("component is not a container")]
    NotAContainer,

    /// A named state container was created twice.
    #[error("state {0:?} already exists")]
    DuplicateState(String),

    /// A named state container was requested before being created.
    #[error("state {0:?} does not exist")]
    UnknownState(String),
}
