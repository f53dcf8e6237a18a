//! Core types for arbor-tui.
//!
//! Small copyable types that everything else builds on. They flow through
//! the lifecycle engine and the layout pass.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// =============================================================================
// Lifecycle
// =============================================================================

/// Lifecycle status of a component.
///
/// Transitions: `Created` → `Mounted` → `Updated` (repeatable) →
/// `Unmounted`. Once unmounted, a component never mounts again; a fresh
/// instance is the only way back to `Mounted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Created,
    Mounted,
    Updated,
    Unmounted,
}

impl Lifecycle {
    /// Lowercase name, matching the event vocabulary.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Mounted => "mounted",
            Self::Updated => "updated",
            Self::Unmounted => "unmounted",
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Axis
// =============================================================================

/// Primary layout axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = Error;

    /// Exactly `"vertical"` and `"horizontal"` are recognized; anything
    /// else is a configuration error.
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "vertical" => Ok(Self::Vertical),
            "horizontal" => Ok(Self::Horizontal),
            other => Err(Error::InvalidDirection(other.to_string())),
        }
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Absolute position in screen cells, `(row, col)` with origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// Extent in screen cells, `(height, width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub height: u16,
    pub width: u16,
}

impl Size {
    pub const fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }
}
