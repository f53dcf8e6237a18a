//! Container layout: partitioning a container's extent among its
//! visible children along the primary axis.

use tracing::trace;

use crate::error::{Error, Result};
use crate::types::Axis;

use super::node::ComponentId;
use super::tree::ComponentTree;

impl ComponentTree {
    /// Primary axis of a container; `None` for plain components.
    pub fn layout_direction(&self, id: ComponentId) -> Option<Axis> {
        self.nodes[id].layout.map(|layout| layout.direction)
    }

    /// Child spacing of a container; `None` for plain components.
    pub fn layout_spacing(&self, id: ComponentId) -> Option<u16> {
        self.nodes[id].layout.map(|layout| layout.spacing)
    }

    /// Change a container's primary axis and run an update cycle.
    pub fn set_layout_direction(&mut self, id: ComponentId, direction: Axis) -> Result<()> {
        let layout = self.nodes[id].layout.as_mut().ok_or(Error::NotAContainer)?;
        layout.direction = direction;
        self.update(id);
        Ok(())
    }

    /// Change a container's child spacing; negative inputs clamp to zero.
    pub fn set_layout_spacing(&mut self, id: ComponentId, spacing: i32) -> Result<()> {
        let layout = self.nodes[id].layout.as_mut().ok_or(Error::NotAContainer)?;
        layout.spacing = spacing.clamp(0, i32::from(u16::MAX)) as u16;
        self.update(id);
        Ok(())
    }

    /// Partition the container's extent among its visible children.
    ///
    /// Along the primary axis each visible child receives
    /// `(extent - spacing × (visible - 1)) / visible` cells — integer
    /// floor, remainder undistributed, the subtraction clamped to ≥ 0 —
    /// placed sequentially from the container's origin, advancing by the
    /// share plus spacing. The cross axis is always the container's full
    /// cross extent. Invisible children are skipped entirely: no
    /// geometry writes, no spacing slot. No-op for plain components and
    /// for containers with no visible children.
    ///
    /// Geometry lands through the update-triggering setters, so mounted
    /// children re-render as they are placed.
    pub fn calculate_layout(&mut self, id: ComponentId) {
        let Some(layout) = self.nodes[id].layout else {
            return;
        };
        let visible: Vec<ComponentId> = self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|&child| self.nodes[child].visible)
            .collect();
        if visible.is_empty() {
            return;
        }

        let origin = self.nodes[id].position;
        let size = self.nodes[id].size;
        let count = visible.len() as u16;
        let total_spacing = layout.spacing.saturating_mul(count - 1);

        match layout.direction {
            Axis::Vertical => {
                let available = size.height.saturating_sub(total_spacing);
                let share = available / count;
                let mut row = origin.row;
                for child in visible {
                    self.set_position(child, row, origin.col);
                    self.set_size(child, share, size.width);
                    row = row.saturating_add(share).saturating_add(layout.spacing);
                }
            }
            Axis::Horizontal => {
                let available = size.width.saturating_sub(total_spacing);
                let share = available / count;
                let mut col = origin.col;
                for child in visible {
                    self.set_position(child, origin.row, col);
                    self.set_size(child, size.height, share);
                    col = col.saturating_add(share).saturating_add(layout.spacing);
                }
            }
        }
        trace!(container = ?self.nodes[id].id, children = count, "layout recalculated");
    }
}
