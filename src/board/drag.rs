//! Drag-and-drop tracking.
//!
//! ```text
//!   Idle ──dragstart(id)──> Dragging(id) ──dragend──> Idle
//!                              │    ^
//!                              └────┘ dragover(area): flag that area
//! ```
//!
//! Each drop area has an explicit `is_drop_target` flag; at most one is set
//! at any time. The `data-drop-target` attribute on the page only mirrors it.

use serde::Serialize;

use super::dom::{Document, NodeId};
use super::models::Column;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropArea {
    pub column: Column,
    pub is_drop_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging(String),
}

/// What `dragend` resolved: the transferred order and the flagged column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropResolution {
    pub order_id: Option<String>,
    pub column: Option<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragTracker {
    transfer: Option<String>,
    over: Option<Column>,
    areas: Vec<DropArea>,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DragTracker {
    pub fn new() -> Self {
        Self {
            transfer: None,
            over: None,
            areas: Column::ALL
                .iter()
                .map(|column| DropArea {
                    column: *column,
                    is_drop_target: false,
                })
                .collect(),
        }
    }

    pub fn phase(&self) -> DragPhase {
        match &self.transfer {
            Some(id) => DragPhase::Dragging(id.clone()),
            None => DragPhase::Idle,
        }
    }

    pub fn dragged(&self) -> Option<&str> {
        self.transfer.as_deref()
    }

    pub fn over(&self) -> Option<Column> {
        self.over
    }

    pub fn areas(&self) -> &[DropArea] {
        &self.areas
    }

    /// Capture the dragged order. A new dragstart replaces any previous one
    /// and drops any target flagged before it.
    pub fn start(&mut self, order_id: &str) {
        self.transfer = Some(order_id.to_string());
        self.clear_targets();
    }

    fn clear_targets(&mut self) {
        self.over = None;
        for area in &mut self.areas {
            area.is_drop_target = false;
        }
    }

    /// Mark `column` as the hovered drop target. Returns `false` when it
    /// already was, so repeated dragover events cost nothing.
    pub fn update_over(&mut self, column: Column) -> bool {
        if self.over == Some(column) && self.is_drop_target(column) {
            return false;
        }
        self.over = Some(column);
        for area in &mut self.areas {
            area.is_drop_target = area.column == column;
        }
        true
    }

    pub fn is_drop_target(&self, column: Column) -> bool {
        self.areas
            .iter()
            .any(|a| a.column == column && a.is_drop_target)
    }

    pub fn drop_target(&self) -> Option<Column> {
        self.areas
            .iter()
            .find(|a| a.is_drop_target)
            .map(|a| a.column)
    }

    /// End the drag: hand back what was transferred and where it was
    /// dropped, and reset to idle.
    pub fn finish(&mut self) -> DropResolution {
        let resolution = DropResolution {
            order_id: self.transfer.take(),
            column: self.drop_target(),
        };
        self.clear_targets();
        resolution
    }
}

/// First drop area on an event path, by the typed `area` capability.
pub fn area_on_path(doc: &Document, path: &[NodeId]) -> Option<Column> {
    path.iter()
        .find_map(|node| doc.get(*node).and_then(|e| e.area()))
}
