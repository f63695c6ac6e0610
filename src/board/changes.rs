use serde::{Deserialize, Serialize};

use super::models::{Column, Order};
use super::state::Overlay;

// ── Board change journal ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum BoardChange {
    OrderCreated {
        order: Order,
    },
    OrderUpdated {
        order_id: String,
        title: String,
        table: String,
    },
    OrderMoved {
        order_id: String,
        from_column: Column,
        to_column: Column,
    },
    OrderDeleted {
        order_id: String,
    },
    OverlayOpened {
        overlay: Overlay,
    },
    OverlayClosed {
        overlay: Overlay,
    },
    DragStarted {
        order_id: String,
    },
    DropTargetChanged {
        column: Column,
    },
    DragEnded {
        order_id: Option<String>,
        column: Option<Column>,
    },
}

impl BoardChange {
    /// One-line summary for terminal output.
    pub fn summary(&self) -> String {
        match self {
            Self::OrderCreated { order } => {
                format!("created {} \"{}\" (table {}) in {}", order.id, order.title, order.table, order.column)
            }
            Self::OrderUpdated { order_id, title, table } => {
                format!("updated {order_id}: \"{title}\" (table {table})")
            }
            Self::OrderMoved { order_id, from_column, to_column } => {
                format!("moved {order_id}: {from_column} -> {to_column}")
            }
            Self::OrderDeleted { order_id } => format!("deleted {order_id}"),
            Self::OverlayOpened { overlay } => format!("opened {overlay} overlay"),
            Self::OverlayClosed { overlay } => format!("closed {overlay} overlay"),
            Self::DragStarted { order_id } => format!("drag started for {order_id}"),
            Self::DropTargetChanged { column } => format!("hovering {column}"),
            Self::DragEnded { order_id, column } => match (order_id, column) {
                (Some(id), Some(column)) => format!("dropped {id} on {column}"),
                (Some(id), None) => format!("dropped {id} outside any column"),
                _ => "drag ended with nothing transferred".to_string(),
            },
        }
    }

    /// Whether the change altered which orders exist or where they sit.
    pub fn touches_orders(&self) -> bool {
        matches!(
            self,
            Self::OrderCreated { .. }
                | Self::OrderUpdated { .. }
                | Self::OrderMoved { .. }
                | Self::OrderDeleted { .. }
        )
    }
}
