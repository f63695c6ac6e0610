use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::drag::DragTracker;
use super::models::Column;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Help,
    Add,
    Edit,
}

impl Overlay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Add => "add",
            Self::Edit => "edit",
        }
    }
}

impl std::fmt::Display for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display settings a board is mounted with.
#[derive(Debug, Clone)]
pub struct BoardSettings {
    pub title: String,
    pub initial_column: Column,
    pub focus_add_on_load: bool,
    pub labels: BTreeMap<Column, String>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            title: "Orders".to_string(),
            initial_column: Column::Ordered,
            focus_add_on_load: true,
            labels: BTreeMap::new(),
        }
    }
}

impl BoardSettings {
    pub fn label(&self, column: Column) -> String {
        self.labels
            .get(&column)
            .cloned()
            .unwrap_or_else(|| column.default_label().to_string())
    }
}

/// Mutable state shared by the handlers of one board.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub drag: DragTracker,
    /// Order targeted by the edit overlay; cleared whenever it closes.
    pub active_order: Option<String>,
}
