use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Ordered,
    Preparing,
    Ready,
    Delivered,
}

impl Column {
    /// Board order, left to right.
    pub const ALL: [Column; 4] = [
        Column::Ordered,
        Column::Preparing,
        Column::Ready,
        Column::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ordered => "ordered",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Ordered => "Ordered",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ordered" => Ok(Self::Ordered),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("Invalid column: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub title: String,
    pub table: String,
    pub column: Column,
    pub created_at: String,
}

impl Order {
    /// Build a fresh order with a generated id.
    pub fn new(title: impl Into<String>, table: impl Into<String>, column: Column) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), title, table, column)
    }

    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        table: impl Into<String>,
        column: Column,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            table: table.into(),
            column,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

// View types read back from the document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub title: String,
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    pub fn column(&self, column: Column) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.column == column)
    }

    pub fn order_count(&self) -> usize {
        self.columns.iter().map(|c| c.orders.len()).sum()
    }

    /// Column currently holding the order, if it is on the board.
    pub fn column_of(&self, order_id: &str) -> Option<Column> {
        self.columns
            .iter()
            .find(|c| c.orders.iter().any(|o| o.id == order_id))
            .map(|c| c.column)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnView {
    pub column: Column,
    pub label: String,
    pub orders: Vec<Order>,
}
