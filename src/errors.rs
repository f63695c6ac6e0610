//! Typed error hierarchy for the order board.
//!
//! Every document lookup that can come back empty surfaces here as a
//! variant instead of a panic, so a failing handler stops without touching
//! the document and the caller decides whether to log and carry on.

use thiserror::Error;

/// Errors from the board handlers, view bindings, and gesture scripts.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Order {id} not found on the board")]
    OrderNotFound { id: String },

    #[error("Order {id} is already on the board")]
    DuplicateOrder { id: String },

    #[error("Order id must not be empty")]
    EmptyOrderId,

    #[error("No active order; open an order for editing first")]
    NoActiveOrder,

    #[error("Required element [{selector}] is missing from the document")]
    MissingElement { selector: String },

    #[error("Node {index} is no longer attached to the document")]
    StaleNode { index: usize },

    #[error("Invalid column '{column}': {message}")]
    InvalidColumn { column: String, message: String },

    #[error("Script error: {0}")]
    Script(String),
}

impl BoardError {
    /// Whether the error came from a stale or missing order reference.
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, Self::OrderNotFound { .. } | Self::NoActiveOrder)
    }
}
