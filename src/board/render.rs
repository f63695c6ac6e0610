//! Order cards: building them from an [`Order`] and reading them back.

use super::dom::{Document, NodeId};
use super::models::{Column, Order};
use crate::errors::BoardError;

pub const ORDER_ID_ATTR: &str = "data-id";
pub const ORDER_COLUMN_ATTR: &str = "data-column";
pub const ORDER_TITLE_MARKER: &str = "data-order-title";
pub const ORDER_TABLE_MARKER: &str = "data-order-table";

/// Build a detached card for `order`. The caller appends it to a column.
pub fn create_order_element(doc: &mut Document, order: &Order) -> Result<NodeId, BoardError> {
    let card = doc.create_element("div");
    doc.set_attr(card, "class", "order")?;
    doc.set_attr(card, "draggable", "true")?;
    doc.set_attr(card, ORDER_ID_ATTR, &order.id)?;
    doc.set_attr(card, ORDER_COLUMN_ATTR, order.column.as_str())?;
    doc.set_attr(card, "data-created-at", &order.created_at)?;

    let title = doc.element(card, "div", &[("class", "order__title"), (ORDER_TITLE_MARKER, "")])?;
    doc.set_text(title, &order.title)?;

    let details = doc.element(card, "dl", &[("class", "order__details")])?;
    let row = doc.element(details, "div", &[("class", "order__row")])?;
    let label = doc.element(row, "dt", &[])?;
    doc.set_text(label, "Table:")?;
    let table = doc.element(row, "dd", &[("class", "order__value"), (ORDER_TABLE_MARKER, "")])?;
    doc.set_text(table, &order.table)?;

    Ok(card)
}

/// Card element for `order_id`, if one is on the page.
pub fn find_order_element(doc: &Document, order_id: &str) -> Option<NodeId> {
    doc.query_attr(doc.root(), ORDER_ID_ATTR, Some(order_id))
}

/// The card containing `node`, walking up the event path.
pub fn closest_order(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.closest(node, |e| e.has_attr(ORDER_ID_ATTR))
}

fn marker(doc: &Document, card: NodeId, name: &str) -> Result<NodeId, BoardError> {
    doc.query_attr(card, name, None)
        .ok_or_else(|| BoardError::MissingElement {
            selector: name.to_string(),
        })
}

/// Rewrite a card's title and table text.
pub fn update_order_text(
    doc: &mut Document,
    card: NodeId,
    title: &str,
    table: &str,
) -> Result<(), BoardError> {
    let title_node = marker(doc, card, ORDER_TITLE_MARKER)?;
    let table_node = marker(doc, card, ORDER_TABLE_MARKER)?;
    doc.set_text(title_node, title)?;
    doc.set_text(table_node, table)?;
    Ok(())
}

/// Read a card back into an [`Order`]. `None` when the element is not a
/// well-formed card.
pub fn read_order(doc: &Document, card: NodeId) -> Option<Order> {
    let id = doc.attr(card, ORDER_ID_ATTR)?;
    let column: Column = doc.attr(card, ORDER_COLUMN_ATTR)?.parse().ok()?;
    let title = doc.query_attr(card, ORDER_TITLE_MARKER, None)?;
    let table = doc.query_attr(card, ORDER_TABLE_MARKER, None)?;
    Some(Order {
        id: id.to_string(),
        title: doc.text(title).unwrap_or_default().to_string(),
        table: doc.text(table).unwrap_or_default().to_string(),
        column,
        created_at: doc.attr(card, "data-created-at").unwrap_or_default().to_string(),
    })
}
