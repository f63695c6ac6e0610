//! Order board handlers.
//!
//! [`BoardController`] owns the document, its view bindings, and the board
//! state. Each handler performs one user-visible transition and records a
//! [`BoardChange`]. Handlers that look up an order guard the lookup and
//! return a [`BoardError`] before touching the document.

use tracing::{debug, info};

use super::changes::BoardChange;
use super::dom::{Document, NodeId};
use super::drag::area_on_path;
use super::models::{BoardView, Column, ColumnView, Order};
use super::render::{
    ORDER_COLUMN_ATTR, ORDER_ID_ATTR, closest_order, create_order_element, find_order_element,
    read_order, update_order_text,
};
use super::state::{BoardSettings, BoardState, Overlay};
use super::view::ViewBindings;
use crate::errors::BoardError;

const DROP_TARGET_ATTR: &str = "data-drop-target";
const DRAGGING_ATTR: &str = "data-dragging";

pub struct BoardController {
    doc: Document,
    view: ViewBindings,
    state: BoardState,
    settings: BoardSettings,
    changes: Vec<BoardChange>,
}

impl BoardController {
    /// Mount an empty board.
    pub fn new(settings: BoardSettings) -> Result<Self, BoardError> {
        let mut doc = Document::new();
        let view = ViewBindings::mount(&mut doc, &settings.title, |c| settings.label(c))?;
        Ok(Self {
            doc,
            view,
            state: BoardState::default(),
            settings,
            changes: Vec::new(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn view(&self) -> &ViewBindings {
        &self.view
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn active_order(&self) -> Option<&str> {
        self.state.active_order.as_deref()
    }

    pub fn changes(&self) -> &[BoardChange] {
        &self.changes
    }

    /// Drain the change journal.
    pub fn take_changes(&mut self) -> Vec<BoardChange> {
        std::mem::take(&mut self.changes)
    }

    fn record(&mut self, change: BoardChange) {
        debug!(change = %change.summary(), "board change");
        self.changes.push(change);
    }

    fn overlay_node(&self, overlay: Overlay) -> NodeId {
        match overlay {
            Overlay::Help => self.view.help.overlay,
            Overlay::Add => self.view.add.overlay,
            Overlay::Edit => self.view.edit.overlay,
        }
    }

    pub fn is_overlay_open(&self, overlay: Overlay) -> bool {
        let node = self.overlay_node(overlay);
        self.doc.contains(node) && !self.doc.is_hidden(node)
    }

    fn show_overlay(&mut self, overlay: Overlay) -> Result<(), BoardError> {
        if self.is_overlay_open(overlay) {
            return Ok(());
        }
        self.doc.set_hidden(self.overlay_node(overlay), false)?;
        self.record(BoardChange::OverlayOpened { overlay });
        Ok(())
    }

    fn hide_overlay(&mut self, overlay: Overlay) -> Result<(), BoardError> {
        if !self.is_overlay_open(overlay) {
            return Ok(());
        }
        self.doc.set_hidden(self.overlay_node(overlay), true)?;
        self.record(BoardChange::OverlayClosed { overlay });
        Ok(())
    }

    fn focus_add_trigger(&mut self) -> Result<(), BoardError> {
        self.doc.focus(self.view.other.add)
    }

    /// Page load: focus the add trigger.
    pub fn on_load(&mut self) -> Result<(), BoardError> {
        if self.settings.focus_add_on_load {
            self.focus_add_trigger()?;
        }
        Ok(())
    }

    /// Render `order` and append it to its column.
    pub fn insert_order(&mut self, order: &Order) -> Result<NodeId, BoardError> {
        if order.id.is_empty() {
            return Err(BoardError::EmptyOrderId);
        }
        if find_order_element(&self.doc, &order.id).is_some() {
            return Err(BoardError::DuplicateOrder {
                id: order.id.clone(),
            });
        }
        let card = create_order_element(&mut self.doc, order)?;
        self.doc.append_child(self.view.column(order.column), card)?;
        self.record(BoardChange::OrderCreated {
            order: order.clone(),
        });
        Ok(card)
    }

    /// Read every card back, column by column.
    pub fn snapshot(&self) -> BoardView {
        let columns = Column::ALL
            .iter()
            .map(|column| {
                let list = self.view.column(*column);
                let orders = self
                    .doc
                    .get(list)
                    .map(|e| e.children().to_vec())
                    .unwrap_or_default()
                    .into_iter()
                    .filter_map(|card| read_order(&self.doc, card))
                    .collect();
                ColumnView {
                    column: *column,
                    label: self.settings.label(*column),
                    orders,
                }
            })
            .collect();
        BoardView {
            title: self.settings.title.clone(),
            columns,
        }
    }

    // ── Help overlay ─────────────────────────────────────────────────

    pub fn open_help(&mut self) -> Result<(), BoardError> {
        self.show_overlay(Overlay::Help)
    }

    pub fn close_help(&mut self) -> Result<(), BoardError> {
        self.hide_overlay(Overlay::Help)?;
        self.focus_add_trigger()
    }

    pub fn toggle_help(&mut self) -> Result<(), BoardError> {
        if self.is_overlay_open(Overlay::Help) {
            self.close_help()
        } else {
            self.open_help()
        }
    }

    // ── Add overlay ──────────────────────────────────────────────────

    pub fn open_add(&mut self) -> Result<(), BoardError> {
        self.show_overlay(Overlay::Add)?;
        self.doc.focus(self.view.add.title)
    }

    pub fn close_add(&mut self) -> Result<(), BoardError> {
        self.hide_overlay(Overlay::Add)?;
        self.doc.set_value(self.view.add.title, "")?;
        self.doc.set_value(self.view.add.table, "")?;
        self.focus_add_trigger()
    }

    pub fn toggle_add(&mut self) -> Result<(), BoardError> {
        if self.is_overlay_open(Overlay::Add) {
            self.close_add()
        } else {
            self.open_add()
        }
    }

    /// Create an order in the initial column and close the add overlay.
    /// Empty title or table values are accepted as typed.
    pub fn submit_add(&mut self, title: &str, table: &str) -> Result<Order, BoardError> {
        let order = Order::new(title, table, self.settings.initial_column);
        self.insert_order(&order)?;
        info!(order_id = %order.id, column = %order.column, "order added");
        self.close_add()?;
        Ok(order)
    }

    fn submit_add_form(&mut self) -> Result<Order, BoardError> {
        let title = self.doc.value(self.view.add.title).unwrap_or_default().to_string();
        let table = self.doc.value(self.view.add.table).unwrap_or_default().to_string();
        self.submit_add(&title, &table)
    }

    // ── Edit overlay ─────────────────────────────────────────────────

    /// Make `order_id` the active order and show the edit overlay filled
    /// with its current values.
    pub fn open_edit(&mut self, order_id: &str) -> Result<(), BoardError> {
        let card = find_order_element(&self.doc, order_id).ok_or_else(|| {
            BoardError::OrderNotFound {
                id: order_id.to_string(),
            }
        })?;
        let order = read_order(&self.doc, card).ok_or_else(|| BoardError::MissingElement {
            selector: format!("{ORDER_ID_ATTR}=\"{order_id}\" card fields"),
        })?;

        let edit = self.view.edit;
        self.doc.set_value(edit.title, &order.title)?;
        self.doc.set_value(edit.table, &order.table)?;
        self.doc.set_value(edit.column, order.column.as_str())?;
        self.state.active_order = Some(order.id);
        self.show_overlay(Overlay::Edit)?;
        self.doc.focus(edit.title)
    }

    /// Hide the edit overlay, reset its form, and forget the active order.
    pub fn close_edit(&mut self) -> Result<(), BoardError> {
        self.hide_overlay(Overlay::Edit)?;
        let edit = self.view.edit;
        self.doc.set_value(edit.title, "")?;
        self.doc.set_value(edit.table, "")?;
        self.doc.set_value(edit.column, "")?;
        self.state.active_order = None;
        self.focus_add_trigger()
    }

    fn require_active_card(&self) -> Result<(String, NodeId), BoardError> {
        let id = self
            .state
            .active_order
            .clone()
            .ok_or(BoardError::NoActiveOrder)?;
        let card = find_order_element(&self.doc, &id)
            .ok_or_else(|| BoardError::OrderNotFound { id: id.clone() })?;
        Ok((id, card))
    }

    /// Apply the edit form to the active order and close the overlay.
    pub fn submit_edit(&mut self, title: &str, table: &str, column: Column) -> Result<(), BoardError> {
        let (id, card) = self.require_active_card()?;
        let unchanged = read_order(&self.doc, card)
            .is_some_and(|current| current.title == title && current.table == table);
        if !unchanged {
            update_order_text(&mut self.doc, card, title, table)?;
            self.record(BoardChange::OrderUpdated {
                order_id: id.clone(),
                title: title.to_string(),
                table: table.to_string(),
            });
        }
        self.move_to_column(&id, column)?;
        info!(order_id = %id, column = %column, "order edited");
        self.close_edit()
    }

    fn submit_edit_form(&mut self) -> Result<(), BoardError> {
        let edit = self.view.edit;
        let title = self.doc.value(edit.title).unwrap_or_default().to_string();
        let table = self.doc.value(edit.table).unwrap_or_default().to_string();
        let raw = self.doc.value(edit.column).unwrap_or_default().to_string();
        let column = raw
            .parse::<Column>()
            .map_err(|message| BoardError::InvalidColumn { column: raw, message })?;
        self.submit_edit(&title, &table, column)
    }

    /// Remove the active order from the board and close the edit overlay.
    pub fn delete_active(&mut self) -> Result<(), BoardError> {
        let (id, card) = self.require_active_card()?;
        self.doc.remove(card)?;
        self.record(BoardChange::OrderDeleted {
            order_id: id.clone(),
        });
        info!(order_id = %id, "order deleted");
        self.close_edit()
    }

    // ── Column move ──────────────────────────────────────────────────

    /// Put the order's card into `column`. Returns `false` when it was
    /// already there, in which case nothing changes.
    pub fn move_to_column(&mut self, order_id: &str, column: Column) -> Result<bool, BoardError> {
        let card = find_order_element(&self.doc, order_id).ok_or_else(|| {
            BoardError::OrderNotFound {
                id: order_id.to_string(),
            }
        })?;
        let target = self.view.column(column);
        let from = self
            .doc
            .attr(card, ORDER_COLUMN_ATTR)
            .and_then(|c| c.parse::<Column>().ok());
        let parent = self.doc.get(card).and_then(|e| e.parent());

        if from == Some(column) && parent == Some(target) {
            return Ok(false);
        }

        self.doc.append_child(target, card)?;
        self.doc.set_attr(card, ORDER_COLUMN_ATTR, column.as_str())?;
        self.record(BoardChange::OrderMoved {
            order_id: order_id.to_string(),
            from_column: from.unwrap_or(column),
            to_column: column,
        });
        Ok(true)
    }

    // ── Drag and drop ────────────────────────────────────────────────

    /// Capture the order under `target` as the dragged order. Returns
    /// `false` when no order card is on the event path.
    pub fn drag_start(&mut self, target: NodeId) -> Result<bool, BoardError> {
        let Some(card) = closest_order(&self.doc, target) else {
            return Ok(false);
        };
        let Some(id) = self.doc.attr(card, ORDER_ID_ATTR).map(str::to_string) else {
            return Ok(false);
        };
        let previous = self
            .state
            .drag
            .dragged()
            .and_then(|prev| find_order_element(&self.doc, prev));
        if let Some(prev) = previous {
            self.doc.remove_attr(prev, DRAGGING_ATTR)?;
        }
        self.clear_drop_markers()?;
        self.state.drag.start(&id);
        self.doc.set_attr(card, DRAGGING_ATTR, "")?;
        self.record(BoardChange::DragStarted { order_id: id });
        Ok(true)
    }

    /// Mark the drop area on `target`'s event path as the current target.
    /// Returns `false` when the path has no drop area or the area is
    /// already the target; drag state is untouched in both cases.
    pub fn drag_over(&mut self, target: NodeId) -> Result<bool, BoardError> {
        let path = self.doc.ancestors(target);
        let Some(column) = area_on_path(&self.doc, &path) else {
            return Ok(false);
        };
        if !self.state.drag.update_over(column) {
            return Ok(false);
        }
        let areas: Vec<_> = self.view.areas().collect();
        for (area_column, area) in areas {
            if area_column == column {
                self.doc.set_attr(area, DROP_TARGET_ATTR, "true")?;
            } else {
                self.doc.remove_attr(area, DROP_TARGET_ATTR)?;
            }
        }
        self.record(BoardChange::DropTargetChanged { column });
        Ok(true)
    }

    /// Finish the drag: clear the drop target and move the dragged order
    /// into it. Returns the column the order landed in, if any.
    pub fn drag_end(&mut self) -> Result<Option<Column>, BoardError> {
        let resolution = self.state.drag.finish();
        self.clear_drop_markers()?;
        if let Some(card) = resolution
            .order_id
            .as_deref()
            .and_then(|id| find_order_element(&self.doc, id))
        {
            self.doc.remove_attr(card, DRAGGING_ATTR)?;
        }
        self.record(BoardChange::DragEnded {
            order_id: resolution.order_id.clone(),
            column: resolution.column,
        });

        match (resolution.order_id, resolution.column) {
            (Some(id), Some(column)) => {
                self.move_to_column(&id, column)?;
                Ok(Some(column))
            }
            _ => Ok(None),
        }
    }

    fn clear_drop_markers(&mut self) -> Result<(), BoardError> {
        let areas: Vec<_> = self.view.areas().collect();
        for (_, area) in areas {
            self.doc.remove_attr(area, DROP_TARGET_ATTR)?;
        }
        Ok(())
    }

    pub(super) fn submit_form(&mut self, form: NodeId) -> Result<bool, BoardError> {
        if form == self.view.add.form {
            self.submit_add_form()?;
            Ok(true)
        } else if form == self.view.edit.form {
            self.submit_edit_form()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(super) fn set_field(&mut self, target: NodeId, value: &str) -> Result<(), BoardError> {
        self.doc.set_value(target, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn board() -> Result<BoardController> {
        Ok(BoardController::new(BoardSettings::default())?)
    }

    fn board_with(orders: &[(&str, Column)]) -> Result<BoardController> {
        let mut board = board()?;
        for (id, column) in orders {
            board.insert_order(&Order::with_id(*id, format!("Order {id}"), "1", *column))?;
        }
        board.take_changes();
        Ok(board)
    }

    fn count(board: &BoardController, column: Column) -> usize {
        board
            .snapshot()
            .column(column)
            .map(|c| c.orders.len())
            .unwrap_or_default()
    }

    #[test]
    fn test_add_order_lands_in_ordered_column() -> Result<()> {
        let mut board = board()?;
        board.open_add()?;
        let order = board.submit_add("Table 5 Pasta", "5")?;

        let view = board.snapshot();
        let ordered = view.column(Column::Ordered).expect("ordered column");
        assert_eq!(ordered.orders.len(), 1);
        assert_eq!(ordered.orders[0].id, order.id);
        assert_eq!(ordered.orders[0].title, "Table 5 Pasta");
        assert_eq!(ordered.orders[0].table, "5");
        assert!(!board.is_overlay_open(Overlay::Add));
        assert_eq!(board.document().focused(), Some(board.view().other.add));
        Ok(())
    }

    #[test]
    fn test_added_orders_have_unique_non_empty_ids() -> Result<()> {
        let mut board = board()?;
        let mut ids = std::collections::HashSet::new();
        for i in 0..20 {
            let order = board.submit_add(&format!("Dish {i}"), "1")?;
            assert!(!order.id.is_empty());
            assert!(ids.insert(order.id));
        }
        assert_eq!(board.snapshot().order_count(), 20);
        Ok(())
    }

    #[test]
    fn test_add_accepts_empty_values() -> Result<()> {
        let mut board = board()?;
        let order = board.submit_add("", "")?;
        assert_eq!(board.snapshot().column_of(&order.id), Some(Column::Ordered));
        Ok(())
    }

    #[test]
    fn test_add_uses_configured_initial_column() -> Result<()> {
        let mut board = BoardController::new(BoardSettings {
            initial_column: Column::Preparing,
            ..BoardSettings::default()
        })?;
        let order = board.submit_add("Tea", "4")?;
        assert_eq!(board.snapshot().column_of(&order.id), Some(Column::Preparing));
        Ok(())
    }

    #[test]
    fn test_close_add_clears_fields() -> Result<()> {
        let mut board = board()?;
        board.open_add()?;
        let add = board.view().add;
        board.set_field(add.title, "half typed")?;
        board.close_add()?;
        assert_eq!(board.document().value(add.title), Some(""));
        assert!(!board.is_overlay_open(Overlay::Add));
        Ok(())
    }

    #[test]
    fn test_insert_duplicate_id_is_rejected() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ordered)])?;
        let err = board
            .insert_order(&Order::with_id("42", "Again", "1", Column::Ready))
            .unwrap_err();
        assert!(matches!(err, BoardError::DuplicateOrder { .. }));
        assert_eq!(board.snapshot().order_count(), 1);
        Ok(())
    }

    #[test]
    fn test_insert_empty_id_is_rejected() -> Result<()> {
        let mut board = board()?;
        let err = board
            .insert_order(&Order::with_id("", "Nameless", "1", Column::Ordered))
            .unwrap_err();
        assert!(matches!(err, BoardError::EmptyOrderId));
        assert_eq!(board.snapshot().order_count(), 0);
        assert!(board.changes().is_empty());
        Ok(())
    }

    #[test]
    fn test_open_edit_prefills_form() -> Result<()> {
        let mut board = board_with(&[("42", Column::Preparing)])?;
        board.open_edit("42")?;
        let edit = board.view().edit;
        assert_eq!(board.document().value(edit.title), Some("Order 42"));
        assert_eq!(board.document().value(edit.table), Some("1"));
        assert_eq!(board.document().value(edit.column), Some("preparing"));
        assert_eq!(board.active_order(), Some("42"));
        assert!(board.is_overlay_open(Overlay::Edit));
        assert_eq!(board.document().focused(), Some(edit.title));
        Ok(())
    }

    #[test]
    fn test_open_edit_unknown_order_is_guarded() -> Result<()> {
        let mut board = board()?;
        let err = board.open_edit("nope").unwrap_err();
        assert!(matches!(err, BoardError::OrderNotFound { .. }));
        assert!(!board.is_overlay_open(Overlay::Edit));
        assert_eq!(board.active_order(), None);
        Ok(())
    }

    #[test]
    fn test_edit_relocates_and_rewrites_order() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ordered), ("43", Column::Ordered)])?;
        board.open_edit("42")?;
        board.submit_edit("Pasta, no cheese", "7", Column::Ready)?;

        let view = board.snapshot();
        assert_eq!(view.column_of("42"), Some(Column::Ready));
        let ready = view.column(Column::Ready).expect("ready column");
        assert_eq!(ready.orders[0].title, "Pasta, no cheese");
        assert_eq!(ready.orders[0].table, "7");
        assert_eq!(view.column(Column::Ordered).map(|c| c.orders.len()), Some(1));
        let card = find_order_element(board.document(), "42").expect("card");
        assert_eq!(board.document().attr(card, "data-column"), Some("ready"));
        assert_eq!(board.active_order(), None);
        assert!(!board.is_overlay_open(Overlay::Edit));
        Ok(())
    }

    #[test]
    fn test_close_edit_clears_active_order() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ordered)])?;
        board.open_edit("42")?;
        board.close_edit()?;
        assert_eq!(board.active_order(), None);
        assert_eq!(board.document().value(board.view().edit.title), Some(""));
        let err = board.delete_active().unwrap_err();
        assert!(matches!(err, BoardError::NoActiveOrder));
        assert_eq!(board.snapshot().order_count(), 1);
        Ok(())
    }

    #[test]
    fn test_stale_active_order_is_guarded() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ordered)])?;
        board.open_edit("42")?;
        let card = find_order_element(board.document(), "42").expect("card");
        board.doc.remove(card)?;

        let err = board.submit_edit("x", "y", Column::Ready).unwrap_err();
        assert!(matches!(err, BoardError::OrderNotFound { ref id } if id == "42"));
        let err = board.delete_active().unwrap_err();
        assert!(err.is_stale_reference());
        assert_eq!(board.snapshot().order_count(), 0);
        Ok(())
    }

    #[test]
    fn test_delete_removes_card() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ready)])?;
        board.open_edit("42")?;
        board.delete_active()?;
        assert!(board.document().query_attr(board.document().root(), "data-id", Some("42")).is_none());
        assert!(!board.is_overlay_open(Overlay::Edit));
        assert_eq!(board.document().focused(), Some(board.view().other.add));
        assert!(board
            .changes()
            .contains(&BoardChange::OrderDeleted { order_id: "42".into() }));
        Ok(())
    }

    #[test]
    fn test_move_to_same_column_is_idempotent() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ready), ("2", Column::Ready)])?;
        let before = board.snapshot();
        assert!(!board.move_to_column("1", Column::Ready)?);
        let after = board.snapshot();
        let ids = |v: &BoardView| -> Vec<String> {
            v.column(Column::Ready)
                .map(|c| c.orders.iter().map(|o| o.id.clone()).collect())
                .unwrap_or_default()
        };
        assert_eq!(ids(&before), ids(&after));
        assert!(board.changes().is_empty());
        Ok(())
    }

    #[test]
    fn test_move_unknown_order_errors() -> Result<()> {
        let mut board = board()?;
        let err = board.move_to_column("ghost", Column::Ready).unwrap_err();
        assert!(matches!(err, BoardError::OrderNotFound { .. }));
        Ok(())
    }

    #[test]
    fn test_drag_round_trip_restores_membership() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ordered)])?;
        let card = find_order_element(board.document(), "1").expect("card");

        board.drag_start(card)?;
        board.drag_over(board.view().column(Column::Preparing))?;
        assert_eq!(board.drag_end()?, Some(Column::Preparing));
        assert_eq!(board.snapshot().column_of("1"), Some(Column::Preparing));

        board.drag_start(card)?;
        board.drag_over(board.view().area(Column::Ordered))?;
        assert_eq!(board.drag_end()?, Some(Column::Ordered));

        let view = board.snapshot();
        assert_eq!(view.column_of("1"), Some(Column::Ordered));
        assert_eq!(view.order_count(), 1);
        assert_eq!(count(&board, Column::Preparing), 0);
        Ok(())
    }

    #[test]
    fn test_drag_over_without_area_leaves_state() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ordered)])?;
        let card = find_order_element(board.document(), "1").expect("card");
        board.drag_start(card)?;
        let before = board.state().drag.clone();
        assert!(!board.drag_over(board.view().other.help)?);
        assert!(!board.drag_over(board.document().root())?);
        assert_eq!(board.state().drag, before);
        Ok(())
    }

    #[test]
    fn test_drag_over_marks_single_area() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ordered)])?;
        let card = find_order_element(board.document(), "1").expect("card");
        board.drag_start(card)?;
        assert!(board.drag_over(board.view().column(Column::Ready))?);
        assert!(!board.drag_over(board.view().column(Column::Ready))?);
        assert!(board.drag_over(board.view().column(Column::Delivered))?);

        let marked: Vec<_> = board
            .view()
            .areas()
            .filter(|(_, area)| board.document().attr(*area, "data-drop-target").is_some())
            .map(|(column, _)| column)
            .collect();
        assert_eq!(marked, vec![Column::Delivered]);
        Ok(())
    }

    #[test]
    fn test_drag_end_without_target_is_noop() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ordered)])?;
        let card = find_order_element(board.document(), "1").expect("card");
        board.drag_start(card)?;
        assert_eq!(board.drag_end()?, None);
        assert_eq!(board.snapshot().column_of("1"), Some(Column::Ordered));
        assert_eq!(board.document().attr(card, "data-dragging"), None);
        Ok(())
    }

    #[test]
    fn test_drag_end_clears_visual_marker() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ordered)])?;
        let card = find_order_element(board.document(), "1").expect("card");
        board.drag_start(card)?;
        board.drag_over(board.view().column(Column::Ready))?;
        board.drag_end()?;
        for (_, area) in board.view().areas() {
            assert_eq!(board.document().attr(area, "data-drop-target"), None);
        }
        assert_eq!(board.state().drag.drop_target(), None);
        Ok(())
    }

    #[test]
    fn test_hover_before_dragstart_does_not_pick_column() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ordered)])?;
        let card = find_order_element(board.document(), "1").expect("card");

        assert!(board.drag_over(board.view().column(Column::Ready))?);
        board.drag_start(card)?;
        for (_, area) in board.view().areas() {
            assert_eq!(board.document().attr(area, "data-drop-target"), None);
        }
        assert_eq!(board.drag_end()?, None);
        assert_eq!(board.snapshot().column_of("1"), Some(Column::Ordered));
        Ok(())
    }

    #[test]
    fn test_second_dragstart_moves_dragging_marker() -> Result<()> {
        let mut board = board_with(&[("1", Column::Ordered), ("2", Column::Ordered)])?;
        let first = find_order_element(board.document(), "1").expect("card 1");
        let second = find_order_element(board.document(), "2").expect("card 2");

        board.drag_start(first)?;
        board.drag_start(second)?;
        assert_eq!(board.document().attr(first, "data-dragging"), None);
        assert_eq!(board.document().attr(second, "data-dragging"), Some(""));
        assert_eq!(board.state().drag.dragged(), Some("2"));

        board.drag_end()?;
        assert_eq!(board.document().attr(first, "data-dragging"), None);
        assert_eq!(board.document().attr(second, "data-dragging"), None);
        Ok(())
    }

    #[test]
    fn test_edit_with_same_text_records_no_update() -> Result<()> {
        let mut board = board_with(&[("42", Column::Ordered)])?;
        board.open_edit("42")?;
        board.submit_edit("Order 42", "1", Column::Ordered)?;
        assert!(!board
            .changes()
            .iter()
            .any(|c| matches!(c, BoardChange::OrderUpdated { .. } | BoardChange::OrderMoved { .. })));
        assert!(!board.is_overlay_open(Overlay::Edit));

        board.open_edit("42")?;
        board.submit_edit("Order 42", "3", Column::Ordered)?;
        assert!(board.changes().contains(&BoardChange::OrderUpdated {
            order_id: "42".into(),
            title: "Order 42".into(),
            table: "3".into(),
        }));
        Ok(())
    }

    #[test]
    fn test_help_open_close_returns_focus() -> Result<()> {
        let mut board = board()?;
        board.open_help()?;
        assert!(board.is_overlay_open(Overlay::Help));
        board.close_help()?;
        assert!(!board.is_overlay_open(Overlay::Help));
        assert_eq!(board.document().focused(), Some(board.view().other.add));
        Ok(())
    }

    #[test]
    fn test_on_load_focuses_add_trigger() -> Result<()> {
        let mut board = board()?;
        board.on_load()?;
        assert_eq!(board.document().focused(), Some(board.view().other.add));

        let mut quiet = BoardController::new(BoardSettings {
            focus_add_on_load: false,
            ..BoardSettings::default()
        })?;
        quiet.on_load()?;
        assert_eq!(quiet.document().focused(), None);
        Ok(())
    }
}
