//! View bindings: cached handles to the elements every handler touches.
//!
//! [`ViewBindings::mount`] builds the board skeleton into an empty
//! document; [`ViewBindings::resolve`] looks the same elements up again by
//! their data attributes and fails with [`BoardError::MissingElement`] when
//! one is absent.

use std::collections::BTreeMap;

use super::dom::{Document, NodeId};
use super::models::Column;
use crate::errors::BoardError;

#[derive(Debug, Clone, Copy)]
pub struct AddBindings {
    pub overlay: NodeId,
    pub form: NodeId,
    pub title: NodeId,
    pub table: NodeId,
    pub cancel: NodeId,
}

#[derive(Debug, Clone, Copy)]
pub struct EditBindings {
    pub overlay: NodeId,
    pub form: NodeId,
    pub title: NodeId,
    pub table: NodeId,
    pub column: NodeId,
    pub delete: NodeId,
    pub cancel: NodeId,
}

#[derive(Debug, Clone, Copy)]
pub struct HelpBindings {
    pub overlay: NodeId,
    pub cancel: NodeId,
    pub close: NodeId,
}

/// Controls outside the overlays.
#[derive(Debug, Clone, Copy)]
pub struct OtherBindings {
    pub add: NodeId,
    pub help: NodeId,
    pub grid: NodeId,
}

#[derive(Debug, Clone)]
pub struct ViewBindings {
    columns: BTreeMap<Column, NodeId>,
    areas: BTreeMap<Column, NodeId>,
    pub add: AddBindings,
    pub edit: EditBindings,
    pub help: HelpBindings,
    pub other: OtherBindings,
}

impl ViewBindings {
    /// Build the board skeleton under the document root and bind it.
    pub fn mount(
        doc: &mut Document,
        title: &str,
        label: impl Fn(Column) -> String,
    ) -> Result<Self, BoardError> {
        let root = doc.root();

        let header = doc.element(root, "header", &[("class", "header")])?;
        let heading = doc.element(header, "h1", &[("class", "header__title")])?;
        doc.set_text(heading, title)?;
        let help = doc.element(header, "button", &[("data-button-help", "")])?;
        doc.set_text(help, "?")?;
        let add = doc.element(header, "button", &[("data-button-add", "")])?;
        doc.set_text(add, "Add Order")?;

        let grid = doc.element(root, "main", &[("class", "grid"), ("data-grid", "")])?;
        for column in Column::ALL {
            let area = doc.element(grid, "section", &[("class", "grid__column")])?;
            doc.set_area(area, column)?;
            let name = doc.element(area, "h2", &[("class", "grid__name")])?;
            doc.set_text(name, &label(column))?;
            doc.element(
                area,
                "div",
                &[("class", "grid__content"), ("data-column-list", column.as_str())],
            )?;
        }

        mount_add_overlay(doc)?;
        mount_edit_overlay(doc, &label)?;
        mount_help_overlay(doc)?;

        Self::resolve(doc)
    }

    /// Look up every bound element by its data attribute.
    pub fn resolve(doc: &Document) -> Result<Self, BoardError> {
        let mut columns = BTreeMap::new();
        let mut areas = BTreeMap::new();
        for column in Column::ALL {
            let list = require_value(doc, "data-column-list", column.as_str())?;
            let area = require_value(doc, "data-area", column.as_str())?;
            if doc.get(area).and_then(|e| e.area()) != Some(column) {
                return Err(BoardError::MissingElement {
                    selector: format!("data-area=\"{}\" (typed area)", column),
                });
            }
            columns.insert(column, list);
            areas.insert(column, area);
        }

        Ok(Self {
            columns,
            areas,
            add: AddBindings {
                overlay: require(doc, "data-add-overlay")?,
                form: require(doc, "data-add-form")?,
                title: require(doc, "data-add-title")?,
                table: require(doc, "data-add-table")?,
                cancel: require(doc, "data-add-cancel")?,
            },
            edit: EditBindings {
                overlay: require(doc, "data-edit-overlay")?,
                form: require(doc, "data-edit-form")?,
                title: require(doc, "data-edit-title")?,
                table: require(doc, "data-edit-table")?,
                column: require(doc, "data-edit-column")?,
                delete: require(doc, "data-edit-delete")?,
                cancel: require(doc, "data-edit-cancel")?,
            },
            help: HelpBindings {
                overlay: require(doc, "data-help-overlay")?,
                cancel: require(doc, "data-help-cancel")?,
                close: require(doc, "data-help-close")?,
            },
            other: OtherBindings {
                add: require(doc, "data-button-add")?,
                help: require(doc, "data-button-help")?,
                grid: require(doc, "data-grid")?,
            },
        })
    }

    /// Container that order cards of `column` are appended to.
    pub fn column(&self, column: Column) -> NodeId {
        self.columns[&column]
    }

    pub fn area(&self, column: Column) -> NodeId {
        self.areas[&column]
    }

    pub fn columns(&self) -> impl Iterator<Item = (Column, NodeId)> + '_ {
        self.columns.iter().map(|(c, n)| (*c, *n))
    }

    pub fn areas(&self) -> impl Iterator<Item = (Column, NodeId)> + '_ {
        self.areas.iter().map(|(c, n)| (*c, *n))
    }

    pub fn is_column(&self, node: NodeId) -> bool {
        self.columns.values().any(|n| *n == node)
    }

    pub fn is_area(&self, node: NodeId) -> bool {
        self.areas.values().any(|n| *n == node)
    }
}

fn require(doc: &Document, attr: &str) -> Result<NodeId, BoardError> {
    doc.query_attr(doc.root(), attr, None)
        .ok_or_else(|| BoardError::MissingElement {
            selector: attr.to_string(),
        })
}

fn require_value(doc: &Document, attr: &str, value: &str) -> Result<NodeId, BoardError> {
    doc.query_attr(doc.root(), attr, Some(value))
        .ok_or_else(|| BoardError::MissingElement {
            selector: format!("{attr}=\"{value}\""),
        })
}

fn mount_add_overlay(doc: &mut Document) -> Result<(), BoardError> {
    let root = doc.root();
    let overlay = doc.element(root, "dialog", &[("class", "overlay"), ("data-add-overlay", "")])?;
    doc.set_hidden(overlay, true)?;
    let form = doc.element(overlay, "form", &[("class", "overlay__form"), ("data-add-form", "")])?;
    text_field(doc, form, "Title", "data-add-title")?;
    text_field(doc, form, "Table", "data-add-table")?;
    let cancel = doc.element(form, "button", &[("type", "button"), ("data-add-cancel", "")])?;
    doc.set_text(cancel, "Cancel")?;
    let submit = doc.element(form, "button", &[("type", "submit")])?;
    doc.set_text(submit, "Add")?;
    Ok(())
}

fn mount_edit_overlay(
    doc: &mut Document,
    label: &impl Fn(Column) -> String,
) -> Result<(), BoardError> {
    let root = doc.root();
    let overlay = doc.element(root, "dialog", &[("class", "overlay"), ("data-edit-overlay", "")])?;
    doc.set_hidden(overlay, true)?;
    let form = doc.element(overlay, "form", &[("class", "overlay__form"), ("data-edit-form", "")])?;
    text_field(doc, form, "Title", "data-edit-title")?;
    text_field(doc, form, "Table", "data-edit-table")?;

    let field = doc.element(form, "label", &[("class", "overlay__field")])?;
    doc.set_text(field, "Status")?;
    let select = doc.element(field, "select", &[("data-edit-column", "")])?;
    for column in Column::ALL {
        let option = doc.element(select, "option", &[("value", column.as_str())])?;
        doc.set_text(option, &label(column))?;
    }

    let delete = doc.element(form, "button", &[("type", "button"), ("data-edit-delete", "")])?;
    doc.set_text(delete, "Delete")?;
    let cancel = doc.element(form, "button", &[("type", "button"), ("data-edit-cancel", "")])?;
    doc.set_text(cancel, "Cancel")?;
    let submit = doc.element(form, "button", &[("type", "submit")])?;
    doc.set_text(submit, "Update")?;
    Ok(())
}

fn mount_help_overlay(doc: &mut Document) -> Result<(), BoardError> {
    let root = doc.root();
    let overlay = doc.element(root, "dialog", &[("class", "overlay"), ("data-help-overlay", "")])?;
    doc.set_hidden(overlay, true)?;
    let body = doc.element(overlay, "div", &[("class", "overlay__content")])?;
    for line in [
        "Use \"Add Order\" to put a new order in the first column.",
        "Click an order to edit or delete it.",
        "Drag an order onto another column to change its status.",
    ] {
        let p = doc.element(body, "p", &[])?;
        doc.set_text(p, line)?;
    }
    let cancel = doc.element(overlay, "button", &[("type", "button"), ("data-help-cancel", "")])?;
    doc.set_text(cancel, "Cancel")?;
    let close = doc.element(overlay, "button", &[("type", "button"), ("data-help-close", "")])?;
    doc.set_text(close, "Close")?;
    Ok(())
}

fn text_field(doc: &mut Document, form: NodeId, caption: &str, marker: &str) -> Result<NodeId, BoardError> {
    let field = doc.element(form, "label", &[("class", "overlay__field")])?;
    doc.set_text(field, caption)?;
    doc.element(field, "input", &[("type", "text"), (marker, "")])
}
