//! In-memory document model the board handlers mutate.
//!
//! Elements live in an arena indexed by [`NodeId`]. Removing an element
//! frees its whole subtree, so a `NodeId` held across a removal resolves to
//! nothing and every accessor reports that instead of panicking. Freed
//! slots are reused; each slot carries a generation that a `NodeId` must
//! match, so a reused slot never answers for an old id.
//!
//! Drop areas carry a typed [`Column`] capability (`area`) next to their
//! `data-area` attribute; ancestor walks check the typed field.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::models::Column;
use crate::errors::BoardError;

const VOID_TAGS: [&str; 3] = ["input", "br", "hr"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    text: Option<String>,
    value: String,
    hidden: bool,
    area: Option<Column>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn area(&self) -> Option<Column> {
        self.area
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let body = Element {
            tag: "body".to_string(),
            ..Element::default()
        };
        Self {
            nodes: vec![Slot {
                generation: 0,
                element: Some(body),
            }],
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
            focused: None,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Element, BoardError> {
        self.nodes
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
            .ok_or(BoardError::StaleNode { index: id.index })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let element = Element {
            tag: tag.to_string(),
            ..Element::default()
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.nodes[index];
                slot.element = Some(element);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.nodes.push(Slot {
                    generation: 0,
                    element: Some(element),
                });
                NodeId {
                    index: self.nodes.len() - 1,
                    generation: 0,
                }
            }
        }
    }

    /// Create an element with attributes and append it under `parent`.
    pub fn element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, BoardError> {
        let id = self.create_element(tag);
        for (name, value) in attrs {
            self.set_attr(id, name, value)?;
        }
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), BoardError> {
        if !self.contains(parent) {
            return Err(BoardError::StaleNode { index: parent.index });
        }
        self.detach(child)?;
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> Result<(), BoardError> {
        let old_parent = self.get_mut(id)?.parent.take();
        if let Some(parent) = old_parent {
            self.get_mut(parent)?.children.retain(|c| *c != id);
        }
        Ok(())
    }

    /// Remove an element and its subtree from the document.
    pub fn remove(&mut self, id: NodeId) -> Result<(), BoardError> {
        if id == self.root {
            return Err(BoardError::StaleNode { index: id.index });
        }
        self.detach(id)?;
        for node in self.descendants(id) {
            if self.focused == Some(node) {
                self.focused = None;
            }
            let slot = &mut self.nodes[node.index];
            slot.element = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node.index);
        }
        Ok(())
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), BoardError> {
        self.get_mut(id)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Result<(), BoardError> {
        self.get_mut(id)?.attrs.remove(name);
        Ok(())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|e| e.attr(name))
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), BoardError> {
        self.get_mut(id)?.text = Some(text.to_string());
        Ok(())
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Element::text)
    }

    pub fn set_value(&mut self, id: NodeId, value: &str) -> Result<(), BoardError> {
        self.get_mut(id)?.value = value.to_string();
        Ok(())
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(Element::value)
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) -> Result<(), BoardError> {
        self.get_mut(id)?.hidden = hidden;
        Ok(())
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Element::is_hidden)
    }

    pub fn set_area(&mut self, id: NodeId, column: Column) -> Result<(), BoardError> {
        let element = self.get_mut(id)?;
        element.area = Some(column);
        element
            .attrs
            .insert("data-area".to_string(), column.as_str().to_string());
        Ok(())
    }

    pub fn focus(&mut self, id: NodeId) -> Result<(), BoardError> {
        if !self.contains(id) {
            return Err(BoardError::StaleNode { index: id.index });
        }
        self.focused = Some(id);
        Ok(())
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// The event path for `id`: the element itself followed by each
    /// ancestor up to the root. Empty for a stale id.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(id).map(|_| id);
        while let Some(node) = current {
            path.push(node);
            current = self.get(node).and_then(Element::parent);
        }
        path
    }

    /// `id` and everything below it, in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            let Some(element) = self.get(node) else {
                continue;
            };
            out.push(node);
            stack.extend(element.children.iter().rev().copied());
        }
        out
    }

    /// Nearest element on the path from `id` to the root matching `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.ancestors(id)
            .into_iter()
            .find(|node| self.get(*node).is_some_and(&pred))
    }

    /// First element under `scope` (inclusive) carrying `name`, optionally
    /// with an exact value.
    pub fn query_attr(&self, scope: NodeId, name: &str, value: Option<&str>) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|node| {
            self.attr(*node, name)
                .is_some_and(|v| value.is_none_or(|want| v == want))
        })
    }

    pub fn query_all_attr(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.attr(*node, name).is_some())
            .collect()
    }

    /// Serialize `id` and its subtree as HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, 0, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(element) = self.get(id) else {
            return;
        };
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", element.tag);
        for (name, value) in &element.attrs {
            if value.is_empty() {
                let _ = write!(out, " {name}");
            } else {
                let _ = write!(out, " {name}=\"{}\"", escape_html(value));
            }
        }
        if element.tag == "input" && !element.value.is_empty() {
            let _ = write!(out, " value=\"{}\"", escape_html(&element.value));
        }
        if element.tag == "option" && self.option_selected(element) {
            out.push_str(" selected");
        }
        if element.hidden {
            out.push_str(" hidden");
        }
        out.push('>');

        if VOID_TAGS.contains(&element.tag.as_str()) {
            out.push('\n');
            return;
        }

        let text = element.text.as_deref().map(escape_html).unwrap_or_default();
        if element.children.is_empty() {
            let _ = writeln!(out, "{text}</{}>", element.tag);
            return;
        }

        out.push('\n');
        if !text.is_empty() {
            let _ = writeln!(out, "{indent}  {text}");
        }
        for child in &element.children {
            self.write_html(*child, depth + 1, out);
        }
        let _ = writeln!(out, "{indent}</{}>", element.tag);
    }

    fn option_selected(&self, option: &Element) -> bool {
        let select = option.parent.and_then(|p| self.get(p));
        match (select, option.attr("value")) {
            (Some(select), Some(value)) => select.tag == "select" && select.value == value,
            _ => false,
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
