//! Document tree management
//!
//! A [`Document`] owns every node in a slotmap and tracks parent/child links,
//! an `id` attribute index, element geometry and keyboard focus. It stands in
//! for the browser DOM: hosts build the markup, widgets query and mutate it.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::error::{DomError, Result};
use crate::registry::IdIndex;

new_key_type! {
    /// Unique identifier for a document node
    pub struct NodeId;
}

/// Axis-aligned box in viewport coordinates (logical pixels)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.y
    }
}

/// A single element in the document
#[derive(Clone, Debug, Default)]
pub struct Node {
    tag: String,
    classes: SmallVec<[String; 4]>,
    attrs: FxHashMap<String, String>,
    /// Text owned directly by this node (descendant text is not included)
    text: String,
    /// Live form value (inputs)
    value: String,
    /// Live checked state (checkboxes)
    checked: bool,
    /// Display toggled off via `hide()`
    hidden: bool,
    /// Inline style overrides (e.g. `top`, `max-height`)
    style: FxHashMap<String, String>,
    bounds: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// `data-*` attribute lookup (`data("name")` reads `data-name`)
    pub fn data(&self, key: &str) -> Option<&str> {
        self.attrs.get(&format!("data-{key}")).map(String::as_str)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// `<input type="checkbox">`
    pub fn is_checkbox(&self) -> bool {
        self.tag == "input" && self.attr("type") == Some("checkbox")
    }
}

/// Headless document: node storage, tree links, id index, viewport and focus
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    ids: IdIndex,
    viewport: (f32, f32),
    focused: Option<NodeId>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("ids", &self.ids.len())
            .field("viewport", &self.viewport)
            .field("focused", &self.focused)
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with an `<html>` root and a 1024x768 viewport
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new("html"));
        Self {
            nodes,
            root,
            ids: IdIndex::new(),
            viewport: (1024.0, 768.0),
            focused: None,
        }
    }

    /// The document root (`<html>`)
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(DomError::UnknownNode(id))
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Viewport & Focus
    // =========================================================================

    /// Viewport size (width, height) in logical pixels
    pub fn viewport(&self) -> (f32, f32) {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = (width, height);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn focus(&mut self, id: NodeId) {
        if self.exists(id) {
            self.focused = Some(id);
        }
    }

    // =========================================================================
    // Creation & Structure
    // =========================================================================

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insertable(child, parent)?;
        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Move `node` so it becomes the previous sibling of `reference`
    pub fn insert_before(&mut self, node: NodeId, reference: NodeId) -> Result<()> {
        self.insert_adjacent(node, reference, 0)
    }

    /// Move `node` so it becomes the next sibling of `reference`
    pub fn insert_after(&mut self, node: NodeId, reference: NodeId) -> Result<()> {
        self.insert_adjacent(node, reference, 1)
    }

    fn insert_adjacent(&mut self, node: NodeId, reference: NodeId, offset: usize) -> Result<()> {
        if node == reference {
            return Ok(());
        }
        let parent = self
            .node(reference)
            .ok_or(DomError::UnknownNode(reference))?
            .parent
            .ok_or(DomError::Detached(reference))?;
        self.check_insertable(node, parent)?;
        self.detach(node)?;

        let siblings = &mut self.node_mut(parent)?.children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .map(|i| i + offset)
            .unwrap_or(siblings.len());
        siblings.insert(index, node);
        self.node_mut(node)?.parent = Some(parent);
        Ok(())
    }

    fn check_insertable(&self, node: NodeId, parent: NodeId) -> Result<()> {
        if !self.exists(node) {
            return Err(DomError::UnknownNode(node));
        }
        if !self.exists(parent) {
            return Err(DomError::UnknownNode(parent));
        }
        if self.contains(node, parent) {
            return Err(DomError::Cycle { node, parent });
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping its subtree alive
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self.node(id).ok_or(DomError::UnknownNode(id))?.parent;
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.retain(|&c| c != id);
            self.node_mut(id)?.parent = None;
        }
        Ok(())
    }

    /// Remove a node and its whole subtree from the document
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            tracing::warn!("Refusing to remove the document root");
            return Ok(());
        }
        self.detach(id)?;
        for node in self.descendants_inclusive(id) {
            self.ids.unregister(node);
            if self.focused == Some(node) {
                self.focused = None;
            }
            self.nodes.remove(node);
        }
        Ok(())
    }

    /// Deep-clone a subtree into a new detached subtree
    ///
    /// `id` attributes are not carried over so the clone never shadows the
    /// original in the id index.
    pub fn clone_subtree(&mut self, id: NodeId) -> Result<NodeId> {
        let source = self.node(id).ok_or(DomError::UnknownNode(id))?;
        let mut copy = source.clone();
        let children = std::mem::take(&mut copy.children);
        copy.parent = None;
        copy.attrs.remove("id");
        let new_id = self.nodes.insert(copy);

        for child in children {
            let child_copy = self.clone_subtree(child)?;
            self.node_mut(child_copy)?.parent = Some(new_id);
            self.node_mut(new_id)?.children.push(child_copy);
        }
        Ok(new_id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Immediate parent up to the root
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            result.push(parent);
            current = parent;
        }
        result
    }

    /// `true` when `node` is `ancestor` or lies inside its subtree
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).contains(&ancestor)
    }

    /// `true` when the node is reachable from the document root
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.exists(id) && self.contains(self.root, id)
    }

    /// Pre-order walk of `id` and every node below it
    pub fn descendants_inclusive(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.exists(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    // =========================================================================
    // Ids, Classes & Attributes
    // =========================================================================

    /// Look up an attached element by its `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).filter(|&node| self.is_attached(node))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        if !node.has_class(class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.node_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attr(name)
    }

    /// Set an attribute; `id` keeps the id index current
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        self.node_mut(id)?
            .attrs
            .insert(name.to_string(), value.clone());
        if name == "id" {
            self.ids.register(value, id);
        }
        Ok(())
    }

    /// `data-*` attribute lookup
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.node(id)?.data(key)
    }

    // =========================================================================
    // Text, Values & Checked State
    // =========================================================================

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.text = text.into();
        Ok(())
    }

    /// Concatenated text of the node and its descendants in document order
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants_inclusive(id)
            .into_iter()
            .filter_map(|n| self.node(n))
            .map(|n| n.text.as_str())
            .collect()
    }

    /// Replace every occurrence of `from` with `to` in the subtree's text and
    /// attribute values
    pub fn replace_text(&mut self, id: NodeId, from: &str, to: &str) -> Result<()> {
        if from.is_empty() {
            return Ok(());
        }
        for node in self.descendants_inclusive(id) {
            let node = self.node_mut(node)?;
            if node.text.contains(from) {
                node.text = node.text.replace(from, to);
            }
            for value in node.attrs.values_mut() {
                if value.contains(from) {
                    *value = value.replace(from, to);
                }
            }
        }
        Ok(())
    }

    pub fn value(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> Result<()> {
        self.node_mut(id)?.value = value.into();
        Ok(())
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.checked)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> Result<()> {
        self.node_mut(id)?.checked = checked;
        Ok(())
    }

    // =========================================================================
    // Display, Style & Geometry
    // =========================================================================

    pub fn show(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.hidden = false;
        Ok(())
    }

    pub fn hide(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.hidden = true;
        Ok(())
    }

    pub fn set_shown(&mut self, id: NodeId, shown: bool) -> Result<()> {
        self.node_mut(id)?.hidden = !shown;
        Ok(())
    }

    /// Visible when neither the node nor any ancestor is hidden
    pub fn is_visible(&self, id: NodeId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        !node.hidden
            && self
                .ancestors(id)
                .iter()
                .all(|&a| self.node(a).is_some_and(|n| !n.hidden))
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id)?.style(property)
    }

    /// Set (`Some`) or clear (`None`) an inline style property
    pub fn set_style(&mut self, id: NodeId, property: &str, value: Option<String>) -> Result<()> {
        let node = self.node_mut(id)?;
        match value {
            Some(v) => {
                node.style.insert(property.to_string(), v);
            }
            None => {
                node.style.remove(property);
            }
        }
        Ok(())
    }

    pub fn bounds(&self, id: NodeId) -> Rect {
        self.node(id).map(|n| n.bounds).unwrap_or_default()
    }

    /// Record the laid-out box of a node (supplied by the host's layout pass)
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> Result<()> {
        self.node_mut(id)?.bounds = bounds;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(doc: &mut Document) -> (NodeId, Vec<NodeId>) {
        let ul = doc.create_element("ul");
        doc.append_child(doc.root(), ul).unwrap();
        let items: Vec<_> = (0..3)
            .map(|i| {
                let li = doc.create_element("li");
                doc.set_text(li, format!("item{i}")).unwrap();
                doc.append_child(ul, li).unwrap();
                li
            })
            .collect();
        (ul, items)
    }

    #[test]
    fn test_insert_before_and_after() {
        let mut doc = Document::new();
        let (ul, items) = list(&mut doc);

        doc.insert_before(items[2], items[0]).unwrap();
        assert_eq!(doc.children(ul), &[items[2], items[0], items[1]]);

        doc.insert_after(items[2], items[1]).unwrap();
        assert_eq!(doc.children(ul), &[items[0], items[1], items[2]]);
    }

    #[test]
    fn test_insert_next_to_detached_reference_fails() {
        let mut doc = Document::new();
        let (_, items) = list(&mut doc);
        let loose = doc.create_element("li");

        assert_eq!(
            doc.insert_before(items[0], loose),
            Err(DomError::Detached(loose))
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let mut doc = Document::new();
        let (ul, items) = list(&mut doc);

        assert_eq!(
            doc.append_child(items[0], ul),
            Err(DomError::Cycle {
                node: ul,
                parent: items[0]
            })
        );
    }

    #[test]
    fn test_remove_drops_subtree_and_ids() {
        let mut doc = Document::new();
        let (ul, items) = list(&mut doc);
        doc.set_attr(items[1], "id", "second").unwrap();
        assert_eq!(doc.get_element_by_id("second"), Some(items[1]));

        doc.remove(ul).unwrap();
        assert!(!doc.exists(items[1]));
        assert_eq!(doc.get_element_by_id("second"), None);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_set_id_on_removed_node_leaves_index_untouched() {
        let mut doc = Document::new();
        let (ul, items) = list(&mut doc);
        doc.set_attr(items[0], "id", "first").unwrap();
        doc.remove(ul).unwrap();

        assert_eq!(
            doc.set_attr(items[1], "id", "second"),
            Err(DomError::UnknownNode(items[1]))
        );
        assert!(!doc.ids.contains("second"));
        assert!(!doc.ids.contains("first"));
        assert_eq!(doc.ids.len(), 0);
    }

    #[test]
    fn test_detached_ids_not_found() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attr(div, "id", "floating").unwrap();
        assert_eq!(doc.get_element_by_id("floating"), None);

        doc.append_child(doc.root(), div).unwrap();
        assert_eq!(doc.get_element_by_id("floating"), Some(div));
    }

    #[test]
    fn test_clone_subtree_is_deep_and_detached() {
        let mut doc = Document::new();
        let (ul, items) = list(&mut doc);
        doc.set_attr(ul, "id", "menu").unwrap();

        let copy = doc.clone_subtree(ul).unwrap();
        assert_eq!(doc.parent(copy), None);
        assert_eq!(doc.children(copy).len(), items.len());
        assert_eq!(doc.text_content(copy), "item0item1item2");
        assert_eq!(doc.attr(copy, "id"), None);
        assert_eq!(doc.get_element_by_id("menu"), Some(ul));
    }

    #[test]
    fn test_replace_text_in_subtree() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let span = doc.create_element("span");
        doc.append_child(div, span).unwrap();
        doc.set_text(span, "xxx").unwrap();
        doc.set_attr(span, "title", "remove xxx").unwrap();

        doc.replace_text(div, "xxx", "Red").unwrap();
        assert_eq!(doc.text_content(div), "Red");
        assert_eq!(doc.attr(span, "title"), Some("remove Red"));
    }

    #[test]
    fn test_visibility_inherits_from_ancestors() {
        let mut doc = Document::new();
        let (ul, items) = list(&mut doc);
        assert!(doc.is_visible(items[0]));

        doc.hide(ul).unwrap();
        assert!(!doc.is_visible(items[0]));
        assert!(!doc.node(items[0]).unwrap().is_hidden());

        doc.show(ul).unwrap();
        assert!(doc.is_visible(items[0]));
    }

    #[test]
    fn test_style_set_and_clear() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_style(div, "top", Some("-120px".into())).unwrap();
        assert_eq!(doc.style(div, "top"), Some("-120px"));

        doc.set_style(div, "top", None).unwrap();
        assert_eq!(doc.style(div, "top"), None);
    }
}
