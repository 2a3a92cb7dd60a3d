//! Element queries
//!
//! Queries walk the document in pre-order (document order) and filter nodes
//! with a [`Matcher`]. Matchers compose with [`Matcher::and`], which covers
//! the handful of selector shapes widgets need (`.class`, `tag`,
//! `[attr=value]`, `:checkbox`) without a selector parser.
//!
//! ```ignore
//! let checked = doc.find_all(menu, &Matcher::checkbox().and(Matcher::checked()));
//! let label = doc.closest(checkbox, &Matcher::tag("label"));
//! ```

use crate::tree::{Document, Node, NodeId};

/// Predicate over a single node
pub struct Matcher {
    test: Box<dyn Fn(&Node) -> bool>,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Matcher(..)")
    }
}

impl Matcher {
    /// Custom predicate
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&Node) -> bool + 'static,
    {
        Self {
            test: Box::new(test),
        }
    }

    /// `.class`
    pub fn class(class: impl Into<String>) -> Self {
        let class = class.into();
        Self::new(move |n| n.has_class(&class))
    }

    /// Tag name (case-insensitive)
    pub fn tag(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        Self::new(move |n| n.tag() == tag)
    }

    /// `[name=value]`
    pub fn attr(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        Self::new(move |n| n.attr(&name) == Some(value.as_str()))
    }

    /// `:checkbox`
    pub fn checkbox() -> Self {
        Self::new(Node::is_checkbox)
    }

    /// `:checked`
    pub fn checked() -> Self {
        Self::new(Node::is_checked)
    }

    /// Both predicates must hold
    pub fn and(self, other: Matcher) -> Self {
        Self::new(move |n| (self.test)(n) && (other.test)(n))
    }

    /// Negation
    pub fn not(self) -> Self {
        Self::new(move |n| !(self.test)(n))
    }

    pub fn matches(&self, node: &Node) -> bool {
        (self.test)(node)
    }
}

impl Document {
    /// Does the node exist and satisfy the matcher
    pub fn is(&self, id: NodeId, matcher: &Matcher) -> bool {
        self.node(id).is_some_and(|n| matcher.matches(n))
    }

    /// First descendant of `scope` (excluding `scope`) in document order
    pub fn find_first(&self, scope: NodeId, matcher: &Matcher) -> Option<NodeId> {
        self.descendants_inclusive(scope)
            .into_iter()
            .skip(1)
            .find(|&id| self.is(id, matcher))
    }

    /// Every descendant of `scope` (excluding `scope`) in document order
    pub fn find_all(&self, scope: NodeId, matcher: &Matcher) -> Vec<NodeId> {
        self.descendants_inclusive(scope)
            .into_iter()
            .skip(1)
            .filter(|&id| self.is(id, matcher))
            .collect()
    }

    /// Direct children of `parent` satisfying the matcher
    pub fn find_children(&self, parent: NodeId, matcher: &Matcher) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&id| self.is(id, matcher))
            .collect()
    }

    /// The node itself or its nearest ancestor satisfying the matcher
    pub fn closest(&self, id: NodeId, matcher: &Matcher) -> Option<NodeId> {
        if self.is(id, matcher) {
            return Some(id);
        }
        self.ancestors(id)
            .into_iter()
            .find(|&a| self.is(a, matcher))
    }
}
