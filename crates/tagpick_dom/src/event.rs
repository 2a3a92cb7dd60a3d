//! DOM events delivered by the host to widgets

use crate::tree::NodeId;

/// Kind of DOM event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    /// Pointer click (bubbles to the document)
    Click,
    /// Key released while the target has focus
    KeyUp,
    /// Value of a text field changed
    Input,
    /// Search field submitted or cleared with its built-in cancel button
    Search,
}

/// A DOM event with its original target
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: DomEventKind,
    /// Innermost node the event was dispatched to
    pub target: NodeId,
}

impl DomEvent {
    pub fn new(kind: DomEventKind, target: NodeId) -> Self {
        Self { kind, target }
    }

    pub fn click(target: NodeId) -> Self {
        Self::new(DomEventKind::Click, target)
    }

    pub fn key_up(target: NodeId) -> Self {
        Self::new(DomEventKind::KeyUp, target)
    }

    pub fn input(target: NodeId) -> Self {
        Self::new(DomEventKind::Input, target)
    }

    pub fn search(target: NodeId) -> Self {
        Self::new(DomEventKind::Search, target)
    }

    /// Key-up, input and search events all mean "the text changed"
    pub fn is_text_change(&self) -> bool {
        matches!(
            self.kind,
            DomEventKind::KeyUp | DomEventKind::Input | DomEventKind::Search
        )
    }
}

/// Whether a handler consumed an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EventResult {
    /// Event produced a state change
    Handled,
    /// Event was not relevant to the handler
    #[default]
    Ignored,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Handled)
    }

    /// `Handled` if either side is
    pub fn or(self, other: EventResult) -> EventResult {
        if self.is_handled() || other.is_handled() {
            EventResult::Handled
        } else {
            EventResult::Ignored
        }
    }
}
