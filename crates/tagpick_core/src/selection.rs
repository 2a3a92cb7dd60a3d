//! Selection state machine
//!
//! Each candidate is either [`ItemState::Unselected`] or
//! [`ItemState::Selected`]. Transitions are driven by the events in
//! [`selection_events`]; an event that does not apply to the current state
//! produces no transition, which is how re-selecting or re-deselecting
//! becomes a silent no-op.
//!
//! [`Selection`] is the authoritative ordered set of selected identifiers.
//! Visual surfaces (checkbox list, tag panel, hidden field) are projections
//! of it and never read back from.
//!
//! # Example
//!
//! ```rust
//! use tagpick_core::selection::Selection;
//!
//! let mut selection = Selection::new([("1", "Red"), ("2", "Blue")]);
//! assert!(selection.select("2"));
//! assert!(selection.select("1"));
//! assert!(!selection.select("1"));
//! assert_eq!(selection.canonical(), "2,1");
//! ```

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

// =============================================================================
// State Machine
// =============================================================================

/// Trait for per-item state machines driven by numeric events
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Event types for the per-candidate selection state machine
pub mod selection_events {
    /// Select the candidate (Unselected -> Selected)
    pub const SELECT: u32 = 30001;
    /// Deselect the candidate (Selected -> Unselected)
    pub const DESELECT: u32 = 30002;
}

/// Selection state of a single candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ItemState {
    #[default]
    Unselected,
    Selected,
}

impl ItemState {
    pub fn is_selected(&self) -> bool {
        matches!(self, ItemState::Selected)
    }
}

impl StateTransitions for ItemState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use selection_events::*;
        use ItemState::*;

        match (self, event) {
            (Unselected, SELECT) => Some(Selected),
            (Selected, DESELECT) => Some(Unselected),
            _ => None,
        }
    }
}

// =============================================================================
// Selection Input
// =============================================================================

/// Initial or replacement selection as handed over by a host
///
/// Hosts pass either the raw hidden-field style string (`"1, 2"`, `"[1,2]"`)
/// or a list of identifiers; both normalize to the same canonical string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionInput {
    Text(String),
    List(Vec<String>),
}

impl Default for SelectionInput {
    fn default() -> Self {
        SelectionInput::Text(String::new())
    }
}

impl SelectionInput {
    /// Comma-joined form with whitespace and `[` `]` stripped
    pub fn canonical(&self) -> String {
        match self {
            SelectionInput::Text(text) => canonicalize(text),
            SelectionInput::List(items) => canonicalize(&items.join(",")),
        }
    }

    /// Identifiers of the canonical form, in order, empty segments dropped
    pub fn ids(&self) -> Vec<String> {
        self.canonical()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&str> for SelectionInput {
    fn from(value: &str) -> Self {
        SelectionInput::Text(value.to_string())
    }
}

impl From<String> for SelectionInput {
    fn from(value: String) -> Self {
        SelectionInput::Text(value)
    }
}

impl From<Vec<String>> for SelectionInput {
    fn from(value: Vec<String>) -> Self {
        SelectionInput::List(value)
    }
}

impl From<Vec<&str>> for SelectionInput {
    fn from(value: Vec<&str>) -> Self {
        SelectionInput::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for SelectionInput {
    fn from(value: &[&str]) -> Self {
        SelectionInput::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SelectionInput {
    fn from(value: [&str; N]) -> Self {
        SelectionInput::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Strip whitespace and array brackets from a selection string
pub fn canonicalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '[' && *c != ']')
        .collect()
}

// =============================================================================
// Selection
// =============================================================================

/// Candidates of one widget and the ordered subset currently selected
#[derive(Clone, Debug, Default)]
pub struct Selection {
    /// Candidate id → trimmed display label, in markup order
    candidates: IndexMap<String, String>,
    /// Selected ids in selection order
    selected: IndexSet<String>,
}

impl Selection {
    /// Build from `(id, label)` pairs; a repeated id keeps its first label
    pub fn new<I, K, L>(candidates: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        let mut map = IndexMap::new();
        for (id, label) in candidates {
            let id = id.into();
            if map.contains_key(&id) {
                tracing::warn!("Duplicate candidate id ignored: {}", id);
                continue;
            }
            let label: String = label.into();
            map.insert(id, label.trim().to_string());
        }
        Self {
            candidates: map,
            selected: IndexSet::new(),
        }
    }

    /// Candidate `(id, label)` pairs in markup order
    pub fn candidates(&self) -> impl Iterator<Item = (&str, &str)> {
        self.candidates
            .iter()
            .map(|(id, label)| (id.as_str(), label.as_str()))
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_candidate(&self, id: &str) -> bool {
        self.candidates.contains_key(id)
    }

    pub fn label(&self, id: &str) -> Option<&str> {
        self.candidates.get(id).map(String::as_str)
    }

    /// State of a candidate, `None` for unknown ids
    pub fn state(&self, id: &str) -> Option<ItemState> {
        if !self.is_candidate(id) {
            return None;
        }
        Some(if self.selected.contains(id) {
            ItemState::Selected
        } else {
            ItemState::Unselected
        })
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    fn apply(&mut self, id: &str, event: u32) -> bool {
        let Some(current) = self.state(id) else {
            tracing::trace!("Ignoring selection event {} for unknown id {:?}", event, id);
            return false;
        };
        let Some(next) = current.on_event(event) else {
            return false;
        };
        match next {
            ItemState::Selected => {
                self.selected.insert(id.to_string());
            }
            ItemState::Unselected => {
                self.selected.shift_remove(id);
            }
        }
        true
    }

    /// Select a candidate; `false` when unknown or already selected
    pub fn select(&mut self, id: &str) -> bool {
        self.apply(id, selection_events::SELECT)
    }

    /// Deselect a candidate; `false` when unknown or not selected
    pub fn deselect(&mut self, id: &str) -> bool {
        self.apply(id, selection_events::DESELECT)
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection, keeping the given order; returns the ids applied
    ///
    /// Unknown and repeated ids are skipped.
    pub fn reset<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<String> {
        self.clear();
        ids.iter()
            .map(|id| id.as_ref())
            .filter(|id| self.select(id))
            .map(str::to_string)
            .collect()
    }

    /// Selected ids in selection order
    pub fn selected(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    pub fn selected_iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Canonical selection string written to the hidden field
    pub fn canonical(&self) -> String {
        self.selected_iter().collect::<Vec<_>>().join(",")
    }

    /// Candidate whose trimmed label equals the trimmed text
    ///
    /// Selected candidates win over unselected ones sharing the same label, so
    /// deselecting by text hits the entry the user actually sees as a chip.
    pub fn find_by_label(&self, text: &str) -> Option<&str> {
        let text = text.trim();
        self.selected_iter()
            .find(|id| self.label(id) == Some(text))
            .or_else(|| {
                self.candidates
                    .iter()
                    .find(|(_, label)| label.as_str() == text)
                    .map(|(id, _)| id.as_str())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Selection {
        Selection::new([("1", "Red"), ("2", "Blue"), ("3", " Green ")])
    }

    #[test]
    fn test_item_state_transitions() {
        use selection_events::*;

        assert_eq!(
            ItemState::Unselected.on_event(SELECT),
            Some(ItemState::Selected)
        );
        assert_eq!(
            ItemState::Selected.on_event(DESELECT),
            Some(ItemState::Unselected)
        );
        assert_eq!(ItemState::Selected.on_event(SELECT), None);
        assert_eq!(ItemState::Unselected.on_event(DESELECT), None);
        assert_eq!(ItemState::Unselected.on_event(99), None);
    }

    #[test]
    fn test_canonicalize_strips_spaces_and_brackets() {
        assert_eq!(canonicalize("[1, 2 ,3]"), "1,2,3");
        assert_eq!(canonicalize(" "), "");
        assert_eq!(canonicalize("a\tb"), "ab");
    }

    #[test]
    fn test_selection_input_forms_agree() {
        let text = SelectionInput::from("[ 1, 2 ]");
        let list = SelectionInput::from(vec![" 1", "2 "]);
        let array = SelectionInput::from(["1", "2"]);

        assert_eq!(text.canonical(), "1,2");
        assert_eq!(list.canonical(), "1,2");
        assert_eq!(array.ids(), vec!["1".to_string(), "2".to_string()]);
        assert!(SelectionInput::default().ids().is_empty());
        assert_eq!(SelectionInput::from("1,,2").ids().len(), 2);
    }

    #[test]
    fn test_select_keeps_selection_order() {
        let mut selection = colors();
        assert!(selection.select("3"));
        assert!(selection.select("1"));

        assert_eq!(selection.selected(), vec!["3", "1"]);
        assert_eq!(selection.canonical(), "3,1");
    }

    #[test]
    fn test_noop_transitions_rejected() {
        let mut selection = colors();
        assert!(!selection.deselect("1"));
        assert!(selection.select("1"));
        assert!(!selection.select("1"));
        assert!(!selection.select("missing"));
        assert!(!selection.deselect("missing"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_deselect_preserves_remaining_order() {
        let mut selection = colors();
        selection.select("1");
        selection.select("2");
        selection.select("3");
        assert!(selection.deselect("2"));
        assert_eq!(selection.canonical(), "1,3");
    }

    #[test]
    fn test_reset_skips_unknown_and_repeats() {
        let mut selection = colors();
        selection.select("1");

        let applied = selection.reset(&["2", "x", "3", "2"]);
        assert_eq!(applied, vec!["2", "3"]);
        assert_eq!(selection.canonical(), "2,3");
        assert!(!selection.is_selected("1"));
    }

    #[test]
    fn test_labels_trimmed_and_found() {
        let selection = colors();
        assert_eq!(selection.label("3"), Some("Green"));
        assert_eq!(selection.find_by_label("  Green"), Some("3"));
        assert_eq!(selection.find_by_label("Purple"), None);
        assert_eq!(selection.state("nope"), None);
    }

    #[test]
    fn test_find_by_label_prefers_selected() {
        let mut selection = Selection::new([("a", "Same"), ("b", "Same")]);
        assert_eq!(selection.find_by_label("Same"), Some("a"));

        selection.select("b");
        assert_eq!(selection.find_by_label("Same"), Some("b"));
    }

    #[test]
    fn test_duplicate_candidates_keep_first() {
        let selection = Selection::new([("1", "Red"), ("1", "Crimson")]);
        assert_eq!(selection.candidate_count(), 1);
        assert_eq!(selection.label("1"), Some("Red"));
    }
}
