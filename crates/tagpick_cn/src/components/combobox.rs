//! Combobox component - multi-select dropdown with checkboxes and a tag panel
//!
//! Binds to a pre-rendered mount fragment (see [`markup`](super::markup)) and
//! keeps three surfaces in sync with one authoritative [`Selection`]:
//!
//! - **Checkbox list**: checked state, plus selected entries promoted in front
//!   of the boundary marker in selection order
//! - **Tag panel**: one chip per selected candidate, appended in selection order
//! - **Hidden field**: canonical comma-joined selection for form submission
//!
//! Every transition runs to completion on the caller's thread while holding
//! `&mut Document`, so no surface is ever observed half-updated.
//!
//! # Example
//!
//! ```ignore
//! use tagpick_cn::prelude::*;
//!
//! let mut registry = ComboboxRegistry::new();
//! let colors = registry
//!     .combobox("colors")
//!     .selected("1,3")
//!     .on_change(|ids| println!("selected: {ids:?}"))
//!     .create(&mut doc)
//!     .unwrap();
//!
//! colors.select(&mut doc, "2");
//! colors.deselect(&mut doc, "Red");
//! colors.open_dropdown(&mut doc);
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tagpick_core::{
    compute_placement, ComboboxConfig, ComboboxError, Placement, PlacementInput, Result,
    SearchFilter, Selection, SelectionInput,
};
use tagpick_dom::{DomError, DomEvent, DomEventKind, Document, EventResult, Matcher, NodeId};

use super::markup::{classes, CHIP_VALUE_ATTR};

/// Callback invoked with the ordered selected ids after every change
pub type ChangeCallback = Arc<dyn Fn(&[String]) + Send + Sync>;

fn document_error(err: DomError) -> ComboboxError {
    ComboboxError::Document(err.to_string())
}

/// Lookup key for [`Combobox::deselect`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeselectKey {
    /// Candidate display text (compared trimmed)
    Text(String),
    /// The candidate's checkbox (or any node inside its entry)
    Control(NodeId),
    /// Candidate id
    Id(String),
}

impl From<&str> for DeselectKey {
    fn from(text: &str) -> Self {
        DeselectKey::Text(text.to_string())
    }
}

impl From<String> for DeselectKey {
    fn from(text: String) -> Self {
        DeselectKey::Text(text)
    }
}

impl From<NodeId> for DeselectKey {
    fn from(node: NodeId) -> Self {
        DeselectKey::Control(node)
    }
}

/// Nodes of the mount fragment the widget writes to
#[derive(Clone, Copy, Debug)]
struct Parts {
    mount: NodeId,
    tag_panel: NodeId,
    template: NodeId,
    add_trigger: NodeId,
    dropdown: NodeId,
    menu: NodeId,
    search: NodeId,
    divider: NodeId,
    hidden_field: NodeId,
}

/// One candidate row in the dropdown menu
#[derive(Clone, Copy, Debug)]
struct Entry {
    label: NodeId,
    checkbox: NodeId,
}

/// A mounted multi-select combobox
pub struct Combobox {
    mount_id: String,
    parts: Parts,
    /// Candidate id → row, in markup order
    entries: IndexMap<String, Entry>,
    /// Candidate id → chip currently in the tag panel
    chips: FxHashMap<String, NodeId>,
    selection: Selection,
    filter: SearchFilter,
    config: ComboboxConfig,
    on_change: Option<ChangeCallback>,
}

impl std::fmt::Debug for Combobox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combobox")
            .field("mount_id", &self.mount_id)
            .field("candidates", &self.entries.len())
            .field("selected", &self.selection.selected())
            .field("search", &self.filter.term())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Combobox {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Bind to the mount element with id `mount_id`
    ///
    /// Validates the whole markup contract before touching the document, so a
    /// failed mount leaves no hidden field or other residue behind.
    pub(crate) fn mount(
        doc: &mut Document,
        mount_id: &str,
        initial: SelectionInput,
        on_change: Option<ChangeCallback>,
        config: &ComboboxConfig,
    ) -> Result<Self> {
        if mount_id.is_empty() {
            return Err(ComboboxError::InvalidMountId);
        }
        let mount = doc
            .get_element_by_id(mount_id)
            .ok_or_else(|| ComboboxError::MountNotFound(mount_id.to_string()))?;

        let missing = |part: &'static str| ComboboxError::MissingPart {
            mount: mount_id.to_string(),
            part,
        };
        let field_name = doc
            .data(mount, "name")
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| missing("data-name attribute"))?;
        let tag_panel = doc
            .find_first(mount, &Matcher::class(classes::TAG_PANEL))
            .ok_or_else(|| missing("tag panel"))?;
        let template = doc
            .find_children(
                tag_panel,
                &Matcher::class(classes::TAG_ITEM).and(Matcher::class(config.hidden_class.as_str())),
            )
            .first()
            .copied()
            .ok_or_else(|| missing("template chip"))?;
        let add_trigger = doc
            .find_first(mount, &Matcher::class(classes::TAG_ADD))
            .ok_or_else(|| missing("add trigger"))?;
        let dropdown = doc
            .find_first(mount, &Matcher::class(classes::DROPDOWN))
            .ok_or_else(|| missing("dropdown panel"))?;
        let menu = doc
            .find_first(dropdown, &Matcher::class(classes::DROPDOWN_MENU))
            .ok_or_else(|| missing("dropdown menu"))?;
        let search = doc
            .find_first(
                menu,
                &Matcher::tag("input").and(Matcher::attr("type", "search")),
            )
            .ok_or_else(|| missing("search field"))?;
        let divider = doc
            .find_children(menu, &Matcher::class(classes::DIVIDER))
            .first()
            .copied()
            .ok_or_else(|| missing("boundary marker"))?;

        let mut entries = IndexMap::new();
        let mut candidates = Vec::new();
        for checkbox in doc.find_all(menu, &Matcher::checkbox()) {
            let Some(id) = doc.attr(checkbox, "value").map(str::to_string) else {
                tracing::warn!(mount = mount_id, "Checkbox without value ignored");
                continue;
            };
            // The entry row is the direct child of the menu holding the checkbox
            let label = doc
                .ancestors(checkbox)
                .into_iter()
                .find(|&a| doc.parent(a) == Some(menu))
                .unwrap_or(checkbox);
            if label == divider || entries.contains_key(&id) {
                continue;
            }
            candidates.push((id.clone(), doc.text_content(label)));
            entries.insert(id, Entry { label, checkbox });
        }

        let hidden_field = attach_hidden_field(doc, mount, &field_name).map_err(document_error)?;

        let mut combobox = Self {
            mount_id: mount_id.to_string(),
            parts: Parts {
                mount,
                tag_panel,
                template,
                add_trigger,
                dropdown,
                menu,
                search,
                divider,
                hidden_field,
            },
            entries,
            chips: FxHashMap::default(),
            selection: Selection::new(candidates),
            filter: SearchFilter::default(),
            config: config.clone(),
            on_change,
        };

        // Markup may arrive with stray checked boxes; the selection decides
        for entry in combobox.entries.values() {
            doc.set_checked(entry.checkbox, false)
                .map_err(document_error)?;
        }
        doc.hide(dropdown).map_err(document_error)?;
        combobox.reset_selection(doc, initial, true);

        tracing::debug!(
            mount = mount_id,
            candidates = combobox.entries.len(),
            selected = %combobox.selection.canonical(),
            "combobox mounted"
        );
        Ok(combobox)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }

    /// Mount element
    pub fn mount_node(&self) -> NodeId {
        self.parts.mount
    }

    /// Hidden form field created at mount
    pub fn hidden_field(&self) -> NodeId {
        self.parts.hidden_field
    }

    pub fn search_field(&self) -> NodeId {
        self.parts.search
    }

    pub fn add_trigger(&self) -> NodeId {
        self.parts.add_trigger
    }

    pub fn dropdown_panel(&self) -> NodeId {
        self.parts.dropdown
    }

    pub fn dropdown_menu(&self) -> NodeId {
        self.parts.menu
    }

    pub fn tag_panel(&self) -> NodeId {
        self.parts.tag_panel
    }

    /// Checkbox of a candidate
    pub fn checkbox(&self, id: &str) -> Option<NodeId> {
        self.entries.get(id).map(|e| e.checkbox)
    }

    /// Chip of a selected candidate
    pub fn chip(&self, id: &str) -> Option<NodeId> {
        self.chips.get(id).copied()
    }

    /// Candidate ids in markup order
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Ordered ids currently selected
    pub fn selected_items(&self) -> Vec<String> {
        self.selection.selected()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Current value of the hidden field
    pub fn hidden_value<'d>(&self, doc: &'d Document) -> &'d str {
        doc.value(self.parts.hidden_field)
    }

    /// Current search term
    pub fn search_term(&self) -> &str {
        self.filter.term()
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.node(self.parts.dropdown)
            .is_some_and(|n| !n.is_hidden())
    }

    pub fn set_on_change<F>(&mut self, callback: F)
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a candidate by id
    ///
    /// Returns `false` (and changes nothing) for unknown or already selected
    /// ids, or when the mount markup can no longer show the selection.
    pub fn select(&mut self, doc: &mut Document, id: &str) -> bool {
        if !self.selection.is_candidate(id) || self.selection.is_selected(id) {
            tracing::trace!(mount = %self.mount_id, id, "select ignored");
            return false;
        }
        if let Err(err) = self.project_select(doc, id) {
            tracing::error!(mount = %self.mount_id, id, "Failed to show selection: {}", err);
            return false;
        }
        self.selection.select(id);
        self.commit(doc);
        true
    }

    /// Deselect a candidate by display text, checkbox node or id
    ///
    /// Returns `false` (and changes nothing) when the key resolves to no
    /// selected candidate, or when the mount markup can no longer show the
    /// change.
    pub fn deselect(&mut self, doc: &mut Document, key: impl Into<DeselectKey>) -> bool {
        let key = key.into();
        let Some(id) = self.resolve(doc, &key) else {
            tracing::trace!(mount = %self.mount_id, ?key, "deselect matched nothing");
            return false;
        };
        if !self.selection.is_selected(&id) {
            return false;
        }
        if let Err(err) = self.project_deselect(doc, &id) {
            tracing::error!(mount = %self.mount_id, id = %id, "Failed to clear selection: {}", err);
            return false;
        }
        self.selection.deselect(&id);
        self.commit(doc);
        true
    }

    /// Deselect a candidate by id
    pub fn deselect_id(&mut self, doc: &mut Document, id: &str) -> bool {
        self.deselect(doc, DeselectKey::Id(id.to_string()))
    }

    /// Flip a candidate's state
    pub fn toggle(&mut self, doc: &mut Document, id: &str) -> bool {
        if self.selection.is_selected(id) {
            self.deselect_id(doc, id)
        } else {
            self.select(doc, id)
        }
    }

    /// Replace the whole selection
    ///
    /// Every entry is first unchecked and returned behind the boundary in
    /// markup order and every chip removed; an initial call on a widget that
    /// shows nothing yet skips this. Valid ids are then promoted and chipped in
    /// the order given, and ids the markup can no longer show are dropped. The
    /// hidden field is always rewritten; the callback fires once, and never for
    /// the initial call.
    pub fn reset_selection(
        &mut self,
        doc: &mut Document,
        selection: impl Into<SelectionInput>,
        is_initial: bool,
    ) {
        let ids = selection.into().ids();

        // Whatever is already on screen goes, initial call or not
        let shown = !self.selection.is_empty() || !self.chips.is_empty();
        if !is_initial || shown {
            if let Err(err) = self.project_clear(doc) {
                tracing::error!(mount = %self.mount_id, "Failed to reset list: {}", err);
                return;
            }
        }

        for id in self.selection.reset(&ids) {
            if let Err(err) = self.project_select(doc, &id) {
                self.selection.deselect(&id);
                tracing::error!(mount = %self.mount_id, id = %id, "Failed to show selection: {}", err);
            }
        }

        if is_initial {
            self.write_hidden(doc);
        } else {
            self.commit(doc);
        }
    }

    fn resolve(&self, doc: &Document, key: &DeselectKey) -> Option<String> {
        match key {
            DeselectKey::Id(id) => self.selection.is_candidate(id).then(|| id.clone()),
            DeselectKey::Text(text) => self.selection.find_by_label(text).map(str::to_string),
            DeselectKey::Control(node) => self.entry_at(doc, *node),
        }
    }

    /// Row of a candidate; every candidate has one from mount onwards
    fn entry(&self, id: &str) -> tagpick_dom::Result<Entry> {
        self.entries
            .get(id)
            .copied()
            .ok_or(DomError::UnknownNode(self.parts.menu))
    }

    /// Candidate whose entry row contains `node`
    fn entry_at(&self, doc: &Document, node: NodeId) -> Option<String> {
        self.entries
            .iter()
            .find(|(_, entry)| doc.contains(entry.label, node))
            .map(|(id, _)| id.clone())
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Check, promote in front of the boundary and append a chip
    ///
    /// Leaves the document untouched when a node it writes to is gone.
    fn project_select(&mut self, doc: &mut Document, id: &str) -> tagpick_dom::Result<()> {
        let entry = self.entry(id)?;
        require(
            doc,
            &[entry.checkbox, entry.label, self.parts.template, self.parts.tag_panel],
        )?;
        require_parent(doc, self.parts.divider)?;

        doc.set_checked(entry.checkbox, true)?;
        doc.insert_before(entry.label, self.parts.divider)?;

        let label = self.selection.label(id).unwrap_or(id).to_string();
        let chip = doc.clone_subtree(self.parts.template)?;
        doc.remove_class(chip, &self.config.hidden_class)?;
        doc.replace_text(chip, &self.config.placeholder, &label)?;
        doc.set_attr(chip, CHIP_VALUE_ATTR, id)?;
        doc.append_child(self.parts.tag_panel, chip)?;
        if let Some(stale) = self.chips.insert(id.to_string(), chip) {
            if doc.exists(stale) {
                doc.remove(stale)?;
            }
        }
        Ok(())
    }

    /// Uncheck, move behind the boundary and drop the chip
    ///
    /// Leaves the document untouched when a node it writes to is gone.
    fn project_deselect(&mut self, doc: &mut Document, id: &str) -> tagpick_dom::Result<()> {
        let entry = self.entry(id)?;
        require(doc, &[entry.checkbox, entry.label])?;
        require_parent(doc, self.parts.divider)?;

        doc.set_checked(entry.checkbox, false)?;
        doc.insert_after(entry.label, self.parts.divider)?;
        if let Some(chip) = self.chips.remove(id) {
            if doc.exists(chip) {
                doc.remove(chip)?;
            }
        }
        Ok(())
    }

    /// Uncheck everything, restore markup order and empty the tag panel
    ///
    /// Entries whose nodes are gone are skipped; they can no longer be shown.
    fn project_clear(&mut self, doc: &mut Document) -> tagpick_dom::Result<()> {
        require(doc, &[self.parts.menu, self.parts.tag_panel])?;

        for entry in self.entries.values() {
            if !doc.exists(entry.checkbox) || !doc.exists(entry.label) {
                continue;
            }
            doc.set_checked(entry.checkbox, false)?;
            doc.append_child(self.parts.menu, entry.label)?;
        }

        let panel = doc.children(self.parts.tag_panel).to_vec();
        if let Some(pos) = panel.iter().position(|&c| c == self.parts.template) {
            for &chip in &panel[pos + 1..] {
                doc.remove(chip)?;
            }
        }
        for (_, chip) in self.chips.drain() {
            if doc.exists(chip) {
                doc.remove(chip)?;
            }
        }
        Ok(())
    }

    fn write_hidden(&self, doc: &mut Document) {
        let value = self.selection.canonical();
        if let Err(err) = doc.set_value(self.parts.hidden_field, value) {
            tracing::error!(mount = %self.mount_id, "Failed to write hidden field: {}", err);
        }
    }

    /// Hidden field + change notification after a transition
    fn commit(&self, doc: &mut Document) {
        self.write_hidden(doc);
        let selected = self.selection.selected();
        tracing::debug!(mount = %self.mount_id, ?selected, "selection changed");
        if let Some(callback) = &self.on_change {
            callback(selected.as_slice());
        }
    }

    // =========================================================================
    // Dropdown
    // =========================================================================

    /// Measure, place and reveal the dropdown with a cleared search
    pub fn open_dropdown(&mut self, doc: &mut Document) -> Placement {
        let input = PlacementInput {
            rows: doc.children(self.parts.menu).len(),
            viewport_height: doc.viewport().1,
            anchor_top: doc.bounds(self.parts.mount).top(),
            anchor_height: doc.bounds(self.parts.tag_panel).height,
        };
        let placement = compute_placement(&input, &self.config.metrics);

        if let Err(err) = self.reveal(doc, &placement) {
            tracing::error!(mount = %self.mount_id, "Failed to open dropdown: {}", err);
        }

        self.filter_items(doc, "");
        doc.focus(self.parts.search);
        placement
    }

    fn reveal(&self, doc: &mut Document, placement: &Placement) -> tagpick_dom::Result<()> {
        doc.set_style(self.parts.menu, "top", placement.top().map(px))?;
        doc.set_style(self.parts.menu, "max-height", placement.max_height().map(px))?;
        doc.set_value(self.parts.search, "")?;
        doc.show(self.parts.dropdown)
    }

    pub fn close_dropdown(&mut self, doc: &mut Document) {
        if let Err(err) = doc.hide(self.parts.dropdown) {
            tracing::error!(mount = %self.mount_id, "Failed to close dropdown: {}", err);
        }
    }

    /// Open when closed, close when open
    pub fn toggle_dropdown(&mut self, doc: &mut Document) {
        if self.is_open(doc) {
            self.close_dropdown(doc);
        } else {
            self.open_dropdown(doc);
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Show entries whose label contains `term`, hide the rest; returns the
    /// number of entries shown
    pub fn filter_items(&mut self, doc: &mut Document, term: &str) -> usize {
        self.filter = SearchFilter::new(term);
        let mut shown = 0;
        for (id, entry) in &self.entries {
            let label = self.selection.label(id).unwrap_or_default();
            let visible = self.filter.matches(label);
            if doc.set_shown(entry.label, visible).is_ok() && visible {
                shown += 1;
            }
        }
        tracing::trace!(mount = %self.mount_id, term, shown, "filtered entries");
        shown
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// React to a DOM event delivered anywhere in the document
    pub fn handle_event(&mut self, doc: &mut Document, event: &DomEvent) -> EventResult {
        match event.kind {
            DomEventKind::Click => self.handle_click(doc, event.target),
            _ if event.is_text_change() && event.target == self.parts.search => {
                let term = doc.value(self.parts.search).to_string();
                self.filter_items(doc, &term);
                EventResult::Handled
            }
            _ => EventResult::Ignored,
        }
    }

    fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> EventResult {
        if !doc.exists(target) {
            return EventResult::Ignored;
        }
        if doc.contains(self.parts.add_trigger, target) {
            self.toggle_dropdown(doc);
            return EventResult::Handled;
        }

        let mut result = EventResult::Ignored;

        if doc.contains(self.parts.tag_panel, target) && doc.has_class(target, classes::CLOSE) {
            let chip_id = doc
                .closest(target, &Matcher::class(classes::TAG_ITEM))
                .and_then(|chip| doc.attr(chip, CHIP_VALUE_ATTR))
                .map(str::to_string);
            if let Some(id) = chip_id {
                self.deselect_id(doc, &id);
                result = EventResult::Handled;
            }
        } else if doc.contains(self.parts.menu, target) {
            if let Some(id) = self.entry_at(doc, target) {
                self.toggle(doc, &id);
                result = EventResult::Handled;
            }
        }

        // Click-away dismisses the dropdown
        if self.is_open(doc) && !doc.contains(self.parts.dropdown, target) {
            self.close_dropdown(doc);
            result = EventResult::Handled;
        }
        result
    }
}

/// Append the hidden form field (`id` and `name` both set to `name`)
fn attach_hidden_field(
    doc: &mut Document,
    mount: NodeId,
    name: &str,
) -> tagpick_dom::Result<NodeId> {
    let field = doc.create_element("input");
    doc.set_attr(field, "type", "hidden")?;
    doc.set_attr(field, "id", name)?;
    doc.set_attr(field, "name", name)?;
    doc.append_child(mount, field)?;
    Ok(field)
}

/// Fail before any mutation when a node about to be written is gone
fn require(doc: &Document, nodes: &[NodeId]) -> tagpick_dom::Result<()> {
    match nodes.iter().find(|&&node| !doc.exists(node)) {
        Some(&missing) => Err(DomError::UnknownNode(missing)),
        None => Ok(()),
    }
}

/// Insertion anchors need a parent
fn require_parent(doc: &Document, anchor: NodeId) -> tagpick_dom::Result<()> {
    match doc.parent(anchor) {
        Some(_) => Ok(()),
        None if doc.exists(anchor) => Err(DomError::Detached(anchor)),
        None => Err(DomError::UnknownNode(anchor)),
    }
}

fn px(value: f32) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::markup::mount;
    use std::sync::Mutex;

    fn colors(doc: &mut Document) -> Combobox {
        let root = doc.root();
        mount("colors")
            .name("color_ids")
            .options([("1", "Red"), ("2", "Blue"), ("3", "Green")])
            .build(doc, root)
            .unwrap();
        Combobox::mount(
            doc,
            "colors",
            SelectionInput::default(),
            None,
            &ComboboxConfig::default(),
        )
        .unwrap()
    }

    fn entry_order(doc: &Document, combobox: &Combobox) -> Vec<String> {
        doc.children(combobox.dropdown_menu())
            .iter()
            .map(|&n| {
                if doc.has_class(n, classes::DIVIDER) {
                    "|".to_string()
                } else {
                    doc.find_first(n, &Matcher::checkbox())
                        .and_then(|c| doc.attr(c, "value"))
                        .unwrap_or("?")
                        .to_string()
                }
            })
            .filter(|s| s != "?")
            .collect()
    }

    #[test]
    fn test_mount_creates_empty_hidden_field() {
        let mut doc = Document::new();
        let combobox = colors(&mut doc);

        let field = doc.get_element_by_id("color_ids").unwrap();
        assert_eq!(field, combobox.hidden_field());
        assert_eq!(doc.attr(field, "name"), Some("color_ids"));
        assert_eq!(doc.attr(field, "type"), Some("hidden"));
        assert_eq!(combobox.hidden_value(&doc), "");
        assert!(!combobox.is_open(&doc));
    }

    #[test]
    fn test_select_promotes_in_selection_order() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);

        assert!(combobox.select(&mut doc, "3"));
        assert!(combobox.select(&mut doc, "1"));

        assert_eq!(entry_order(&doc, &combobox), vec!["3", "1", "|", "2"]);
        assert_eq!(combobox.hidden_value(&doc), "3,1");
    }

    #[test]
    fn test_deselect_returns_entry_behind_boundary() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);
        combobox.select(&mut doc, "2");
        combobox.select(&mut doc, "3");

        assert!(combobox.deselect(&mut doc, "Blue"));
        assert_eq!(entry_order(&doc, &combobox), vec!["3", "|", "2", "1"]);
        assert_eq!(combobox.chip("2"), None);
    }

    #[test]
    fn test_deselect_by_control() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);
        combobox.select(&mut doc, "1");

        let checkbox = combobox.checkbox("1").unwrap();
        assert!(combobox.deselect(&mut doc, checkbox));
        assert!(!doc.is_checked(checkbox));
        assert_eq!(combobox.hidden_value(&doc), "");
    }

    #[test]
    fn test_noops_do_not_notify() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        combobox.set_on_change(move |_| *counter.lock().unwrap() += 1);

        assert!(!combobox.deselect_id(&mut doc, "1"));
        assert!(combobox.select(&mut doc, "1"));
        assert!(!combobox.select(&mut doc, "1"));
        assert!(!combobox.select(&mut doc, "nope"));
        assert!(!combobox.deselect(&mut doc, "Purple"));

        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(combobox.hidden_value(&doc), "1");
    }

    #[test]
    fn test_chip_keyed_by_id() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);
        combobox.select(&mut doc, "2");

        let chip = combobox.chip("2").unwrap();
        assert_eq!(doc.attr(chip, CHIP_VALUE_ATTR), Some("2"));
        assert!(!doc.has_class(chip, "d-none"));
        assert!(doc.text_content(chip).starts_with("Blue"));
    }

    #[test]
    fn test_reset_restores_markup_order() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);
        combobox.select(&mut doc, "3");
        combobox.select(&mut doc, "2");

        combobox.reset_selection(&mut doc, "1", false);
        assert_eq!(entry_order(&doc, &combobox), vec!["1", "|", "2", "3"]);
        assert_eq!(combobox.hidden_value(&doc), "1");
        assert_eq!(combobox.chip("3"), None);
    }

    #[test]
    fn test_filter_counts_visible() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);

        assert_eq!(combobox.filter_items(&mut doc, "RE"), 2);
        assert_eq!(combobox.search_term(), "RE");
        let blue = doc.parent(combobox.checkbox("2").unwrap()).unwrap();
        assert!(doc.node(blue).unwrap().is_hidden());

        assert_eq!(combobox.filter_items(&mut doc, ""), 3);
    }

    #[test]
    fn test_open_resets_search_and_focuses() {
        let mut doc = Document::new();
        let mut combobox = colors(&mut doc);
        doc.set_value(combobox.search_field(), "zz").unwrap();
        combobox.filter_items(&mut doc, "zz");

        let placement = combobox.open_dropdown(&mut doc);
        assert_eq!(placement, Placement::Natural);
        assert!(combobox.is_open(&doc));
        assert_eq!(doc.value(combobox.search_field()), "");
        assert_eq!(doc.focused(), Some(combobox.search_field()));
        assert_eq!(combobox.search_term(), "");
        assert_eq!(doc.style(combobox.dropdown_menu(), "top"), None);

        combobox.toggle_dropdown(&mut doc);
        assert!(!combobox.is_open(&doc));
    }
}
