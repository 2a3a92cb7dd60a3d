//! Mount markup contract and a builder that renders it
//!
//! A combobox binds to a pre-rendered fragment:
//!
//! ```text
//! div#<mount> [data-name=<field>]
//! ├── div.tp-tags                      tag panel
//! │   └── div.tp-tag-item.d-none        template chip (span "xxx" + a.close)
//! ├── button.tp-tag-add                 add trigger
//! └── div.tp-dropdown                   dropdown panel
//!     └── div.tp-dropdown-menu
//!         ├── input[type=search]
//!         ├── hr.dropdown-divider       boundary marker
//!         └── label > input[type=checkbox][value=<id>] + " <label>"   (one per candidate)
//! ```
//!
//! Hosts rendering their own markup only need to keep the class names and the
//! checkbox `value` attributes; [`MountBuilder`] produces exactly this shape.

use tagpick_dom::{Document, NodeId, Result};

/// Class names the widget looks up inside its mount
pub mod classes {
    /// Tag panel holding the chips
    pub const TAG_PANEL: &str = "tp-tags";
    /// A chip (the template chip also carries the hidden class)
    pub const TAG_ITEM: &str = "tp-tag-item";
    /// Button toggling the dropdown
    pub const TAG_ADD: &str = "tp-tag-add";
    /// Dropdown panel shown/hidden as a whole
    pub const DROPDOWN: &str = "tp-dropdown";
    /// Scrollable menu inside the dropdown panel
    pub const DROPDOWN_MENU: &str = "tp-dropdown-menu";
    /// Boundary marker between promoted entries and the rest
    pub const DIVIDER: &str = "dropdown-divider";
    /// Remove control inside a chip
    pub const CLOSE: &str = "close";
}

/// Attribute carrying the candidate id on a chip
pub const CHIP_VALUE_ATTR: &str = "data-value";

/// Builder for a combobox mount fragment
#[derive(Clone, Debug)]
pub struct MountBuilder {
    id: String,
    name: Option<String>,
    options: Vec<(String, String)>,
    placeholder: String,
    hidden_class: String,
    add_label: String,
    checked: Vec<String>,
}

impl MountBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            options: Vec::new(),
            placeholder: "xxx".to_string(),
            hidden_class: "d-none".to_string(),
            add_label: "+".to_string(),
            checked: Vec::new(),
        }
    }

    /// Hidden field name (`data-name` on the mount)
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a candidate with id and display label
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push((value.into(), label.into()));
        self
    }

    /// Add multiple candidates
    pub fn options<I, V, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        self.options
            .extend(options.into_iter().map(|(v, l)| (v.into(), l.into())));
        self
    }

    /// Placeholder token in the template chip
    pub fn placeholder(mut self, token: impl Into<String>) -> Self {
        self.placeholder = token.into();
        self
    }

    /// Class hiding the template chip
    pub fn hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }

    /// Text of the add trigger
    pub fn add_label(mut self, text: impl Into<String>) -> Self {
        self.add_label = text.into();
        self
    }

    /// Render a checkbox pre-checked in markup (the widget overrides it)
    pub fn pre_checked(mut self, value: impl Into<String>) -> Self {
        self.checked.push(value.into());
        self
    }

    /// Render the fragment under `parent`; returns the mount node
    pub fn build(self, doc: &mut Document, parent: NodeId) -> Result<NodeId> {
        let mount = element(doc, "div", &[])?;
        doc.set_attr(mount, "id", self.id.as_str())?;
        if let Some(name) = &self.name {
            doc.set_attr(mount, "data-name", name.as_str())?;
        }

        // Tag panel with template chip
        let tag_panel = element(doc, "div", &[classes::TAG_PANEL])?;
        let template = element(doc, "div", &[classes::TAG_ITEM, self.hidden_class.as_str()])?;
        let chip_text = element(doc, "span", &[])?;
        doc.set_text(chip_text, self.placeholder.as_str())?;
        let close = element(doc, "a", &[classes::CLOSE])?;
        doc.set_attr(close, "title", format!("Remove {}", self.placeholder))?;
        doc.set_text(close, "\u{00d7}")?;
        doc.append_child(template, chip_text)?;
        doc.append_child(template, close)?;
        doc.append_child(tag_panel, template)?;
        doc.append_child(mount, tag_panel)?;

        let add = element(doc, "button", &[classes::TAG_ADD])?;
        doc.set_text(add, self.add_label.as_str())?;
        doc.append_child(mount, add)?;

        // Dropdown panel, closed until opened
        let dropdown = element(doc, "div", &[classes::DROPDOWN])?;
        doc.hide(dropdown)?;
        let menu = element(doc, "div", &[classes::DROPDOWN_MENU])?;
        let search = element(doc, "input", &[])?;
        doc.set_attr(search, "type", "search")?;
        let divider = element(doc, "hr", &[classes::DIVIDER])?;
        doc.append_child(menu, search)?;
        doc.append_child(menu, divider)?;

        for (value, label) in &self.options {
            let label_node = element(doc, "label", &[])?;
            doc.set_text(label_node, format!(" {label}"))?;
            let checkbox = element(doc, "input", &[])?;
            doc.set_attr(checkbox, "type", "checkbox")?;
            doc.set_attr(checkbox, "value", value.as_str())?;
            doc.set_checked(checkbox, self.checked.contains(value))?;
            doc.append_child(label_node, checkbox)?;
            doc.append_child(menu, label_node)?;
        }

        doc.append_child(dropdown, menu)?;
        doc.append_child(mount, dropdown)?;
        doc.append_child(parent, mount)?;

        tracing::trace!(
            mount = %self.id,
            options = self.options.len(),
            "rendered combobox mount"
        );
        Ok(mount)
    }
}

fn element(doc: &mut Document, tag: &str, class_list: &[&str]) -> Result<NodeId> {
    let node = doc.create_element(tag);
    for class in class_list {
        doc.add_class(node, class)?;
    }
    Ok(node)
}

/// Start a mount fragment builder
pub fn mount(id: impl Into<String>) -> MountBuilder {
    MountBuilder::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagpick_dom::Matcher;

    #[test]
    fn test_builds_contract_shape() {
        let mut doc = Document::new();
        let root = doc.root();
        let node = mount("colors")
            .name("color_ids")
            .option("1", "Red")
            .option("2", "Blue")
            .build(&mut doc, root)
            .unwrap();

        assert_eq!(doc.get_element_by_id("colors"), Some(node));
        assert_eq!(doc.data(node, "name"), Some("color_ids"));

        let menu = doc
            .find_first(node, &Matcher::class(classes::DROPDOWN_MENU))
            .unwrap();
        // search + divider + two entries
        assert_eq!(doc.children(menu).len(), 4);
        assert_eq!(doc.find_all(menu, &Matcher::checkbox()).len(), 2);

        let dropdown = doc.find_first(node, &Matcher::class(classes::DROPDOWN)).unwrap();
        assert!(!doc.is_visible(dropdown));
    }

    #[test]
    fn test_template_chip_is_hidden_with_placeholder() {
        let mut doc = Document::new();
        let root = doc.root();
        let node = mount("m").option("a", "A").build(&mut doc, root).unwrap();

        let template = doc
            .find_first(node, &Matcher::class(classes::TAG_ITEM))
            .unwrap();
        assert!(doc.has_class(template, "d-none"));
        assert!(doc.text_content(template).starts_with("xxx"));
    }

    #[test]
    fn test_custom_hidden_class_marks_template() {
        let mut doc = Document::new();
        let root = doc.root();
        let node = mount("m")
            .hidden_class("is-hidden")
            .option("a", "A")
            .build(&mut doc, root)
            .unwrap();

        let template = doc
            .find_first(node, &Matcher::class(classes::TAG_ITEM))
            .unwrap();
        assert!(doc.has_class(template, "is-hidden"));
        assert!(!doc.has_class(template, "d-none"));
    }

    #[test]
    fn test_entry_label_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let node = mount("m")
            .options([("a", "Apple"), ("b", "Banana")])
            .pre_checked("b")
            .build(&mut doc, root)
            .unwrap();

        let boxes = doc.find_all(node, &Matcher::checkbox());
        let label = doc.parent(boxes[0]).unwrap();
        assert_eq!(doc.text_content(label).trim(), "Apple");
        assert!(!doc.is_checked(boxes[0]));
        assert!(doc.is_checked(boxes[1]));
    }
}
