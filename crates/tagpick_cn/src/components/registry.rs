//! Combobox registry - one widget per mount point
//!
//! The registry is owned by whoever hosts the page (a page controller, a test)
//! rather than living in process-wide state, so independent documents never
//! see each other's widgets. Entries are added on successful construction and
//! never removed.
//!
//! # Example
//!
//! ```rust
//! use tagpick_cn::prelude::*;
//! use tagpick_dom::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! cn::mount("sizes")
//!     .name("size_ids")
//!     .option("s", "Small")
//!     .option("m", "Medium")
//!     .build(&mut doc, root)
//!     .unwrap();
//!
//! let mut registry = ComboboxRegistry::new();
//! registry.combobox("sizes").selected(["m"]).create(&mut doc);
//! assert!(registry.combobox("sizes").create(&mut doc).is_none());
//!
//! assert_eq!(registry.len(), 1);
//! assert_eq!(registry.get("sizes").unwrap().hidden_value(&doc), "m");
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use tagpick_core::{ComboboxConfig, ComboboxError, Result, SelectionInput};
use tagpick_dom::{DomEvent, Document, EventResult};

use super::combobox::{ChangeCallback, Combobox};

/// Registry of mounted comboboxes keyed by mount id
#[derive(Debug, Default)]
pub struct ComboboxRegistry {
    instances: IndexMap<String, Combobox>,
    config: ComboboxConfig,
}

impl ComboboxRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry whose widgets use `config`
    pub fn with_config(config: ComboboxConfig) -> Self {
        Self {
            instances: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    /// Start building a combobox for the mount element `mount_id`
    pub fn combobox(&mut self, mount_id: impl Into<String>) -> ComboboxBuilder<'_> {
        ComboboxBuilder {
            registry: self,
            mount_id: mount_id.into(),
            initial: SelectionInput::default(),
            on_change: None,
        }
    }

    /// Create a combobox without a change callback
    ///
    /// Failures are logged and yield `None`; see [`ComboboxBuilder::try_create`].
    pub fn create(
        &mut self,
        doc: &mut Document,
        mount_id: &str,
        initial: impl Into<SelectionInput>,
    ) -> Option<&mut Combobox> {
        self.combobox(mount_id).selected(initial).create(doc)
    }

    pub fn get(&self, mount_id: &str) -> Option<&Combobox> {
        self.instances.get(mount_id)
    }

    pub fn get_mut(&mut self, mount_id: &str) -> Option<&mut Combobox> {
        self.instances.get_mut(mount_id)
    }

    pub fn contains(&self, mount_id: &str) -> bool {
        self.instances.contains_key(mount_id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Mount ids in creation order
    pub fn mount_ids(&self) -> impl Iterator<Item = &str> {
        self.instances.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combobox> {
        self.instances.values()
    }

    /// Deliver an event to every widget
    ///
    /// Every widget sees every event: a click inside one mount is a click-away
    /// for all the others.
    pub fn dispatch(&mut self, doc: &mut Document, event: &DomEvent) -> EventResult {
        self.instances
            .values_mut()
            .fold(EventResult::Ignored, |result, combobox| {
                result.or(combobox.handle_event(doc, event))
            })
    }

    fn insert(
        &mut self,
        doc: &mut Document,
        mount_id: String,
        initial: SelectionInput,
        on_change: Option<ChangeCallback>,
    ) -> Result<&mut Combobox> {
        if self.instances.contains_key(&mount_id) {
            return Err(ComboboxError::AlreadyMounted(mount_id));
        }
        let combobox = Combobox::mount(doc, &mount_id, initial, on_change, &self.config)?;
        Ok(self.instances.entry(mount_id).or_insert(combobox))
    }
}

/// Builder for creating a combobox in a registry with a fluent API
pub struct ComboboxBuilder<'r> {
    registry: &'r mut ComboboxRegistry,
    mount_id: String,
    initial: SelectionInput,
    on_change: Option<ChangeCallback>,
}

impl<'r> ComboboxBuilder<'r> {
    /// Initial selection: a string like `"1,2"` / `"[1, 2]"` or a list of ids
    pub fn selected(mut self, initial: impl Into<SelectionInput>) -> Self {
        self.initial = initial.into();
        self
    }

    /// Set the change callback
    pub fn on_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(callback));
        self
    }

    /// Mount the widget, reporting why it could not be created
    pub fn try_create(self, doc: &mut Document) -> Result<&'r mut Combobox> {
        let ComboboxBuilder {
            registry,
            mount_id,
            initial,
            on_change,
        } = self;
        registry.insert(doc, mount_id, initial, on_change)
    }

    /// Mount the widget; failures are logged and yield `None`
    pub fn create(self, doc: &mut Document) -> Option<&'r mut Combobox> {
        let mount_id = self.mount_id.clone();
        match self.try_create(doc) {
            Ok(combobox) => Some(combobox),
            Err(err) if err.is_duplicate() => {
                tracing::info!("{}", err);
                None
            }
            Err(err) => {
                tracing::error!(mount = %mount_id, "{}", err);
                None
            }
        }
    }
}
