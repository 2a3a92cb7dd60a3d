//! # tagpick Component Library (tagpick_cn)
//!
//! A multi-select tag combobox: a dropdown of checkboxes with a search box and
//! a tag panel of removable chips, mirrored into a hidden form field.
//!
//! ## Layers
//!
//! - **Core**: `tagpick_core` holds the selection state machine, search
//!   matching, placement heuristic and configuration
//! - **Document**: `tagpick_dom` provides the element tree the widget binds to
//! - **Components**: `tagpick_cn` binds the two, one widget per mount point
//!
//! ## Example
//!
//! ```rust
//! use tagpick_cn::prelude::*;
//! use tagpick_dom::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! cn::mount("colors")
//!     .name("color_ids")
//!     .option("1", "Red")
//!     .option("2", "Blue")
//!     .build(&mut doc, root)
//!     .unwrap();
//!
//! let mut registry = ComboboxRegistry::new();
//! let colors = registry
//!     .combobox("colors")
//!     .selected("[2]")
//!     .create(&mut doc)
//!     .unwrap();
//!
//! colors.select(&mut doc, "1");
//! assert_eq!(colors.hidden_value(&doc), "2,1");
//!
//! colors.deselect(&mut doc, "Blue");
//! assert_eq!(colors.selected_items(), vec!["1".to_string()]);
//! ```

pub mod components;

pub use components::*;

/// Convenience module for accessing components with `cn::` prefix
pub mod cn {
    pub use crate::components::markup::mount;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cn;
    pub use crate::components::combobox::{ChangeCallback, Combobox, DeselectKey};
    pub use crate::components::markup::{classes, MountBuilder};
    pub use crate::components::registry::{ComboboxBuilder, ComboboxRegistry};
    // Re-export commonly needed core types
    pub use tagpick_core::{ComboboxConfig, ComboboxMetrics, Placement, SelectionInput};
}
