//! Components built on tagpick_dom primitives
//!
//! Each component follows a consistent pattern:
//! - Markup builder function (e.g., `mount("colors")`)
//! - Fluent builder on the registry (e.g., `registry.combobox("colors")`)
//! - Widget type operating on a `&mut Document`

pub mod combobox;
pub mod markup;
pub mod registry;

pub use combobox::{ChangeCallback, Combobox, DeselectKey};
pub use markup::{classes, mount, MountBuilder, CHIP_VALUE_ATTR};
pub use registry::{ComboboxBuilder, ComboboxRegistry};
