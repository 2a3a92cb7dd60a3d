//! tagpick Core
//!
//! DOM-free logic behind the tagpick multi-select combobox:
//!
//! - **Selection**: per-candidate state machine and the authoritative ordered
//!   selection set, plus canonicalization of host-supplied selection strings
//! - **Search Filter**: case-insensitive substring matching over labels
//! - **Placement**: the heuristic choosing where the dropdown panel opens
//! - **Configuration**: geometry metrics and markup tokens, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use tagpick_core::{compute_placement, ComboboxMetrics, Placement, PlacementInput};
//!
//! let input = PlacementInput {
//!     rows: 5,
//!     viewport_height: 800.0,
//!     anchor_top: 100.0,
//!     anchor_height: 40.0,
//! };
//! assert_eq!(compute_placement(&input, &ComboboxMetrics::default()), Placement::Natural);
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod placement;
pub mod selection;

pub use config::{ComboboxConfig, ComboboxMetrics};
pub use error::{ComboboxError, Result};
pub use filter::SearchFilter;
pub use placement::{compute_placement, Placement, PlacementInput};
pub use selection::{
    canonicalize, selection_events, ItemState, Selection, SelectionInput, StateTransitions,
};
