//! tagpick Headless Document
//!
//! A small in-memory element tree standing in for the browser DOM. Widgets in
//! `tagpick_cn` query and mutate it exactly as they would a page, which lets
//! hosts drive them headlessly and lets tests observe every visual surface.
//!
//! - **Tree**: slotmap-backed nodes with tag, classes, attributes, text,
//!   form value, checked state, visibility, inline style and bounds
//! - **Queries**: document-order search with composable [`Matcher`]s
//! - **Events**: click / key-up / input / search delivered to a target node
//!
//! # Example
//!
//! ```rust
//! use tagpick_dom::{Document, Matcher};
//!
//! let mut doc = Document::new();
//! let list = doc.create_element("ul");
//! doc.set_attr(list, "id", "fruits").unwrap();
//! doc.append_child(doc.root(), list).unwrap();
//!
//! let item = doc.create_element("li");
//! doc.set_text(item, "Apple").unwrap();
//! doc.append_child(list, item).unwrap();
//!
//! let found = doc.get_element_by_id("fruits").unwrap();
//! assert_eq!(doc.find_first(found, &Matcher::tag("li")), Some(item));
//! assert_eq!(doc.text_content(found), "Apple");
//! ```

pub mod error;
pub mod event;
pub mod query;
pub mod registry;
pub mod tree;

pub use error::{DomError, Result};
pub use event::{DomEvent, DomEventKind, EventResult};
pub use query::Matcher;
pub use registry::IdIndex;
pub use tree::{Document, Node, NodeId, Rect};
