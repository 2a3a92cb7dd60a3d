//! Combobox error types

use thiserror::Error;

/// Errors that can occur while mounting or configuring a combobox
///
/// None of these escape the public `create` path: they are logged and the
/// construction is abandoned. `try_create` hands them to callers that care.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComboboxError {
    /// Mount id was empty
    #[error("Invalid argument to create combobox: id of an element is expected")]
    InvalidMountId,

    /// No attached element carries the mount id
    #[error("Element with id \"{0}\" is not found")]
    MountNotFound(String),

    /// A widget is already bound to this mount point
    #[error("Combobox already exists for #{0}")]
    AlreadyMounted(String),

    /// Mount markup lacks a part the widget binds to
    #[error("Mount #{mount} is missing its {part}")]
    MissingPart {
        /// Mount id
        mount: String,
        /// Human-readable part name ("tag panel", "boundary marker", ...)
        part: &'static str,
    },

    /// Document mutation failed while binding
    #[error("Document error: {0}")]
    Document(String),

    /// Configuration could not be parsed
    #[error("Invalid combobox configuration: {0}")]
    Config(String),
}

impl ComboboxError {
    /// Duplicate initialization is informational, everything else is a misconfiguration
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ComboboxError::AlreadyMounted(_))
    }
}

/// Result type for combobox operations
pub type Result<T> = std::result::Result<T, ComboboxError>;
