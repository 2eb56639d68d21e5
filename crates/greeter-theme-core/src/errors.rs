//! Error types for the greeter theme engine.

use std::path::PathBuf;

use thiserror::Error;

/// Violations of item tree invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Duplicate item id: {id}")]
    DuplicateId { id: String },

    #[error("An item cannot have both fixed and box children")]
    MixedChildren,
}

/// Errors while loading a theme document. Any of these aborts the parse;
/// no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Cannot read theme file {}: {reason}", .path.display())]
    NoFile { path: PathBuf, reason: String },

    #[error("Malformed theme document: {0}")]
    BadXml(String),

    #[error("Not a greeter theme: root element is <{found}>")]
    WrongDocumentType { found: String },

    #[error("Bad value for `{attribute}`: {value}")]
    BadSpec { attribute: String, value: String },

    #[error("Item without a `type` attribute")]
    MissingType,

    #[error("Unknown item type: {name}")]
    UnknownItemType { name: String },

    #[error("{item} item requires a <{child}> element")]
    MissingRequiredChild { item: String, child: String },

    #[error("Duplicate item id: {id}")]
    DuplicateId { id: String },
}

impl ParseError {
    pub fn bad_spec(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        ParseError::BadSpec {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl From<TreeError> for ParseError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::DuplicateId { id } => ParseError::DuplicateId { id },
            TreeError::MixedChildren => {
                ParseError::bad_spec("fixed", "an item cannot have both fixed and box children")
            }
        }
    }
}
