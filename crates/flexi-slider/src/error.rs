#![forbid(unsafe_code)]

//! Configuration and protection errors.
//!
//! None of these are fatal. The engine logs each one where it happens and
//! stays in its last-known-good (or default) state; the `Err` handed back
//! to the caller is informational.

use crate::settings::{OptionName, ValueKind};
use flexi_layout::LayoutError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Name does not match any option.
    #[error("unknown option {0:?}")]
    UnknownOption(String),
    /// Name does not match any command.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    /// Option exists but may not be set from outside.
    #[error("the option \"{0}\" cannot be set")]
    Protected(OptionName),
    /// Value of the wrong kind for the option.
    #[error("option \"{name}\" expects {expected}, got {found}")]
    TypeMismatch {
        name: OptionName,
        expected: ValueKind,
        found: ValueKind,
    },
    /// A selector resolved to no element.
    #[error("{option} selector {selector:?} not found")]
    SelectorNotFound { option: OptionName, selector: String },
    /// `layout` was not a non-empty list; defaults were applied instead.
    #[error("wrong layouts set, falling back to defaults: need a non-empty list")]
    InvalidLayoutList,
    /// `layout` list was rejected; previous layouts are kept.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
