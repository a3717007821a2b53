// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time faults and node-level selection failures.
//!
//! Selection outcomes seen by a caller of [`Menu::select`](crate::menu::Menu::select)
//! are never errors; they are reported through [`MenuResponse`](crate::types::MenuResponse).
//! The types here cover structural misuse that must be fixed by the caller.

use thiserror::Error;

/// Fatal misuse reported while building or wiring dialogue objects.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    /// The underlay had no start node for the requesting menu.
    #[error("underlay `{underlay}` provided no start node")]
    NoStart {
        /// Id of the underlay that was asked.
        underlay: String,
    },
    /// The underlay refused to track the new menu.
    #[error("underlay `{underlay}` rejected the menu")]
    UnderlayRejected {
        /// Id of the underlay that refused.
        underlay: String,
    },
    /// An identifier was empty.
    #[error("identifier cannot be empty")]
    EmptyId,
    /// An option with the same id is already registered.
    #[error("option `{0}` is already registered")]
    DuplicateOption(String),
    /// An underlay with the same id is already registered.
    #[error("underlay `{0}` is already registered")]
    DuplicateUnderlay(String),
    /// A stage index outside `[0, len)`.
    #[error("option index {index} out of range for a stage of {len} options")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of options in the stage.
        len: usize,
    },
    /// The interface is already linked to another menu.
    #[error("interface is already attached to another menu")]
    InterfaceInUse,
}

/// Failure returned by [`UnderlayNode::next`](crate::underlay::UnderlayNode::next).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The option is not one of the node's current options.
    #[error("option is not part of this node")]
    InvalidSelection,
    /// Any other failure inside the underlay.
    #[error("underlay failure: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = MenuError::NoStart {
            underlay: "shop".into(),
        };
        assert_eq!(err.to_string(), "underlay `shop` provided no start node");
        let err = MenuError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "option index 4 out of range for a stage of 2 options"
        );
        assert_eq!(
            SelectionError::Failed("stale".into()).to_string(),
            "underlay failure: stale"
        );
    }
}
