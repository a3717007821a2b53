// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph construction errors.

use thiserror::Error;
use understory_dialogue::MenuError;

/// Fatal misuse while building or wiring a graph.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The underlay id was empty.
    #[error("graph id cannot be empty")]
    EmptyId,
    /// The nodes belong to different underlays.
    #[error("nodes of different underlays cannot be linked")]
    CrossUnderlay,
    /// A node name was declared twice in one graph.
    #[error("node name `{0}` is already used in this graph")]
    DuplicateName(String),
    /// References to names that no node declares.
    #[error("graph `{graph}` references undeclared nodes: {}", names.join(", "))]
    UnresolvedReferences {
        /// Id of the graph being built.
        graph: String,
        /// The missing names, sorted and without duplicates.
        names: Vec<String>,
    },
    /// A description named an option that is not registered.
    #[error("option `{0}` is not registered")]
    UnknownOption(String),
    /// A described node has no options.
    #[error("node `{0}` declares no options")]
    EmptyNode(String),
    /// A described node has an empty title name.
    #[error("node `{0}` has no title")]
    MissingTitle(String),
    /// Registering the finished graph failed.
    #[error(transparent)]
    Registry(#[from] MenuError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_names_are_listed() {
        let err = GraphError::UnresolvedReferences {
            graph: "shop".into(),
            names: vec!["c".into(), "d".into()],
        };
        assert_eq!(
            err.to_string(),
            "graph `shop` references undeclared nodes: c, d"
        );
        let err = GraphError::from(MenuError::DuplicateUnderlay("shop".into()));
        assert_eq!(err.to_string(), "underlay `shop` is already registered");
    }
}
