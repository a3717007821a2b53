// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node handles and edge kinds.

use core::fmt;

use crate::graph::GraphNode;

/// Index of a node in its underlay's arena.
///
/// Nodes are never freed while the underlay lives, so a `NodeId` stays valid
/// for the underlay's whole lifetime. It is only meaningful for the underlay
/// that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn from_idx(idx: usize) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The raw arena index.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Where an option of a node leads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Selecting the option moves to this node.
    Child(GraphNode),
    /// Selecting the option ends the dialogue.
    Leaf,
}

impl Edge {
    /// The destination node, if the edge is not a leaf.
    pub fn child(&self) -> Option<&GraphNode> {
        match self {
            Self::Child(node) => Some(node),
            Self::Leaf => None,
        }
    }

    /// Whether selecting the option ends the dialogue.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf)
    }
}
