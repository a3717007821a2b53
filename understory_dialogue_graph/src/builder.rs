// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase graph construction with named forward references.
//!
//! Phase one adds nodes, optionally under a name unique within the graph, and
//! links options either to nodes that already exist or to a name that may be
//! declared later. Phase two, [`GraphBuilder::resolve_references`], points
//! every referencing option at its named node. Names that were never declared
//! are reported together.
//!
//! ```
//! use std::sync::Arc;
//! use understory_dialogue::{MenuElement, MenuOption};
//! use understory_dialogue_graph::{Edge, GraphBuilder};
//!
//! let go = Arc::new(MenuOption::new("go", MenuElement::new("Go", "")).unwrap());
//! let mut builder = GraphBuilder::new("tour", MenuElement::new("Hall", ""), Some("a")).unwrap();
//! let start = builder.start();
//! builder.add_reference(&start, Arc::clone(&go), "b").unwrap();
//! let later = builder.add_node(MenuElement::new("Garden", ""), Some("b")).unwrap();
//!
//! let graph = builder.finish().unwrap();
//! assert_eq!(graph.start_node().edge(&go), Some(Edge::Child(later)));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use understory_dialogue::{MenuElement, MenuOption, MenuUnderlay};

use crate::error::GraphError;
use crate::graph::{DirectedGraphUnderlay, GraphNode};
use crate::types::NodeId;

#[derive(Debug)]
struct Pending {
    node: GraphNode,
    option: Arc<MenuOption>,
    target: String,
}

/// Builds a [`DirectedGraphUnderlay`] whose options may reference nodes by name.
#[derive(Debug)]
pub struct GraphBuilder {
    graph: DirectedGraphUnderlay,
    names: HashMap<String, NodeId>,
    pending: Vec<Pending>,
}

impl GraphBuilder {
    /// Start a graph with id `id` and a start node, optionally named.
    pub fn new(
        id: impl Into<String>,
        start_title: MenuElement,
        start_name: Option<&str>,
    ) -> Result<Self, GraphError> {
        let graph = DirectedGraphUnderlay::new(id, start_title)?;
        let mut names = HashMap::new();
        if let Some(name) = start_name {
            names.insert(name.to_owned(), graph.start_node().id());
        }
        Ok(Self {
            graph,
            names,
            pending: Vec::new(),
        })
    }

    /// The start node.
    pub fn start(&self) -> GraphNode {
        self.graph.start_node()
    }

    /// The graph under construction.
    pub fn graph(&self) -> &DirectedGraphUnderlay {
        &self.graph
    }

    /// Add a node, optionally under a name. Names must be unique per graph.
    pub fn add_node(
        &mut self,
        title: MenuElement,
        name: Option<&str>,
    ) -> Result<GraphNode, GraphError> {
        if let Some(name) = name
            && self.names.contains_key(name)
        {
            return Err(GraphError::DuplicateName(name.to_owned()));
        }
        let node = self.graph.add_node(title);
        if let Some(name) = name {
            self.names.insert(name.to_owned(), node.id());
        }
        Ok(node)
    }

    /// The node declared under `name`.
    pub fn named(&self, name: &str) -> Option<GraphNode> {
        self.graph.node(*self.names.get(name)?)
    }

    /// Link `option` of `parent` to `child`, or make it a leaf with `None`.
    ///
    /// See [`GraphNode::add_child`] for ordering.
    pub fn add_child(
        &mut self,
        parent: &GraphNode,
        option: Arc<MenuOption>,
        child: Option<&GraphNode>,
    ) -> Result<(), GraphError> {
        if !self.graph.owns(parent) {
            return Err(GraphError::CrossUnderlay);
        }
        parent.add_child(option, child)
    }

    /// Link `option` of `parent` to the node named `target`, declared now or later.
    ///
    /// The option takes its display position immediately and behaves as a leaf
    /// until [`resolve_references`](Self::resolve_references) runs.
    pub fn add_reference(
        &mut self,
        parent: &GraphNode,
        option: Arc<MenuOption>,
        target: impl Into<String>,
    ) -> Result<(), GraphError> {
        if !self.graph.owns(parent) {
            return Err(GraphError::CrossUnderlay);
        }
        parent.add_child(Arc::clone(&option), None)?;
        self.pending.push(Pending {
            node: parent.clone(),
            option,
            target: target.into(),
        });
        Ok(())
    }

    /// Number of references waiting for resolution.
    pub fn pending_references(&self) -> usize {
        self.pending.len()
    }

    /// Resolve every pending reference. Returns how many were resolved.
    ///
    /// If any target name is undeclared, nothing is resolved and the error
    /// lists every missing name.
    pub fn resolve_references(&mut self) -> Result<usize, GraphError> {
        let mut missing: Vec<String> = self
            .pending
            .iter()
            .filter(|p| !self.names.contains_key(&p.target))
            .map(|p| p.target.clone())
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            missing.dedup();
            return Err(GraphError::UnresolvedReferences {
                graph: self.graph.id().to_owned(),
                names: missing,
            });
        }
        let resolved = self.pending.len();
        for pending in self.pending.drain(..) {
            let target = self.graph.node(self.names[&pending.target]);
            pending.node.set_child(pending.option, target.as_ref())?;
        }
        debug!(graph = self.graph.id(), resolved, "graph references resolved");
        Ok(resolved)
    }

    /// Resolve remaining references and hand out the graph.
    pub fn finish(mut self) -> Result<DirectedGraphUnderlay, GraphError> {
        self.resolve_references()?;
        Ok(self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Edge;

    fn option(id: &str) -> Arc<MenuOption> {
        Arc::new(MenuOption::new(id, MenuElement::new(id, "")).unwrap())
    }

    fn title(name: &str) -> MenuElement {
        MenuElement::new(name, "")
    }

    #[test]
    fn forward_reference_resolves_to_later_node() {
        let to_b = option("to-b");
        let mut builder = GraphBuilder::new("g", title("A"), Some("a")).unwrap();
        let a = builder.start();
        builder.add_reference(&a, Arc::clone(&to_b), "b").unwrap();
        assert_eq!(a.edge(&to_b), Some(Edge::Leaf));

        let b = builder.add_node(title("B"), Some("b")).unwrap();
        assert_eq!(builder.resolve_references(), Ok(1));
        assert_eq!(builder.pending_references(), 0);
        assert_eq!(a.edge(&to_b), Some(Edge::Child(b)));
    }

    #[test]
    fn unresolved_names_are_aggregated() {
        let mut builder = GraphBuilder::new("g", title("A"), Some("a")).unwrap();
        let a = builder.start();
        builder.add_reference(&a, option("x"), "d").unwrap();
        builder.add_reference(&a, option("y"), "c").unwrap();
        builder.add_reference(&a, option("z"), "d").unwrap();
        builder.add_reference(&a, option("w"), "a").unwrap();

        let err = builder.finish().unwrap_err();
        assert_eq!(
            err,
            GraphError::UnresolvedReferences {
                graph: "g".into(),
                names: vec!["c".into(), "d".into()],
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected_on_insert() {
        let mut builder = GraphBuilder::new("g", title("A"), Some("a")).unwrap();
        builder.add_node(title("B"), Some("b")).unwrap();
        assert_eq!(
            builder.add_node(title("B2"), Some("b")).unwrap_err(),
            GraphError::DuplicateName("b".into())
        );
        assert_eq!(
            builder.add_node(title("A2"), Some("a")).unwrap_err(),
            GraphError::DuplicateName("a".into())
        );
        builder.add_node(title("anonymous"), None).unwrap();
        builder.add_node(title("anonymous"), None).unwrap();
        assert_eq!(builder.graph().node_count(), 4);
    }

    #[test]
    fn references_keep_declaration_order_and_allow_cycles() {
        let (first, back, last) = (option("first"), option("back"), option("last"));
        let mut builder = GraphBuilder::new("g", title("A"), Some("a")).unwrap();
        let a = builder.start();
        let leaf = builder.add_node(title("L"), None).unwrap();
        builder.add_child(&a, Arc::clone(&first), Some(&leaf)).unwrap();
        builder.add_reference(&a, Arc::clone(&back), "a").unwrap();
        builder.add_child(&a, Arc::clone(&last), None).unwrap();

        let graph = builder.finish().unwrap();
        let start = graph.start_node();
        let ids: Vec<_> = start.options().iter().map(|o| o.id().to_owned()).collect();
        assert_eq!(ids, vec!["first", "back", "last"]);
        assert_eq!(start.edge(&back), Some(Edge::Child(start.clone())));
    }

    #[test]
    fn foreign_parents_are_rejected() {
        let other = DirectedGraphUnderlay::new("other", title("O")).unwrap();
        let mut builder = GraphBuilder::new("g", title("A"), None).unwrap();
        let foreign = other.start_node();
        assert_eq!(
            builder.add_reference(&foreign, option("x"), "a"),
            Err(GraphError::CrossUnderlay)
        );
        assert_eq!(
            builder.add_child(&foreign, option("x"), None),
            Err(GraphError::CrossUnderlay)
        );
        assert!(builder.named("a").is_none());
        assert_eq!(
            GraphBuilder::new("", title("A"), None).unwrap_err(),
            GraphError::EmptyId
        );
    }
}
