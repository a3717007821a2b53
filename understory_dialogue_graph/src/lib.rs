// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Dialogue Graph: the directed-graph underlay for `understory_dialogue`.
//!
//! ## Overview
//!
//! A [`DirectedGraphUnderlay`](crate::graph::DirectedGraphUnderlay) realizes a dialogue as an explicit graph.
//! Nodes live in an arena and are addressed by [`NodeId`](crate::types::NodeId); a [`GraphNode`](crate::graph::GraphNode) is a cheap handle to one of them.
//! Each node lists its options in display order, and every option either leads to a child node or ends the dialogue.
//! Cycles are allowed.
//!
//! ## Building
//!
//! - Directly: create the underlay, add nodes, and link them with [`GraphNode::add_child`](crate::graph::GraphNode::add_child)
//!   or [`GraphNode::set_child`](crate::graph::GraphNode::set_child).
//! - By name: [`GraphBuilder`](crate::builder::GraphBuilder) lets options reference nodes that are declared later,
//!   and resolves them all at once.
//! - From a description: [`build_graph`](crate::description::build_graph) and [`load_graph`](crate::description::load_graph)
//!   turn a [`NodeSpec`](crate::description::NodeSpec) tree into a graph. With the default `serde` feature the
//!   description types deserialize from configuration files.
//!
//! ## Traversal
//!
//! The underlay plugs into [`understory_dialogue::Menu`]:
//!
//! ```
//! use std::sync::Arc;
//! use understory_dialogue::{Menu, MenuContext, MenuElement, MenuOption, MenuResponse};
//! use understory_dialogue_graph::DirectedGraphUnderlay;
//!
//! let context = Arc::new(MenuContext::new());
//! let register = |id: &str| {
//!     context
//!         .options()
//!         .register(MenuOption::new(id, MenuElement::new(id, "")).unwrap())
//!         .unwrap()
//! };
//! let (yes, no, back) = (register("yes"), register("no"), register("back"));
//!
//! let graph = Arc::new(DirectedGraphUnderlay::new("ask", MenuElement::new("Sure?", "")).unwrap());
//! let second = graph.add_node(MenuElement::new("Really?", ""));
//! graph.start_node().add_child(yes, None).unwrap();
//! graph.start_node().add_child(Arc::clone(&no), Some(&second)).unwrap();
//! second.add_child(Arc::clone(&back), None).unwrap();
//!
//! let mut menu = Menu::new(&context, graph, None).unwrap();
//! assert_eq!(menu.select(&no), MenuResponse::Continue);
//! assert_eq!(menu.select(&back), MenuResponse::Finished);
//! assert_eq!(menu.select(&no), MenuResponse::PreviouslyFinished);
//! ```
//!
//! ## Reachability
//!
//! Nodes are never freed while their underlay lives. Detaching a node leaves it in the arena;
//! [`DirectedGraphUnderlay::unreachable_nodes`](crate::graph::DirectedGraphUnderlay::unreachable_nodes)
//! lists such nodes, and keeping the graph connected is the caller's job.

pub mod builder;
pub mod description;
pub mod error;
pub mod graph;
pub mod types;

pub use builder::GraphBuilder;
pub use description::{ChildSpec, NodeSpec, OptionSpec, TitleSpec, build_graph, load_graph};
pub use error::GraphError;
pub use graph::{DirectedGraphUnderlay, GraphNode};
pub use types::{Edge, NodeId};
