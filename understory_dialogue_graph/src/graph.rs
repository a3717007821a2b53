// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed directed graph of stages.
//!
//! ## Structure
//!
//! Every node keeps its options in display order, each pointing either at a
//! child node or at the end of the dialogue (a leaf). The node's
//! [`MenuStage`] is rebuilt whenever its option list or title changes, so menus
//! sitting on a node keep a consistent snapshot until they move.
//!
//! ## Rewiring
//!
//! The graph stays mutable while menus traverse it. Two insertion operations
//! exist on purpose:
//!
//! - [`GraphNode::add_child`] re-inserts: an option already present moves to the
//!   end of the display order.
//! - [`GraphNode::set_child`] overwrites in place and only appends when the
//!   option is new.
//!
//! Cycles are allowed and not checked. Reachability from the start node is not
//! maintained either: a node cut off by [`DirectedGraphUnderlay::detach`] or
//! [`GraphNode::remove_option`] stays in the arena until the underlay drops.
//! [`DirectedGraphUnderlay::unreachable_nodes`] reports such nodes; pruning
//! them is up to the caller.
//!
//! ## Locking
//!
//! One read-write lock guards the arena. It is held only for the duration of
//! a single query or mutation.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;
use understory_dialogue::{
    MenuElement, MenuId, MenuOption, MenuStage, MenuUnderlay, MenuView, SelectionError,
    UnderlayNode,
};

use crate::error::GraphError;
use crate::types::{Edge, NodeId};

struct NodeData {
    title: MenuElement,
    edges: Vec<(Arc<MenuOption>, Option<NodeId>)>,
    stage: Arc<MenuStage>,
}

impl NodeData {
    fn new(title: MenuElement) -> Self {
        let stage = Arc::new(MenuStage::new(title.clone(), []));
        Self {
            title,
            edges: Vec::new(),
            stage,
        }
    }

    fn position(&self, option: &Arc<MenuOption>) -> Option<usize> {
        self.edges
            .iter()
            .position(|(o, _)| MenuOption::same(o, option))
    }

    fn refresh(&mut self) {
        self.stage = Arc::new(MenuStage::new(
            self.title.clone(),
            self.edges.iter().map(|(o, _)| Arc::clone(o)),
        ));
    }
}

#[derive(Default)]
struct Arena {
    nodes: RwLock<Vec<NodeData>>,
}

impl Arena {
    fn read(&self) -> RwLockReadGuard<'_, Vec<NodeData>> {
        self.nodes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<NodeData>> {
        self.nodes.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, title: MenuElement) -> NodeId {
        let mut nodes = self.write();
        nodes.push(NodeData::new(title));
        NodeId::from_idx(nodes.len() - 1)
    }
}

/// Handle to one node of a [`DirectedGraphUnderlay`].
///
/// Cloning is cheap. Two handles are equal when they name the same node of the
/// same underlay.
#[derive(Clone)]
pub struct GraphNode {
    arena: Arc<Arena>,
    id: NodeId,
}

impl fmt::Debug for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphNode")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.arena, &other.arena) && self.id == other.id
    }
}

impl Eq for GraphNode {}

impl Hash for GraphNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::ptr::hash(Arc::as_ptr(&self.arena), state);
        self.id.hash(state);
    }
}

impl GraphNode {
    fn handle(&self, id: NodeId) -> Self {
        Self {
            arena: Arc::clone(&self.arena),
            id,
        }
    }

    fn destination(&self, child: Option<&Self>) -> Result<Option<NodeId>, GraphError> {
        match child {
            Some(child) if !Arc::ptr_eq(&child.arena, &self.arena) => {
                Err(GraphError::CrossUnderlay)
            }
            Some(child) => Ok(Some(child.id)),
            None => Ok(None),
        }
    }

    /// The node's arena index.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Add `option`, leading to `child` or ending the dialogue when `None`.
    ///
    /// If the option is already present it is moved to the end of the display
    /// order with the new destination.
    pub fn add_child(
        &self,
        option: Arc<MenuOption>,
        child: Option<&Self>,
    ) -> Result<(), GraphError> {
        let destination = self.destination(child)?;
        let mut nodes = self.arena.write();
        let node = &mut nodes[self.id.idx()];
        if let Some(i) = node.position(&option) {
            node.edges.remove(i);
        }
        node.edges.push((option, destination));
        node.refresh();
        Ok(())
    }

    /// Point `option` at `child`, keeping its display position.
    ///
    /// A new option is appended.
    pub fn set_child(
        &self,
        option: Arc<MenuOption>,
        child: Option<&Self>,
    ) -> Result<(), GraphError> {
        let destination = self.destination(child)?;
        let mut nodes = self.arena.write();
        let node = &mut nodes[self.id.idx()];
        match node.position(&option) {
            Some(i) => node.edges[i].1 = destination,
            None => {
                node.edges.push((option, destination));
                node.refresh();
            }
        }
        Ok(())
    }

    /// Remove `option`, whether it led to a child or was a leaf.
    pub fn remove_option(&self, option: &Arc<MenuOption>) -> bool {
        let mut nodes = self.arena.write();
        let node = &mut nodes[self.id.idx()];
        let Some(i) = node.position(option) else {
            return false;
        };
        node.edges.remove(i);
        node.refresh();
        true
    }

    /// Where `option` leads from this node, or `None` if the node lacks it.
    pub fn edge(&self, option: &Arc<MenuOption>) -> Option<Edge> {
        let nodes = self.arena.read();
        let node = &nodes[self.id.idx()];
        let i = node.position(option)?;
        Some(match node.edges[i].1 {
            Some(child) => Edge::Child(self.handle(child)),
            None => Edge::Leaf,
        })
    }

    /// Every option with its destination, in display order.
    pub fn edges(&self) -> Vec<(Arc<MenuOption>, Edge)> {
        let nodes = self.arena.read();
        nodes[self.id.idx()]
            .edges
            .iter()
            .map(|(option, dest)| {
                let edge = match dest {
                    Some(child) => Edge::Child(self.handle(*child)),
                    None => Edge::Leaf,
                };
                (Arc::clone(option), edge)
            })
            .collect()
    }

    /// The options in display order.
    pub fn options(&self) -> Vec<Arc<MenuOption>> {
        let nodes = self.arena.read();
        nodes[self.id.idx()]
            .edges
            .iter()
            .map(|(o, _)| Arc::clone(o))
            .collect()
    }

    /// The cached stage.
    pub fn stage(&self) -> Arc<MenuStage> {
        Arc::clone(&self.arena.read()[self.id.idx()].stage)
    }

    /// The node's title.
    pub fn title(&self) -> MenuElement {
        self.arena.read()[self.id.idx()].title.clone()
    }

    /// Replace the title and rebuild the stage.
    pub fn set_title(&self, title: MenuElement) {
        let mut nodes = self.arena.write();
        let node = &mut nodes[self.id.idx()];
        node.title = title;
        node.refresh();
    }
}

impl UnderlayNode for GraphNode {
    fn stage(&self, _menu: &MenuView<'_>) -> Arc<MenuStage> {
        Self::stage(self)
    }

    fn next(
        &self,
        _menu: &MenuView<'_>,
        option: &Arc<MenuOption>,
    ) -> Result<Option<Self>, SelectionError> {
        match self.edge(option) {
            Some(Edge::Child(child)) => Ok(Some(child)),
            Some(Edge::Leaf) => Ok(None),
            None => Err(SelectionError::InvalidSelection),
        }
    }
}

/// A dialogue realized as an explicit, mutable graph of nodes.
pub struct DirectedGraphUnderlay {
    id: String,
    arena: Arc<Arena>,
    start: NodeId,
    menus: Mutex<HashSet<MenuId>>,
}

impl fmt::Debug for DirectedGraphUnderlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectedGraphUnderlay")
            .field("id", &self.id)
            .field("start", &self.start)
            .field("nodes", &self.node_count())
            .field("menus", &self.menus().len())
            .finish_non_exhaustive()
    }
}

impl DirectedGraphUnderlay {
    /// Create a graph holding only a start node titled `start_title`.
    pub fn new(id: impl Into<String>, start_title: MenuElement) -> Result<Self, GraphError> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphError::EmptyId);
        }
        let arena = Arc::new(Arena::default());
        let start = arena.push(start_title);
        Ok(Self {
            id,
            arena,
            start,
            menus: Mutex::new(HashSet::new()),
        })
    }

    fn handle(&self, id: NodeId) -> GraphNode {
        GraphNode {
            arena: Arc::clone(&self.arena),
            id,
        }
    }

    /// The node every menu starts at.
    pub fn start_node(&self) -> GraphNode {
        self.handle(self.start)
    }

    /// Add a node with no options. Link it with [`GraphNode::add_child`].
    pub fn add_node(&self, title: MenuElement) -> GraphNode {
        self.handle(self.arena.push(title))
    }

    /// The node at `id`, if this underlay issued it.
    pub fn node(&self, id: NodeId) -> Option<GraphNode> {
        (id.idx() < self.node_count()).then(|| self.handle(id))
    }

    /// Number of nodes, reachable or not.
    pub fn node_count(&self) -> usize {
        self.arena.read().len()
    }

    /// Whether `node` belongs to this underlay.
    pub fn owns(&self, node: &GraphNode) -> bool {
        Arc::ptr_eq(&self.arena, &node.arena)
    }

    /// Nodes with at least one option leading to `node`, by id.
    pub fn parents_of(&self, node: &GraphNode) -> Vec<GraphNode> {
        if !self.owns(node) {
            return Vec::new();
        }
        let nodes = self.arena.read();
        (0..nodes.len())
            .filter(|&i| nodes[i].edges.iter().any(|(_, d)| *d == Some(node.id)))
            .map(|i| self.handle(NodeId::from_idx(i)))
            .collect()
    }

    /// Remove every option leading to `node`. Returns how many were removed.
    ///
    /// The node itself stays in the arena.
    pub fn detach(&self, node: &GraphNode) -> usize {
        if !self.owns(node) {
            return 0;
        }
        let mut nodes = self.arena.write();
        let mut removed = 0;
        for data in nodes.iter_mut() {
            let before = data.edges.len();
            data.edges.retain(|(_, d)| *d != Some(node.id));
            if data.edges.len() != before {
                removed += before - data.edges.len();
                data.refresh();
            }
        }
        debug!(graph = %self.id, node = %node.id, removed, "node detached");
        removed
    }

    /// Nodes that cannot be reached from the start node, by id.
    pub fn unreachable_nodes(&self) -> Vec<GraphNode> {
        let nodes = self.arena.read();
        let mut seen = vec![false; nodes.len()];
        let mut queue = VecDeque::from([self.start]);
        seen[self.start.idx()] = true;
        while let Some(id) = queue.pop_front() {
            for child in nodes[id.idx()].edges.iter().filter_map(|(_, d)| *d) {
                if !seen[child.idx()] {
                    seen[child.idx()] = true;
                    queue.push_back(child);
                }
            }
        }
        seen.iter()
            .enumerate()
            .filter(|(_, reached)| !**reached)
            .map(|(i, _)| self.handle(NodeId::from_idx(i)))
            .collect()
    }

    fn lock_menus(&self) -> std::sync::MutexGuard<'_, HashSet<MenuId>> {
        self.menus.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MenuUnderlay for DirectedGraphUnderlay {
    type Node = GraphNode;

    fn id(&self) -> &str {
        &self.id
    }

    fn start(&self, _menu: &MenuView<'_>) -> Option<GraphNode> {
        Some(self.start_node())
    }

    fn add_menu(&self, menu: &MenuView<'_>) -> bool {
        menu.underlay_id() == self.id && self.lock_menus().insert(menu.id())
    }

    fn remove_menu(&self, menu: MenuId) -> bool {
        self.lock_menus().remove(&menu)
    }

    fn menus(&self) -> Vec<MenuId> {
        let mut menus: Vec<_> = self.lock_menus().iter().copied().collect();
        menus.sort_unstable();
        menus
    }
}
