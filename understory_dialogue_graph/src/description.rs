// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative graph descriptions.
//!
//! A [`NodeSpec`] tree is what a configuration loader hands to the engine.
//! Each option names a registered [`MenuOption`](understory_dialogue::MenuOption)
//! and says where it leads: nowhere (a leaf), to a child described inline, or
//! to a node named elsewhere in the same tree (a forward or cyclic reference).
//!
//! With the `serde` feature the types deserialize from any serde format. In
//! JSON a destination is written `{"goto": "name"}` or `{"node": { ... }}`:
//!
//! ```
//! # #[cfg(feature = "serde")]
//! # {
//! use understory_dialogue_graph::{ChildSpec, NodeSpec};
//!
//! let spec: NodeSpec = serde_json::from_str(r#"{
//!     "name": "a",
//!     "title": { "name": "menu.start" },
//!     "options": [
//!         { "option": "again", "child": { "goto": "a" } },
//!         { "option": "quit" }
//!     ]
//! }"#).unwrap();
//! assert_eq!(spec.options[0].child, Some(ChildSpec::Goto("a".into())));
//! # }
//! ```

use std::sync::Arc;

use understory_dialogue::{ColorHint, IconHint, MenuContext, MenuElement, OptionTable};

use crate::builder::GraphBuilder;
use crate::error::GraphError;
use crate::graph::{DirectedGraphUnderlay, GraphNode};

/// Title of a described node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TitleSpec {
    /// Text key of the title.
    pub name: String,
    /// Text key of the longer description.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Optional color hint.
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
    /// Optional icon hint.
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: Option<String>,
}

impl TitleSpec {
    fn to_element(&self) -> MenuElement {
        let mut element = MenuElement::new(self.name.as_str(), self.description.as_str());
        if let Some(color) = &self.color {
            element = element.with_color(ColorHint::new(color.as_str()));
        }
        if let Some(icon) = &self.icon {
            element = element.with_icon(IconHint::new(icon.as_str()));
        }
        element
    }
}

/// Where a described option leads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChildSpec {
    /// The node declared under this name anywhere in the tree.
    Goto(String),
    /// A node described inline.
    Node(Box<NodeSpec>),
}

/// One option of a described node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    /// Id of a registered option.
    pub option: String,
    /// Destination; `None` ends the dialogue.
    #[cfg_attr(feature = "serde", serde(default))]
    pub child: Option<ChildSpec>,
}

/// A described node and, recursively, its inline children.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpec {
    /// Name other options can reference; unique within one tree.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// The node's title.
    pub title: TitleSpec,
    /// Options in display order. Must not be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<OptionSpec>,
}

impl NodeSpec {
    fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None if !self.title.name.is_empty() => self.title.name.clone(),
            None => "<unnamed>".to_owned(),
        }
    }

    fn validate(&self) -> Result<(), GraphError> {
        if self.title.name.is_empty() {
            return Err(GraphError::MissingTitle(self.label()));
        }
        if self.options.is_empty() {
            return Err(GraphError::EmptyNode(self.label()));
        }
        Ok(())
    }
}

/// Build a graph from a description, looking options up in `options`.
///
/// Fails on unknown option ids, empty nodes or titles, duplicate names, and
/// references to names that are never declared.
pub fn build_graph(
    options: &OptionTable,
    id: &str,
    root: &NodeSpec,
) -> Result<DirectedGraphUnderlay, GraphError> {
    root.validate()?;
    let mut builder = GraphBuilder::new(id, root.title.to_element(), root.name.as_deref())?;
    let start = builder.start();
    populate(&mut builder, options, &start, root)?;
    builder.finish()
}

fn populate(
    builder: &mut GraphBuilder,
    options: &OptionTable,
    node: &GraphNode,
    spec: &NodeSpec,
) -> Result<(), GraphError> {
    for entry in &spec.options {
        let option = options
            .get(&entry.option)
            .ok_or_else(|| GraphError::UnknownOption(entry.option.clone()))?;
        match &entry.child {
            None => builder.add_child(node, option, None)?,
            Some(ChildSpec::Goto(target)) => {
                builder.add_reference(node, option, target.as_str())?;
            }
            Some(ChildSpec::Node(child_spec)) => {
                child_spec.validate()?;
                let child =
                    builder.add_node(child_spec.title.to_element(), child_spec.name.as_deref())?;
                builder.add_child(node, option, Some(&child))?;
                populate(builder, options, &child, child_spec)?;
            }
        }
    }
    Ok(())
}

/// Build a graph with the context's options and register it with the context.
///
/// Nothing is registered if building fails.
pub fn load_graph(
    context: &MenuContext,
    id: &str,
    root: &NodeSpec,
) -> Result<Arc<DirectedGraphUnderlay>, GraphError> {
    let graph = Arc::new(build_graph(context.options(), id, root)?);
    context.underlays().register(Arc::clone(&graph))?;
    Ok(graph)
}
