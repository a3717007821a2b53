// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph description with forward references.
//!
//! Parses a JSON description in which the start node links to a node that is
//! only declared later, deeper in the tree, and every branch cycles back to
//! the start. The graph is loaded into a context, inspected, and walked.
//!
//! Run:
//! - `cargo run -p understory_dialogue_demos --example graph_forward_refs`

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use understory_dialogue::{Menu, MenuContext, MenuElement, MenuOption, Named};
use understory_dialogue_graph::{DirectedGraphUnderlay, Edge, NodeSpec, load_graph};

const TOUR: &str = r#"{
    "name": "hall",
    "title": { "name": "Hall", "description": "Where the tour starts" },
    "options": [
        { "option": "garden", "child": { "goto": "garden" } },
        { "option": "cellar", "child": { "node": {
            "name": "cellar",
            "title": { "name": "Cellar", "icon": "barrel" },
            "options": [
                { "option": "up", "child": { "goto": "hall" } },
                { "option": "garden", "child": { "node": {
                    "name": "garden",
                    "title": { "name": "Garden", "color": "green" },
                    "options": [ { "option": "up", "child": { "goto": "hall" } } ]
                } } }
            ]
        } } },
        { "option": "exit" }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let context = Arc::new(MenuContext::new());
    for id in ["garden", "cellar", "up", "exit"] {
        context
            .options()
            .register(MenuOption::new(id, MenuElement::new(id, ""))?)?;
    }

    // The hall links to the garden before the cellar declares it.
    let tour: NodeSpec = serde_json::from_str(TOUR)?;
    let graph: Arc<DirectedGraphUnderlay> = load_graph(&context, "tour", &tour)?;
    println!("nodes: {}", graph.node_count());
    for (option, edge) in graph.start_node().edges() {
        match edge {
            Edge::Child(node) => println!("  {} -> {}", option.id(), node.title().name()),
            Edge::Leaf => println!("  {} -> (end)", option.id()),
        }
    }

    let mut menu = Menu::new(&context, graph, None)?;
    for step in ["garden", "up", "cellar", "garden", "up", "exit"] {
        let response = menu.select_id(step);
        let at = menu
            .current_stage()
            .map_or_else(|| "(finished)".to_owned(), |s| s.title().name().to_string());
        println!("{step:>8}: {response:?}, now at {at}");
    }
    Ok(())
}
