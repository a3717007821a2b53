// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Console dialogue.
//!
//! Builds a small shop graph by hand, attaches a display adapter that prints
//! each stage, and drives the menu with a scripted sequence of choices,
//! including one undo. A listener at `Monitor` priority logs every purchase.
//!
//! Run:
//! - `cargo run -p understory_dialogue_demos --example console_dialogue`
//! - `RUST_LOG=debug cargo run -p understory_dialogue_demos --example console_dialogue`

use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use understory_dialogue::{
    DisplayAdapter, ListenerPriority, Menu, MenuContext, MenuElement, MenuError, MenuInterface,
    MenuListener, MenuOption, MenuStage, Named, SelectEvent, UserId,
};
use understory_dialogue_graph::DirectedGraphUnderlay;

struct Console;

impl DisplayAdapter for Console {
    fn max_options(&self) -> usize {
        9
    }

    fn on_stage_changed(&self, stage: Option<&Arc<MenuStage>>) {
        let Some(stage) = stage else {
            println!("  (display cleared)");
            return;
        };
        println!("== {} ==", stage.title().name());
        for (i, option) in stage.iter().enumerate() {
            println!("  [{}] {}", i + 1, option.name());
        }
    }

    fn on_closed(&self) {
        println!("  (display closed)");
    }
}

struct Receipt;

impl MenuListener for Receipt {
    fn on_select(&self, event: &SelectEvent<'_>) {
        let who = event.user().map_or("someone", UserId::as_str);
        println!("  -> {who} chose `{}`", event.option().id());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let context = Arc::new(MenuContext::new());
    let register = |id: &str, name: &str| -> Result<Arc<MenuOption>, MenuError> {
        context
            .options()
            .register(MenuOption::new(id, MenuElement::new(name, ""))?)
    };
    let weapons = register("weapons", "Weapons")?;
    let sword = register("sword", "Buy a sword")?;
    let bow = register("bow", "Buy a bow")?;
    let back = register("back", "Back")?;
    let leave = register("leave", "Leave the shop")?;

    let receipt: Arc<dyn MenuListener> = Arc::new(Receipt);
    for option in [&sword, &bow] {
        option.register_listener_at(Arc::clone(&receipt), ListenerPriority::Monitor);
    }

    let shop = Arc::new(DirectedGraphUnderlay::new("shop", MenuElement::new("Shop", ""))?);
    let armory = shop.add_node(MenuElement::new("Armory", ""));
    let start = shop.start_node();
    start.add_child(Arc::clone(&weapons), Some(&armory))?;
    start.add_child(Arc::clone(&leave), None)?;
    armory.add_child(Arc::clone(&sword), None)?;
    armory.add_child(Arc::clone(&bow), None)?;
    armory.add_child(Arc::clone(&back), Some(&start))?;
    context.underlays().register(Arc::clone(&shop))?;

    let mut menu = Menu::new(&context, shop, Some(UserId::from("ada")))?;
    menu.set_interface(Some(MenuInterface::new(Console)))?;

    println!("> 1");
    println!("{:?}", menu.select_index(0));
    println!("> undo");
    println!("{}", menu.go_back());
    println!("> weapons");
    println!("{:?}", menu.select_id("weapons"));
    println!("> 2");
    println!("{:?}", menu.select_index(1));
    println!("> 1");
    println!("{:?}", menu.select_index(0));
    Ok(())
}
