// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the unit tests of this crate.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::context::MenuContext;
use crate::element::{MenuElement, Named};
use crate::error::SelectionError;
use crate::event::MenuView;
use crate::interface::{DisplayAdapter, MenuInterface};
use crate::option::MenuOption;
use crate::stage::MenuStage;
use crate::types::MenuId;
use crate::underlay::{MenuUnderlay, UnderlayNode};

/// An endless ladder: `next` climbs, `stay` loops, `quit` ends, `boom` fails.
#[derive(Debug)]
pub(crate) struct Ladder {
    id: String,
    stage: Arc<MenuStage>,
    has_start: bool,
    accepts: bool,
    menus: Mutex<HashSet<MenuId>>,
}

#[derive(Clone, Debug)]
pub(crate) struct Rung {
    pub(crate) depth: u32,
    stage: Arc<MenuStage>,
}

impl PartialEq for Rung {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth
    }
}

impl Eq for Rung {}

impl UnderlayNode for Rung {
    fn stage(&self, _menu: &MenuView<'_>) -> Arc<MenuStage> {
        Arc::clone(&self.stage)
    }

    fn next(
        &self,
        _menu: &MenuView<'_>,
        option: &Arc<MenuOption>,
    ) -> Result<Option<Self>, SelectionError> {
        if !self.stage.contains(option) {
            return Err(SelectionError::InvalidSelection);
        }
        match option.id() {
            "next" => Ok(Some(Self {
                depth: self.depth + 1,
                stage: Arc::clone(&self.stage),
            })),
            "stay" => Ok(Some(self.clone())),
            "quit" => Ok(None),
            other => Err(SelectionError::Failed(format!("`{other}` exploded"))),
        }
    }
}

impl MenuUnderlay for Ladder {
    type Node = Rung;

    fn id(&self) -> &str {
        &self.id
    }

    fn start(&self, _menu: &MenuView<'_>) -> Option<Rung> {
        self.has_start.then(|| Rung {
            depth: 0,
            stage: Arc::clone(&self.stage),
        })
    }

    fn add_menu(&self, menu: &MenuView<'_>) -> bool {
        self.accepts
            && menu.underlay_id() == self.id
            && self.menus.lock().unwrap().insert(menu.id())
    }

    fn remove_menu(&self, menu: MenuId) -> bool {
        self.menus.lock().unwrap().remove(&menu)
    }

    fn menus(&self) -> Vec<MenuId> {
        self.menus.lock().unwrap().iter().copied().collect()
    }
}

pub(crate) struct Fixture {
    pub(crate) context: Arc<MenuContext>,
    pub(crate) ladder: Arc<Ladder>,
    pub(crate) next: Arc<MenuOption>,
    pub(crate) stay: Arc<MenuOption>,
    pub(crate) quit: Arc<MenuOption>,
    pub(crate) boom: Arc<MenuOption>,
}

pub(crate) fn fixture() -> Fixture {
    fixture_with(true, true)
}

pub(crate) fn fixture_with(has_start: bool, accepts: bool) -> Fixture {
    let context = Arc::new(MenuContext::new());
    let register = |id: &str| {
        context
            .options()
            .register(MenuOption::new(id, MenuElement::new(id, "")).unwrap())
            .unwrap()
    };
    let next = register("next");
    let stay = register("stay");
    let quit = register("quit");
    let boom = register("boom");
    let stage = Arc::new(MenuStage::new(
        MenuElement::new("ladder", ""),
        [&next, &stay, &quit, &boom].map(Arc::clone),
    ));
    let ladder = Arc::new(Ladder {
        id: "ladder".into(),
        stage,
        has_start,
        accepts,
        menus: Mutex::new(HashSet::new()),
    });
    Fixture {
        context,
        ladder,
        next,
        stay,
        quit,
        boom,
    }
}

/// Records adapter calls as `"stage:<title>"`, `"stage:-"` and `"closed"`.
#[derive(Default)]
pub(crate) struct Screen {
    pub(crate) log: Mutex<Vec<String>>,
}

impl Screen {
    pub(crate) fn take(&self) -> Vec<String> {
        core::mem::take(&mut *self.log.lock().unwrap())
    }
}

struct ScreenAdapter {
    screen: Arc<Screen>,
    max: usize,
}

impl DisplayAdapter for ScreenAdapter {
    fn max_options(&self) -> usize {
        self.max
    }

    fn on_stage_changed(&self, stage: Option<&Arc<MenuStage>>) {
        let entry = match stage {
            Some(stage) => format!("stage:{}", stage.title().name()),
            None => "stage:-".to_owned(),
        };
        self.screen.log.lock().unwrap().push(entry);
    }

    fn on_closed(&self) {
        self.screen.log.lock().unwrap().push("closed".to_owned());
    }
}

pub(crate) fn screen(max: usize) -> (Arc<MenuInterface>, Arc<Screen>) {
    let screen = Arc::new(Screen::default());
    let interface = MenuInterface::new(ScreenAdapter {
        screen: Arc::clone(&screen),
        max,
    });
    (interface, screen)
}
