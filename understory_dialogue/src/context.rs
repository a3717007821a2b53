// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-scoped registries shared by every menu.
//!
//! A [`MenuContext`] replaces global singletons: it bundles the option table,
//! the underlay table and the session registry. Share it
//! as `Arc<MenuContext>`. Each collection has its own lock, and no lock is held
//! while listeners run.
//!
//! ```
//! use std::sync::Arc;
//! use understory_dialogue::{MenuContext, MenuElement, MenuOption};
//!
//! let context = Arc::new(MenuContext::new());
//! let yes = context
//!     .options()
//!     .register(MenuOption::new("yes", MenuElement::new("Yes", "Agree")).unwrap())
//!     .unwrap();
//! assert!(context.options().get("yes").is_some_and(|o| MenuOption::same(&o, &yes)));
//! assert!(context.options().register(MenuOption::new("yes", MenuElement::new("", "")).unwrap()).is_err());
//! ```

use core::fmt;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::MenuError;
use crate::option::MenuOption;
use crate::session::SessionRegistry;
use crate::underlay::{MenuUnderlay, UnderlayEntry};

/// Options by id.
#[derive(Default)]
pub struct OptionTable {
    options: RwLock<HashMap<String, Arc<MenuOption>>>,
}

impl fmt::Debug for OptionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionTable")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl OptionTable {
    /// Register an option, returning the shared handle.
    pub fn register(&self, option: MenuOption) -> Result<Arc<MenuOption>, MenuError> {
        let mut options = self.options.write().unwrap_or_else(PoisonError::into_inner);
        if options.contains_key(option.id()) {
            return Err(MenuError::DuplicateOption(option.id().to_owned()));
        }
        let option = Arc::new(option);
        options.insert(option.id().to_owned(), Arc::clone(&option));
        debug!(option = option.id(), "option registered");
        Ok(option)
    }

    /// The option registered under `id`.
    pub fn get(&self, id: &str) -> Option<Arc<MenuOption>> {
        let options = self.options.read().unwrap_or_else(PoisonError::into_inner);
        options.get(id).cloned()
    }

    /// Whether an option is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        let options = self.options.read().unwrap_or_else(PoisonError::into_inner);
        options.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let options = self.options.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<_> = options.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        let options = self.options.read().unwrap_or_else(PoisonError::into_inner);
        options.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Underlays by id, holding any mix of underlay types.
#[derive(Default)]
pub struct UnderlayTable {
    underlays: RwLock<HashMap<String, Arc<dyn UnderlayEntry>>>,
}

impl fmt::Debug for UnderlayTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnderlayTable")
            .field("ids", &self.ids())
            .finish_non_exhaustive()
    }
}

impl UnderlayTable {
    /// Register an underlay under its own id.
    pub fn register<L: MenuUnderlay + 'static>(&self, underlay: Arc<L>) -> Result<(), MenuError> {
        let id = underlay.id().to_owned();
        if id.is_empty() {
            return Err(MenuError::EmptyId);
        }
        let mut underlays = self
            .underlays
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if underlays.contains_key(&id) {
            return Err(MenuError::DuplicateUnderlay(id));
        }
        debug!(underlay = %id, "underlay registered");
        underlays.insert(id, underlay);
        Ok(())
    }

    /// The underlay registered under `id`, if it has type `L`.
    pub fn get<L: MenuUnderlay + 'static>(&self, id: &str) -> Option<Arc<L>> {
        self.entry(id)?.into_any().downcast::<L>().ok()
    }

    /// The underlay registered under `id`, untyped.
    pub fn entry(&self, id: &str) -> Option<Arc<dyn UnderlayEntry>> {
        let underlays = self.underlays.read().unwrap_or_else(PoisonError::into_inner);
        underlays.get(id).cloned()
    }

    /// Unregister an underlay. Menus already traversing it keep working.
    pub fn remove(&self, id: &str) -> Option<Arc<dyn UnderlayEntry>> {
        let mut underlays = self
            .underlays
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        underlays.remove(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let underlays = self.underlays.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<_> = underlays.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered underlays.
    pub fn len(&self) -> usize {
        let underlays = self.underlays.read().unwrap_or_else(PoisonError::into_inner);
        underlays.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registries shared by the menus of one process (or one test).
#[derive(Debug, Default)]
pub struct MenuContext {
    options: OptionTable,
    underlays: UnderlayTable,
    sessions: SessionRegistry,
}

impl MenuContext {
    /// Create a context with empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// The option table.
    pub fn options(&self) -> &OptionTable {
        &self.options
    }

    /// The underlay table.
    pub fn underlays(&self) -> &UnderlayTable {
        &self.underlays
    }

    /// Active menus by user.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::element::MenuElement;
    use crate::error::SelectionError;
    use crate::event::MenuView;
    use crate::stage::MenuStage;
    use crate::types::MenuId;
    use crate::underlay::UnderlayNode;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Dead;

    impl UnderlayNode for Dead {
        fn stage(&self, _menu: &MenuView<'_>) -> Arc<MenuStage> {
            Arc::new(MenuStage::new(MenuElement::new("dead", ""), []))
        }

        fn next(
            &self,
            _menu: &MenuView<'_>,
            _option: &Arc<MenuOption>,
        ) -> Result<Option<Self>, SelectionError> {
            Err(SelectionError::InvalidSelection)
        }
    }

    #[derive(Debug)]
    struct Fixed {
        id: &'static str,
        menus: Mutex<Vec<MenuId>>,
    }

    impl Fixed {
        fn new(id: &'static str) -> Arc<Self> {
            Arc::new(Self {
                id,
                menus: Mutex::new(Vec::new()),
            })
        }
    }

    impl MenuUnderlay for Fixed {
        type Node = Dead;

        fn id(&self) -> &str {
            self.id
        }

        fn start(&self, _menu: &MenuView<'_>) -> Option<Dead> {
            Some(Dead)
        }

        fn add_menu(&self, menu: &MenuView<'_>) -> bool {
            self.menus.lock().unwrap().push(menu.id());
            true
        }

        fn remove_menu(&self, _menu: MenuId) -> bool {
            false
        }

        fn menus(&self) -> Vec<MenuId> {
            self.menus.lock().unwrap().clone()
        }
    }

    #[derive(Debug)]
    struct Other;

    impl MenuUnderlay for Other {
        type Node = Dead;

        fn id(&self) -> &str {
            "other"
        }

        fn start(&self, _menu: &MenuView<'_>) -> Option<Dead> {
            None
        }

        fn add_menu(&self, _menu: &MenuView<'_>) -> bool {
            false
        }

        fn remove_menu(&self, _menu: MenuId) -> bool {
            false
        }

        fn menus(&self) -> Vec<MenuId> {
            Vec::new()
        }
    }

    #[test]
    fn option_ids_are_unique() {
        let table = OptionTable::default();
        let make = |id: &str| MenuOption::new(id, MenuElement::new(id, "")).unwrap();
        table.register(make("b")).unwrap();
        table.register(make("a")).unwrap();
        assert_eq!(
            table.register(make("a")).unwrap_err(),
            MenuError::DuplicateOption("a".into())
        );
        assert_eq!(table.ids(), vec!["a", "b"]);
        assert!(table.contains("b"));
        assert!(table.get("c").is_none());
    }

    #[test]
    fn underlays_come_back_typed() {
        let table = UnderlayTable::default();
        let fixed = Fixed::new("fixed");
        table.register(Arc::clone(&fixed)).unwrap();
        table.register(Arc::new(Other)).unwrap();

        let back: Arc<Fixed> = table.get("fixed").unwrap();
        assert!(Arc::ptr_eq(&back, &fixed));
        assert!(table.get::<Other>("fixed").is_none());
        assert!(table.get::<Other>("other").is_some());

        assert_eq!(
            table.register(Fixed::new("fixed")).unwrap_err(),
            MenuError::DuplicateUnderlay("fixed".into())
        );
        assert_eq!(
            table.register(Fixed::new("")).unwrap_err(),
            MenuError::EmptyId
        );
        assert_eq!(table.ids(), vec!["fixed", "other"]);
        assert!(table.remove("other").is_some());
        assert!(table.entry("other").is_none());
        assert_eq!(table.len(), 1);
    }
}
