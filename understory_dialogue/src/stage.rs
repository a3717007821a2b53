// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable stage snapshots: a title and an ordered list of options.
//!
//! Stages never change after construction, so indices are stable for the
//! lifetime of the value and many menus can share one `Arc<MenuStage>`.
//! Membership and lookup compare options by instance, not by id.

use std::sync::Arc;

use crate::element::MenuElement;
use crate::error::MenuError;
use crate::option::MenuOption;

/// Title plus options presented at one point in a dialogue.
#[derive(Clone, Debug)]
pub struct MenuStage {
    title: MenuElement,
    options: Vec<Arc<MenuOption>>,
}

impl MenuStage {
    /// Create a stage from a title and options, in display order.
    pub fn new(title: MenuElement, options: impl IntoIterator<Item = Arc<MenuOption>>) -> Self {
        Self {
            title,
            options: options.into_iter().collect(),
        }
    }

    /// Create a stage from option slots, dropping empty slots.
    pub fn from_slots(
        title: MenuElement,
        slots: impl IntoIterator<Item = Option<Arc<MenuOption>>>,
    ) -> Self {
        Self::new(title, slots.into_iter().flatten())
    }

    /// The stage title.
    pub fn title(&self) -> &MenuElement {
        &self.title
    }

    /// The options in display order.
    pub fn options(&self) -> &[Arc<MenuOption>] {
        &self.options
    }

    /// Iterate the options in display order.
    pub fn iter(&self) -> core::slice::Iter<'_, Arc<MenuOption>> {
        self.options.iter()
    }

    /// The option at `index`.
    pub fn get(&self, index: usize) -> Result<&Arc<MenuOption>, MenuError> {
        self.options.get(index).ok_or(MenuError::IndexOutOfRange {
            index,
            len: self.options.len(),
        })
    }

    /// Position of `option`, compared by instance.
    pub fn index_of(&self, option: &Arc<MenuOption>) -> Option<usize> {
        self.options.iter().position(|o| MenuOption::same(o, option))
    }

    /// Whether `option` (by instance) is part of this stage.
    pub fn contains(&self, option: &Arc<MenuOption>) -> bool {
        self.index_of(option).is_some()
    }

    /// The first option with `id`, if any.
    pub fn find(&self, id: &str) -> Option<&Arc<MenuOption>> {
        self.options.iter().find(|o| o.id() == id)
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the stage has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<'a> IntoIterator for &'a MenuStage {
    type Item = &'a Arc<MenuOption>;
    type IntoIter = core::slice::Iter<'a, Arc<MenuOption>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
