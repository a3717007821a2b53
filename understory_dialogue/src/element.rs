// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descriptive elements: names, descriptions, and optional display hints.
//!
//! ## Overview
//!
//! Text is carried as [`TextKey`] handles. The engine never resolves them;
//! a display adapter maps them to localized strings (or prints them verbatim).
//! Display hints ([`ColorHint`], [`IconHint`]) are equally opaque.
//!
//! Capabilities are split into small traits so adapters can be written against
//! exactly what they render: [`Named`], [`Described`], [`Colorable`], [`Itemizable`].

use core::fmt;

/// Opaque text handle, typically a message key in a language table.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextKey(String);

impl TextKey {
    /// Create a text handle.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TextKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for TextKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Opaque color hint for adapters that can tint an element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorHint(String);

impl ColorHint {
    /// Create a color hint.
    pub fn new(hint: impl Into<String>) -> Self {
        Self(hint.into())
    }

    /// The raw hint.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opaque icon hint for adapters that show an element as an item or glyph.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconHint(String);

impl IconHint {
    /// Create an icon hint.
    pub fn new(hint: impl Into<String>) -> Self {
        Self(hint.into())
    }

    /// The raw hint.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Something with a display name.
pub trait Named {
    /// The name handle.
    fn name(&self) -> &TextKey;
}

/// Something with a longer description.
pub trait Described {
    /// The description handle.
    fn description(&self) -> &TextKey;
}

/// Something that may carry a color hint.
pub trait Colorable {
    /// The color hint, if any.
    fn color(&self) -> Option<&ColorHint>;
}

/// Something that may be shown as an icon or item.
pub trait Itemizable {
    /// The icon hint, if any.
    fn icon(&self) -> Option<&IconHint>;
}

/// Immutable descriptive unit: a name, a description, and optional hints.
///
/// Elements have no identity beyond their content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MenuElement {
    name: TextKey,
    description: TextKey,
    color: Option<ColorHint>,
    icon: Option<IconHint>,
}

impl MenuElement {
    /// Create an element without display hints.
    pub fn new(name: impl Into<TextKey>, description: impl Into<TextKey>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            color: None,
            icon: None,
        }
    }

    /// Attach a color hint.
    pub fn with_color(mut self, color: ColorHint) -> Self {
        self.color = Some(color);
        self
    }

    /// Attach an icon hint.
    pub fn with_icon(mut self, icon: IconHint) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl Named for MenuElement {
    fn name(&self) -> &TextKey {
        &self.name
    }
}

impl Described for MenuElement {
    fn description(&self) -> &TextKey {
        &self.description
    }
}

impl Colorable for MenuElement {
    fn color(&self) -> Option<&ColorHint> {
        self.color.as_ref()
    }
}

impl Itemizable for MenuElement {
    fn icon(&self) -> Option<&IconHint> {
        self.icon.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_are_optional() {
        let plain = MenuElement::new("menu.title", "menu.title.desc");
        assert_eq!(plain.name().as_str(), "menu.title");
        assert_eq!(plain.description().as_str(), "menu.title.desc");
        assert!(plain.color().is_none());
        assert!(plain.icon().is_none());

        let hinted = plain
            .clone()
            .with_color(ColorHint::new("gold"))
            .with_icon(IconHint::new("chest"));
        assert_eq!(hinted.color().map(ColorHint::as_str), Some("gold"));
        assert_eq!(hinted.icon().map(IconHint::as_str), Some("chest"));
        assert_ne!(plain, hinted);
    }
}
