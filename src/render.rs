//! Render - Resolving a component into host output.
//!
//! Components never produce markup. Each one resolves to a [`Rendered`]:
//! the attributes it controls (ids, roles, ARIA relationships, tabindex),
//! or nothing at all when it is hidden with the unmount strategy. The host
//! merges those attributes into whatever element the consumer chose.
//!
//! # Render strategy
//!
//! | features            | `static_` | visible | `unmount` | result    |
//! |---------------------|-----------|---------|-----------|-----------|
//! | none                | -         | -       | -         | `Visible` |
//! | `STATIC`            | true      | -       | -         | `Visible` |
//! | `RENDER_STRATEGY`   | false     | true    | -         | `Visible` |
//! | `RENDER_STRATEGY`   | false     | false   | true      | `Omitted` |
//! | `RENDER_STRATEGY`   | false     | false   | false     | `Hidden`  |

use std::fmt;

bitflags::bitflags! {
    /// Which render props a component honours.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Features: u8 {
        const NONE = 0;
        /// Visibility decides between render, hide and unmount.
        const RENDER_STRATEGY = 1 << 0;
        /// `static_` forces rendering regardless of visibility.
        const STATIC = 1 << 1;
    }
}

/// Consumer-controlled render props.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderProps {
    /// Always render, ignoring internal visibility.
    pub static_: bool,
    /// Drop hidden elements from the output instead of marking them hidden.
    pub unmount: bool,
}

impl Default for RenderProps {
    fn default() -> Self {
        Self {
            static_: false,
            unmount: true,
        }
    }
}

// =============================================================================
// Attributes
// =============================================================================

/// Ordered attribute map. Setting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    entries: Vec<(String, String)>,
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attrs::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    /// Builder that only sets the attribute when `value` is `Some`.
    #[must_use]
    pub fn with_opt(mut self, name: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.set(name, value);
        }
        self
    }

    pub fn set(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Attrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}=\"{value}\"")?;
        }
        Ok(())
    }
}

// =============================================================================
// Rendered
// =============================================================================

/// What the host should do with a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Render with these attributes.
    Visible(Attrs),
    /// Render, but hidden and non-interactive.
    Hidden(Attrs),
    /// Leave out of the output entirely.
    Omitted,
}

impl Rendered {
    pub fn is_visible(&self) -> bool {
        matches!(self, Rendered::Visible(_))
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, Rendered::Omitted)
    }

    /// Attributes to render, if the element is in the output at all.
    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Rendered::Visible(attrs) | Rendered::Hidden(attrs) => Some(attrs),
            Rendered::Omitted => None,
        }
    }
}

/// Apply the render strategy.
pub fn render(features: Features, visible: bool, props: RenderProps, attrs: Attrs) -> Rendered {
    if features.contains(Features::STATIC) && props.static_ {
        return Rendered::Visible(attrs);
    }
    if features.contains(Features::RENDER_STRATEGY) && !visible {
        if props.unmount {
            return Rendered::Omitted;
        }
        return Rendered::Hidden(attrs.with("hidden", true).with("style", "display: none;"));
    }
    Rendered::Visible(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> Attrs {
        Attrs::new().with("id", "panel").with("role", "menu")
    }

    #[test]
    fn test_no_features_always_visible() {
        let out = render(Features::NONE, false, RenderProps::default(), attrs());
        assert!(out.is_visible());
    }

    #[test]
    fn test_hidden_panel_unmounts_by_default() {
        let features = Features::RENDER_STRATEGY | Features::STATIC;
        let out = render(features, false, RenderProps::default(), attrs());
        assert_eq!(out, Rendered::Omitted);
    }

    #[test]
    fn test_hidden_panel_without_unmount_is_marked_hidden() {
        let props = RenderProps { static_: false, unmount: false };
        let out = render(Features::RENDER_STRATEGY, false, props, attrs());
        let Rendered::Hidden(attrs) = out else { panic!("expected hidden") };
        assert_eq!(attrs.get("hidden"), Some("true"));
        assert_eq!(attrs.get("id"), Some("panel"));
    }

    #[test]
    fn test_static_overrides_visibility() {
        let props = RenderProps { static_: true, unmount: true };
        let features = Features::RENDER_STRATEGY | Features::STATIC;
        assert!(render(features, false, props, attrs()).is_visible());
        // Components without the STATIC feature ignore the prop
        assert!(render(Features::RENDER_STRATEGY, false, props, attrs()).is_omitted());
    }

    #[test]
    fn test_attrs_replace_in_place() {
        let mut attrs = attrs();
        attrs.set("id", "other");
        assert_eq!(attrs.to_string(), "id=\"other\" role=\"menu\"");
        assert_eq!(attrs.remove("role").as_deref(), Some("menu"));
        assert_eq!(attrs.len(), 1);
        let skipped = Attrs::new().with_opt("aria-controls", None::<&str>);
        assert!(skipped.is_empty());
    }
}
