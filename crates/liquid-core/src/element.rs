//! Custom element trait and the explicit element registry.
//!
//! Element types are registered by tag name on an [`ElementRegistry`] owned by
//! the host, instead of through a process-wide singleton, so tests can build
//! isolated registries.

use crate::attributes::Attributes;
use crate::event::{Event, EventOutcome};
use crate::geometry::Rect;
use std::any::Any;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// A host-attached UI element with observed attributes.
pub trait Element: Any {
    /// Tag name the element is registered under.
    fn tag_name(&self) -> &'static str;

    /// Attributes whose changes are reported to
    /// [`Element::attribute_changed_callback`].
    fn observed_attributes(&self) -> &'static [&'static str];

    /// Current host attributes.
    fn attributes(&self) -> &Attributes;

    /// Mutable host attributes. Writing here does not run callbacks.
    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Whether the element is attached to a host surface.
    fn is_connected(&self) -> bool;

    /// Element was attached.
    fn connected_callback(&mut self);

    /// Element was detached.
    fn disconnected_callback(&mut self);

    /// An observed attribute changed while connected.
    fn attribute_changed_callback(&mut self, name: &str, old: Option<&str>, new: Option<&str>);

    /// Deliver an input event.
    fn handle_event(&mut self, event: &Event) -> EventOutcome;

    /// Advance animations by one frame.
    fn advance(&mut self, dt: Duration);

    /// Set the layout bounds assigned by the host.
    fn set_bounds(&mut self, bounds: Rect);

    /// Downcast support.
    fn as_any(&self) -> &dyn Any;

    /// Mutable downcast support.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Set an attribute and report the change if it is observed.
    fn set_attribute(&mut self, name: &str, value: &str) {
        let old = self.attributes_mut().set(name, value);
        self.dispatch_attribute_change(name, old.as_deref(), Some(value));
    }

    /// Remove an attribute and report the change if it is observed.
    fn remove_attribute(&mut self, name: &str) {
        if let Some(old) = self.attributes_mut().remove(name) {
            self.dispatch_attribute_change(name, Some(&old), None);
        }
    }

    /// Read an attribute.
    fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes().get(name)
    }

    /// Whether an attribute is present.
    fn has_attribute(&self, name: &str) -> bool {
        self.attributes().has(name)
    }

    /// Run [`Element::attribute_changed_callback`] when the element is
    /// connected, the attribute is observed and the value really changed.
    fn dispatch_attribute_change(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new || !self.is_connected() || !self.observed_attributes().contains(&name) {
            return;
        }
        self.attribute_changed_callback(name, old, new);
    }
}

/// Factory producing a fresh element.
pub type ElementFactory = Box<dyn Fn() -> Box<dyn Element>>;

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The tag is already defined.
    #[error("element `{0}` is already defined")]
    AlreadyDefined(String),
    /// The tag was never defined.
    #[error("element `{0}` is not defined")]
    Unknown(String),
    /// Custom tags must be lowercase and contain a hyphen.
    #[error("`{0}` is not a valid custom element name")]
    InvalidName(String),
}

/// Tag-name keyed element registry.
#[derive(Default)]
pub struct ElementRegistry {
    factories: HashMap<String, ElementFactory>,
}

impl std::fmt::Debug for ElementRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<_> = self.factories.keys().collect();
        tags.sort();
        f.debug_struct("ElementRegistry").field("tags", &tags).finish()
    }
}

impl ElementRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a tag. Each tag can be defined once.
    pub fn define(
        &mut self,
        tag: &str,
        factory: impl Fn() -> Box<dyn Element> + 'static,
    ) -> Result<(), RegistryError> {
        if !is_valid_custom_name(tag) {
            return Err(RegistryError::InvalidName(tag.to_owned()));
        }
        if self.factories.contains_key(tag) {
            return Err(RegistryError::AlreadyDefined(tag.to_owned()));
        }
        self.factories.insert(tag.to_owned(), Box::new(factory));
        tracing::debug!(tag, "element defined");
        Ok(())
    }

    /// Whether a tag is defined.
    #[must_use]
    pub fn is_defined(&self, tag: &str) -> bool {
        self.factories.contains_key(tag)
    }

    /// Create a new element for a defined tag.
    pub fn create(&self, tag: &str) -> Result<Box<dyn Element>, RegistryError> {
        self.factories
            .get(tag)
            .map(|factory| factory())
            .ok_or_else(|| RegistryError::Unknown(tag.to_owned()))
    }
}

fn is_valid_custom_name(tag: &str) -> bool {
    tag.contains('-')
        && tag.starts_with(|c: char| c.is_ascii_lowercase())
        && tag
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' || c == '.')
}
