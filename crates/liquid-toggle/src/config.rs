//! Typed configuration built from the host attributes.

use crate::size::SizeName;
use liquid_core::Attributes;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Attributes the toggle observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObservedAttribute {
    /// `checked`: present and not `"false"` turns the toggle on
    Checked,
    /// `disabled`: presence disables input
    Disabled,
    /// `bounce`: `"false"` turns transitions instant
    Bounce,
    /// `size`: a size key, `md` when unknown
    Size,
}

impl ObservedAttribute {
    /// All observed attributes.
    pub const ALL: [Self; 4] = [Self::Checked, Self::Disabled, Self::Bounce, Self::Size];

    /// Attribute names, in the order of [`ObservedAttribute::ALL`].
    pub const NAMES: &'static [&'static str] = &["checked", "disabled", "bounce", "size"];

    /// Attribute name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Look up an observed attribute by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|attr| attr.name() == name)
    }
}

/// Validated toggle configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// Initial settled value
    pub checked: bool,
    /// Input suppressed
    pub disabled: bool,
    /// Animated (true) or instant (false) transitions
    pub bounce: bool,
    /// Size profile key
    pub size: SizeName,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            checked: false,
            disabled: false,
            bounce: true,
            size: SizeName::default(),
        }
    }
}

impl ToggleConfig {
    /// Build the configuration from the observed attributes. Absent
    /// attributes keep their defaults.
    #[must_use]
    pub fn from_attributes(attributes: &Attributes) -> Self {
        let mut config = Self::default();
        for attr in ObservedAttribute::ALL {
            config.apply(attr, attributes.get(attr.name()));
        }
        config
    }

    /// Re-validate one attribute. Returns whether the configuration changed.
    pub fn apply(&mut self, attr: ObservedAttribute, value: Option<&str>) -> bool {
        let before = *self;
        match attr {
            ObservedAttribute::Checked => self.checked = value.is_some_and(|v| v != "false"),
            ObservedAttribute::Disabled => self.disabled = value.is_some(),
            ObservedAttribute::Bounce => self.bounce = value != Some("false"),
            ObservedAttribute::Size => self.size = SizeName::resolve(value),
        }
        *self != before
    }

    /// Attribute map that reproduces this configuration.
    #[must_use]
    pub fn to_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        if self.checked {
            attributes.set("checked", "");
        }
        if self.disabled {
            attributes.set("disabled", "");
        }
        if !self.bounce {
            attributes.set("bounce", "false");
        }
        attributes.set("size", self.size.key());
        attributes
    }
}

/// Interaction timing and distance constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Duration of the completion tween
    pub settle_duration: Duration,
    /// Leading delay of a toggle when bounce is on
    pub bounce_delay: Duration,
    /// Pause between the end of the tween and clearing `active`
    pub settle_delay: Duration,
    /// Longest press that still counts as a tap
    pub tap_threshold: Duration,
    /// Touch travel below which a release clears `active` at once
    pub touch_slop: f32,
    /// Pointer travel before a press becomes a drag
    pub drag_threshold: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            settle_duration: Duration::from_millis(150),
            bounce_delay: Duration::from_millis(200),
            settle_delay: Duration::from_millis(50),
            tap_threshold: Duration::from_millis(150),
            touch_slop: 4.0,
            drag_threshold: 3.0,
        }
    }
}

impl Timings {
    /// Leading delay of a toggle for the given bounce setting.
    #[must_use]
    pub fn toggle_delay(&self, bounce: bool) -> Duration {
        if bounce {
            self.bounce_delay
        } else {
            Duration::ZERO
        }
    }
}
