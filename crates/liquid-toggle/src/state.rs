//! Widget state.

use crate::config::ToggleConfig;
use crate::size::{SizeName, SizeProfile};
use serde::{Deserialize, Serialize};

/// Completion of a toggle that is fully on.
pub const ON: f64 = 100.0;
/// Completion of a toggle that is fully off.
pub const OFF: f64 = 0.0;

/// Completion value of a settled boolean.
#[must_use]
pub const fn pole(checked: bool) -> f64 {
    if checked {
        ON
    } else {
        OFF
    }
}

/// The single mutable state of one toggle.
///
/// `completion` is the live interpolation value in `[0, 100]`; `checked` is
/// the last settled boolean and only changes when a transition settles or the
/// host sets it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Interpolation between off (0) and on (100)
    pub completion: f64,
    /// Settled value
    pub checked: bool,
    /// Pressed or dragging, or a transition is running
    pub active: bool,
    /// Animated transitions
    pub bounce: bool,
    /// Size profile key
    pub size: SizeName,
    /// Input suppressed
    pub disabled: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::from_config(&ToggleConfig::default())
    }
}

impl WidgetState {
    /// Fresh state derived from a configuration.
    #[must_use]
    pub const fn from_config(config: &ToggleConfig) -> Self {
        Self {
            completion: pole(config.checked),
            checked: config.checked,
            active: false,
            bounce: config.bounce,
            size: config.size,
            disabled: config.disabled,
        }
    }

    /// Whether completion sits exactly on a pole.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.completion == ON || self.completion == OFF
    }

    /// Size profile in effect.
    #[must_use]
    pub fn profile(&self) -> &'static SizeProfile {
        self.size.profile()
    }

    /// Set the live completion, clamped to `[0, 100]`. NaN is ignored.
    pub fn set_completion(&mut self, completion: f64) {
        if !completion.is_nan() {
            self.completion = completion.clamp(OFF, ON);
        }
    }
}
