//! Attribute and property synchronization.
//!
//! Observed attributes flow into the configuration and the widget state; the
//! `checked` property flows back out as the `checked` attribute plus a
//! [`ChangeEvent`].

use crate::config::ObservedAttribute;
use crate::state::pole;
use crate::toggle::{ChangeEvent, LiquidToggle};
use liquid_core::Element;

impl LiquidToggle {
    /// Set the settled value.
    ///
    /// Interrupts any gesture, transition or queued toggle, then reflects the
    /// `checked` attribute, re-projects and emits one [`ChangeEvent`].
    /// Setting the current value does nothing.
    pub fn set_checked(&mut self, checked: bool) {
        if checked == self.state.checked {
            return;
        }
        self.tracker.kill();
        self.animator.kill_all();
        self.unifier.kill();
        self.state.active = false;
        self.commit_checked(checked);
    }

    /// Record a settled value without touching running transitions.
    pub(crate) fn commit_checked(&mut self, checked: bool) {
        if checked == self.state.checked {
            return;
        }
        self.state.checked = checked;
        self.state.completion = pole(checked);
        self.config.checked = checked;
        if checked {
            self.set_attribute("checked", "");
        } else {
            self.remove_attribute("checked");
        }
        self.project();
        tracing::debug!(checked, size = %self.state.size, "checked changed");
        self.change.emit(&ChangeEvent::new(checked));
    }

    /// Apply one observed attribute change to the state.
    pub(crate) fn sync_attribute(&mut self, attr: ObservedAttribute, value: Option<&str>) {
        if !self.config.apply(attr, value) {
            return;
        }
        match attr {
            ObservedAttribute::Checked => {
                self.state.checked = self.config.checked;
                self.state.completion = pole(self.config.checked);
                self.project();
            }
            ObservedAttribute::Disabled => {
                self.state.disabled = self.config.disabled;
                if self.state.disabled {
                    let dropped = self.unifier.drop_queued();
                    if dropped > 0 {
                        tracing::debug!(dropped, "queued toggles dropped");
                    }
                    self.tracker.kill();
                    let effects = self
                        .unifier
                        .cancel_gesture(&mut self.state, self.animator.as_mut());
                    self.apply_effects(effects);
                }
                tracing::debug!(disabled = self.state.disabled, "disabled changed");
            }
            ObservedAttribute::Bounce => {
                self.state.bounce = self.config.bounce;
                self.project();
            }
            ObservedAttribute::Size => {
                self.state.size = self.config.size;
                self.project_size();
                self.project();
                tracing::debug!(size = %self.state.size, "size changed");
            }
        }
    }
}
