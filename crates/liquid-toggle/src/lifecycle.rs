//! Attach and detach.

use crate::config::ToggleConfig;
use crate::state::WidgetState;
use crate::toggle::LiquidToggle;
use liquid_core::ListenerKind;

impl LiquidToggle {
    /// Wire input, derive the state from the attributes and project it.
    pub(crate) fn attach(&mut self) {
        if self.connected {
            return;
        }
        self.connected = true;
        self.config = ToggleConfig::from_attributes(&self.attributes);
        self.state = WidgetState::from_config(&self.config);
        self.listeners.add(ListenerKind::Pointer);
        self.listeners.add(ListenerKind::KeyDown);
        self.listeners.add(ListenerKind::KeyUp);
        self.project_size();
        self.project();
        tracing::debug!(
            checked = self.state.checked,
            size = %self.state.size,
            bounce = self.state.bounce,
            "attached"
        );
    }

    /// Kill drag tracking and animations and drop every internal listener.
    /// Change subscribers are kept.
    pub(crate) fn detach(&mut self) {
        if !self.connected {
            return;
        }
        self.tracker.kill();
        self.animator.kill_all();
        self.unifier.kill();
        self.listeners.remove_all();
        self.connected = false;
        tracing::debug!(completion = self.state.completion, "detached");
    }
}
