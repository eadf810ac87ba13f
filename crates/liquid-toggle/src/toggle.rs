//! The liquid toggle element.

use crate::config::{ObservedAttribute, Timings, ToggleConfig};
use crate::interaction::{Effect, InputUnifier, InteractionState};
use crate::projector::{self, RenderSurface, StyleProperties, COMPLETE_PROPERTY};
use crate::size::SizeName;
use crate::state::WidgetState;
use liquid_core::{
    Animator, Attributes, DragConfig, DragTracker, Element, Emitter, Event, EventOutcome, Key,
    ListenerId, ListenerKind, ListenerSet, PointerDragTracker, Rect, Timeline,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Duration;

/// Notification emitted when the settled value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    /// The new settled value
    pub checked: bool,
    /// Propagates to ancestors
    pub bubbles: bool,
    /// Crosses encapsulation boundaries
    pub composed: bool,
}

impl ChangeEvent {
    /// A bubbling, composed change event.
    #[must_use]
    pub const fn new(checked: bool) -> Self {
        Self {
            checked,
            bubbles: true,
            composed: true,
        }
    }
}

/// Toggle switch with a liquid morphing indicator.
///
/// The element is driven by its host: attributes and [`Element`] callbacks
/// for configuration and lifecycle, [`Element::handle_event`] for input and
/// [`Element::advance`] once per frame for animation.
pub struct LiquidToggle {
    pub(crate) attributes: Attributes,
    pub(crate) config: ToggleConfig,
    pub(crate) state: WidgetState,
    pub(crate) unifier: InputUnifier,
    pub(crate) animator: Box<dyn Animator>,
    pub(crate) tracker: Box<dyn DragTracker>,
    pub(crate) surface: Box<dyn RenderSurface>,
    pub(crate) listeners: ListenerSet,
    pub(crate) change: Emitter<ChangeEvent>,
    pub(crate) bounds: Rect,
    pub(crate) connected: bool,
}

impl Default for LiquidToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LiquidToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiquidToggle")
            .field("attributes", &self.attributes)
            .field("state", &self.state)
            .field("interaction", &self.unifier.state())
            .field("bounds", &self.bounds)
            .field("connected", &self.connected)
            .finish_non_exhaustive()
    }
}

impl LiquidToggle {
    /// Tag name the element registers under.
    pub const TAG: &'static str = "liquid-toggle";

    /// Create a toggle with the default timeline, pointer tracker and style
    /// property surface.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timings(Timings::default())
    }

    /// Create a toggle with custom timings and the default capabilities.
    #[must_use]
    pub fn with_timings(timings: Timings) -> Self {
        let tracker = PointerDragTracker::with_config(DragConfig {
            threshold: timings.drag_threshold,
        });
        Self::with_capabilities(
            timings,
            Box::new(Timeline::new()),
            Box::new(tracker),
            Box::new(StyleProperties::new()),
        )
    }

    /// Create a toggle with explicit capabilities.
    #[must_use]
    pub fn with_capabilities(
        timings: Timings,
        animator: Box<dyn Animator>,
        tracker: Box<dyn DragTracker>,
        surface: Box<dyn RenderSurface>,
    ) -> Self {
        Self {
            attributes: Attributes::new(),
            config: ToggleConfig::default(),
            state: WidgetState::default(),
            unifier: InputUnifier::new(timings),
            animator,
            tracker,
            surface,
            listeners: ListenerSet::new(),
            change: Emitter::new(),
            bounds: Rect::default(),
            connected: false,
        }
    }

    // === Accessors ===

    /// Settled value.
    #[must_use]
    pub const fn checked(&self) -> bool {
        self.state.checked
    }

    /// Live completion in `[0, 100]`.
    #[must_use]
    pub const fn completion(&self) -> f64 {
        self.state.completion
    }

    /// Whether the toggle is being interacted with.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.active
    }

    /// Whether input is suppressed.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.state.disabled
    }

    /// Whether transitions are animated.
    #[must_use]
    pub const fn bounce(&self) -> bool {
        self.state.bounce
    }

    /// Size in effect.
    #[must_use]
    pub const fn size(&self) -> SizeName {
        self.state.size
    }

    /// Full widget state.
    #[must_use]
    pub const fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Configuration last validated from the attributes.
    #[must_use]
    pub const fn config(&self) -> &ToggleConfig {
        &self.config
    }

    /// Interaction state machine phase.
    #[must_use]
    pub fn interaction_state(&self) -> InteractionState {
        self.unifier.state()
    }

    /// Timing constants.
    #[must_use]
    pub const fn timings(&self) -> &Timings {
        self.unifier.timings()
    }

    /// Layout bounds, sized to the current profile.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether an input kind is currently wired.
    #[must_use]
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.is_listening(kind)
    }

    /// Subscribe to change notifications. Subscriptions survive detaching.
    pub fn on_change(&mut self, callback: impl FnMut(&ChangeEvent) + 'static) -> ListenerId {
        self.change.subscribe(callback)
    }

    /// Remove a change subscription.
    pub fn off_change(&mut self, id: ListenerId) -> bool {
        self.change.unsubscribe(id)
    }

    /// Toggle as keyboard activation does. No-op while disabled or detached.
    pub fn activate(&mut self) {
        if !self.connected {
            return;
        }
        let effects = self
            .unifier
            .request_toggle(&mut self.state, self.animator.as_mut());
        self.apply_effects(effects);
    }

    // === Internals ===

    pub(crate) fn project(&mut self) {
        if self.connected {
            projector::project(&self.state, self.state.profile(), self.surface.as_mut());
        }
    }

    pub(crate) fn project_size(&mut self) {
        if self.connected {
            projector::project_size(self.state.profile(), self.surface.as_mut());
        }
        self.resize_bounds();
    }

    pub(crate) fn resize_bounds(&mut self) {
        let dims = self.state.profile().dimensions();
        self.bounds = self.bounds.with_size(dims.width, dims.height);
        self.tracker.set_handle(self.bounds);
    }

    /// Apply state machine effects. A settle may unblock the next queued
    /// toggle, so the machine is pumped again until it has nothing to add.
    pub(crate) fn apply_effects(&mut self, effects: Vec<Effect>) {
        let mut pending = effects;
        loop {
            let mut project = false;
            let mut settled = false;
            for effect in pending {
                match effect {
                    Effect::Project => project = true,
                    Effect::Settle(checked) => {
                        self.commit_checked(checked);
                        project = true;
                        settled = true;
                    }
                }
            }
            if project {
                self.project();
            }
            if !settled {
                return;
            }
            pending = self
                .unifier
                .pump(&mut self.state, self.animator.as_mut());
        }
    }

    fn handle_pointer(&mut self, event: &Event) -> EventOutcome {
        let signals = self.tracker.process(event);
        if signals.is_empty() {
            return EventOutcome::IGNORED;
        }
        let mut effects = Vec::new();
        for signal in signals {
            effects.extend(self.unifier.on_signal(
                signal,
                self.bounds,
                &mut self.state,
                self.animator.as_mut(),
            ));
        }
        self.apply_effects(effects);
        EventOutcome::HANDLED
    }
}

impl Element for LiquidToggle {
    fn tag_name(&self) -> &'static str {
        Self::TAG
    }

    fn observed_attributes(&self) -> &'static [&'static str] {
        ObservedAttribute::NAMES
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connected_callback(&mut self) {
        self.attach();
    }

    fn disconnected_callback(&mut self) {
        self.detach();
    }

    fn attribute_changed_callback(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }
        if let Some(attr) = ObservedAttribute::from_name(name) {
            self.sync_attribute(attr, new);
        }
    }

    fn handle_event(&mut self, event: &Event) -> EventOutcome {
        if !self.connected || self.state.disabled {
            return EventOutcome::IGNORED;
        }
        match event {
            Event::KeyDown { key: Key::Enter } if self.is_listening(ListenerKind::KeyDown) => {
                self.activate();
                EventOutcome::HANDLED
            }
            Event::KeyDown { key: Key::Space } if self.is_listening(ListenerKind::KeyDown) => {
                EventOutcome::HANDLED.prevent_default()
            }
            Event::KeyUp { key: Key::Space } if self.is_listening(ListenerKind::KeyUp) => {
                self.activate();
                EventOutcome::HANDLED
            }
            _ if event.is_pointer() && self.is_listening(ListenerKind::Pointer) => {
                self.handle_pointer(event)
            }
            _ => EventOutcome::IGNORED,
        }
    }

    fn advance(&mut self, dt: Duration) {
        if !self.connected {
            return;
        }
        let mut moved = false;
        for sample in self.animator.advance(dt) {
            if sample.property == COMPLETE_PROPERTY {
                self.state.set_completion(sample.value);
                moved = true;
            }
        }
        let mut effects = self
            .unifier
            .pump(&mut self.state, self.animator.as_mut());
        if moved {
            effects.push(Effect::Project);
        }
        self.apply_effects(effects);
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.resize_bounds();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
