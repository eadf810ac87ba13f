//! Test harness driving a [`LiquidToggle`] with deterministic capabilities.

use crate::animator::{InstantAnimator, TweenLog};
use crate::drag::{DragLog, RecordingDrag};
use crate::surface::RecordingSurface;
use liquid_core::{
    Animator, DragConfig, Element, Event, EventOutcome, Key, ListenerId, Point, Rect, Timeline,
};
use liquid_toggle::{ChangeEvent, InteractionState, LiquidToggle, Timings};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Frame length used by [`Harness::frame`].
pub const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames [`Harness::settle`] will run.
const MAX_SETTLE_FRAMES: usize = 1000;

/// Recorder of emitted change events.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    events: Rc<RefCell<Vec<ChangeEvent>>>,
}

impl ChangeLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe the log to a toggle.
    pub fn subscribe(&self, toggle: &mut LiquidToggle) -> ListenerId {
        let events = self.events.clone();
        toggle.on_change(move |event| events.borrow_mut().push(*event))
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.borrow().clone()
    }

    /// The `checked` value of every recorded event.
    #[must_use]
    pub fn values(&self) -> Vec<bool> {
        self.events.borrow().iter().map(|e| e.checked).collect()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn count(&self) -> usize {
        self.events.borrow().len()
    }

    /// Most recent event.
    #[must_use]
    pub fn last(&self) -> Option<ChangeEvent> {
        self.events.borrow().last().copied()
    }
}

/// Harness for a single toggle.
pub struct Harness {
    toggle: LiquidToggle,
    surface: RecordingSurface,
    drag: DragLog,
    tweens: Option<TweenLog>,
    changes: ChangeLog,
    origin: Point,
}

impl Harness {
    /// Toggle driven by a real [`Timeline`], with the given attributes set
    /// before attaching.
    pub fn new(attributes: &[(&str, &str)]) -> Self {
        Self::build(attributes, Box::new(Timeline::new()), None)
    }

    /// Toggle driven by an [`InstantAnimator`]: every transition phase ends
    /// on the next frame.
    pub fn instant(attributes: &[(&str, &str)]) -> Self {
        let animator = InstantAnimator::new();
        let log = animator.log();
        Self::build(attributes, Box::new(animator), Some(log))
    }

    fn build(
        attributes: &[(&str, &str)],
        animator: Box<dyn Animator>,
        tweens: Option<TweenLog>,
    ) -> Self {
        let timings = Timings::default();
        let surface = RecordingSurface::new();
        let drag = RecordingDrag::with_config(DragConfig {
            threshold: timings.drag_threshold,
        });
        let drag_log = drag.log();
        let mut toggle = LiquidToggle::with_capabilities(
            timings,
            animator,
            Box::new(drag),
            Box::new(surface.clone()),
        );
        for (name, value) in attributes {
            toggle.attributes_mut().set(name, value);
        }
        let changes = ChangeLog::new();
        changes.subscribe(&mut toggle);
        Self {
            toggle,
            surface,
            drag: drag_log,
            tweens,
            changes,
            origin: Point::new(100.0, 100.0),
        }
    }

    /// Attach the toggle and lay it out at the harness origin.
    pub fn connect(&mut self) -> &mut Self {
        self.toggle.connected_callback();
        self.toggle
            .set_bounds(Rect::new(self.origin.x, self.origin.y, 0.0, 0.0));
        self
    }

    /// Detach the toggle.
    pub fn disconnect(&mut self) -> &mut Self {
        self.toggle.disconnected_callback();
        self
    }

    // === Access ===

    /// The toggle under test.
    #[must_use]
    pub const fn toggle(&self) -> &LiquidToggle {
        &self.toggle
    }

    /// Mutable access to the toggle under test.
    pub fn toggle_mut(&mut self) -> &mut LiquidToggle {
        &mut self.toggle
    }

    /// Surface history.
    #[must_use]
    pub const fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    /// Drag tracker history.
    #[must_use]
    pub const fn drag(&self) -> &DragLog {
        &self.drag
    }

    /// Tween log, for harnesses built with [`Harness::instant`].
    #[must_use]
    pub const fn tweens(&self) -> Option<&TweenLog> {
        self.tweens.as_ref()
    }

    /// Change events emitted so far.
    #[must_use]
    pub const fn changes(&self) -> &ChangeLog {
        &self.changes
    }

    // === Attributes ===

    /// Set an attribute through the element.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.toggle.set_attribute(name, value);
        self
    }

    /// Remove an attribute through the element.
    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.toggle.remove_attribute(name);
        self
    }

    // === Input ===

    /// Deliver a raw event.
    pub fn send(&mut self, event: &Event) -> EventOutcome {
        self.toggle.handle_event(event)
    }

    /// Key pressed.
    pub fn key_down(&mut self, key: Key) -> EventOutcome {
        self.send(&Event::KeyDown { key })
    }

    /// Key released.
    pub fn key_up(&mut self, key: Key) -> EventOutcome {
        self.send(&Event::KeyUp { key })
    }

    /// Key pressed and released.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.key_down(key);
        self.key_up(key);
        self
    }

    /// Mouse click at the toggle center.
    pub fn click(&mut self) -> &mut Self {
        let center = self.toggle.bounds().center();
        self.send(&Event::mouse_down(center));
        self.send(&Event::mouse_up(center));
        self
    }

    /// Touch tap at the toggle center.
    pub fn tap(&mut self) -> &mut Self {
        let center = self.toggle.bounds().center();
        self.send(&Event::touch_down(center));
        self.send(&Event::touch_up(center));
        self
    }

    /// Press at the settled edge and drag the pointer to `fraction` of the
    /// track width, then release. Moves in four steps.
    pub fn drag_to(&mut self, fraction: f32) -> &mut Self {
        let bounds = self.toggle.bounds();
        let y = bounds.center().y;
        let start_x = if self.toggle.checked() {
            bounds.right()
        } else {
            bounds.left()
        };
        let target_x = bounds.width.mul_add(fraction, bounds.left());

        self.send(&Event::mouse_down(Point::new(start_x, y)));
        for step in 1..=4 {
            let x = (target_x - start_x).mul_add(step as f32 / 4.0, start_x);
            self.send(&Event::mouse_move(Point::new(x, y)));
        }
        self.send(&Event::mouse_up(Point::new(target_x, y)));
        self
    }

    // === Time ===

    /// Advance one frame.
    pub fn frame(&mut self) -> &mut Self {
        self.toggle.advance(FRAME);
        self
    }

    /// Advance `total` time in frames.
    pub fn advance(&mut self, total: Duration) -> &mut Self {
        let mut left = total;
        while !left.is_zero() {
            let step = left.min(FRAME);
            self.toggle.advance(step);
            left -= step;
        }
        self
    }

    /// Run frames until no transition is running or queued and the toggle
    /// is no longer active.
    pub fn settle(&mut self) -> &mut Self {
        for _ in 0..MAX_SETTLE_FRAMES {
            if self.is_settled() {
                break;
            }
            self.frame();
        }
        self
    }

    /// Whether the toggle is idle and inactive.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.toggle.interaction_state() == InteractionState::Idle && !self.toggle.is_active()
    }
}
