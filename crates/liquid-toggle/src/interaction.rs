//! Input unification.
//!
//! [`InputUnifier`] turns presses, drags, taps and keyboard activation into
//! transitions of one [`WidgetState`]. Drags move `completion` 1:1 with the
//! pointer; everything else animates it through the [`Animator`] capability.
//!
//! A transition runs in two phases: the completion tween, then a short settle
//! timer after which `active` clears and the new value is reported as
//! [`Effect::Settle`]. Toggle requests are queued and each one waits for the
//! join of the animations that were running when it was requested, so rapid
//! requests are serialized instead of racing.

use crate::config::Timings;
use crate::projector::COMPLETE_PROPERTY;
use crate::state::{pole, WidgetState, ON};
use futures::future::{join_all, FutureExt, LocalBoxFuture};
use futures::task::noop_waker_ref;
use liquid_core::{Animator, Completion, DragSignal, Point, PointerType, Rect, Tween};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::task::Context;
use std::time::Duration;

/// Observable interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionState {
    /// Nothing happening
    Idle,
    /// Pressed, not yet classified as tap or drag
    PressPending,
    /// Completion follows the pointer
    Dragging,
    /// A transition is running or queued
    Animating,
}

/// What the owner must do after an input step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Visual state changed; re-project.
    Project,
    /// A transition settled on this value.
    Settle(bool),
}

#[derive(Debug, Clone, Copy)]
enum Gesture {
    None,
    Pressed {
        pointer_type: PointerType,
        at: Duration,
        drag_blocked: bool,
    },
    Dragging {
        span: f32,
        from_on: bool,
    },
}

#[derive(Debug)]
enum Transition {
    Idle,
    Tweening { done: Completion, target: bool },
    Settling { done: Completion, target: bool },
}

enum Finished {
    Tween(bool),
    Settle(bool),
}

impl Transition {
    const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    fn finished(&self) -> Option<Finished> {
        match self {
            Self::Tweening { done, target } if done.is_done() => Some(Finished::Tween(*target)),
            Self::Settling { done, target } if done.is_done() => Some(Finished::Settle(*target)),
            _ => None,
        }
    }
}

struct PendingToggle {
    wait: Option<LocalBoxFuture<'static, Vec<()>>>,
}

impl PendingToggle {
    fn after(in_flight: Vec<Completion>) -> Self {
        Self {
            wait: Some(join_all(in_flight).boxed_local()),
        }
    }

    fn is_ready(&mut self) -> bool {
        let Some(wait) = self.wait.as_mut() else {
            return true;
        };
        let mut cx = Context::from_waker(noop_waker_ref());
        if wait.poll_unpin(&mut cx).is_ready() {
            self.wait = None;
            true
        } else {
            false
        }
    }
}

impl std::fmt::Debug for PendingToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingToggle")
            .field("waiting", &self.wait.is_some())
            .finish()
    }
}

/// Horizontal span a drag is mapped over.
///
/// An off toggle pivots on the track's right edge, an on toggle on its left
/// edge. Spans narrower than one pixel are widened so the map stays defined.
#[must_use]
pub fn drag_span(bounds: Rect, pointer_x: f32, from_on: bool) -> f32 {
    if from_on {
        (bounds.left() - pointer_x).min(-1.0)
    } else {
        (bounds.right() - pointer_x).max(1.0)
    }
}

/// Map a drag offset onto `[0, 100]`.
///
/// Off toggles map `[0, span]`, on toggles map `[span, 0]`. The result is
/// clamped; a NaN offset counts as no movement.
#[must_use]
pub fn drag_completion(offset: f32, span: f32, from_on: bool) -> f64 {
    let offset = if offset.is_nan() { 0.0 } else { offset };
    let fraction = if from_on {
        (offset - span) / -span
    } else {
        offset / span
    };
    (f64::from(fraction) * ON).clamp(0.0, ON)
}

/// Interaction state machine of one toggle.
#[derive(Debug)]
pub struct InputUnifier {
    timings: Timings,
    gesture: Gesture,
    transition: Transition,
    queue: VecDeque<PendingToggle>,
}

impl Default for InputUnifier {
    fn default() -> Self {
        Self::new(Timings::default())
    }
}

impl InputUnifier {
    /// Create an idle state machine.
    #[must_use]
    pub fn new(timings: Timings) -> Self {
        Self {
            timings,
            gesture: Gesture::None,
            transition: Transition::Idle,
            queue: VecDeque::new(),
        }
    }

    /// Timing constants.
    #[must_use]
    pub const fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> InteractionState {
        match self.gesture {
            Gesture::Dragging { .. } => InteractionState::Dragging,
            Gesture::Pressed { .. } => InteractionState::PressPending,
            Gesture::None if self.is_busy() => InteractionState::Animating,
            Gesture::None => InteractionState::Idle,
        }
    }

    /// Whether a transition is running or queued.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.transition.is_idle() || !self.queue.is_empty()
    }

    /// Number of toggle requests waiting to start.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Route one drag tracker signal.
    pub fn on_signal(
        &mut self,
        signal: DragSignal,
        bounds: Rect,
        state: &mut WidgetState,
        animator: &mut dyn Animator,
    ) -> Vec<Effect> {
        match signal {
            DragSignal::Press { pointer_type, .. } => self.press(pointer_type, state, animator),
            DragSignal::DragStart { origin } => self.drag_start(origin, bounds, state),
            DragSignal::Drag { offset } => self.drag_move(offset, state),
            DragSignal::DragEnd => self.drag_end(state, animator),
            DragSignal::Release { moved } => self.release(moved, state, animator),
            DragSignal::Cancel => self.cancel_gesture(state, animator),
        }
    }

    /// Pointer pressed. Touch pointers mark the toggle active at once.
    pub fn press(
        &mut self,
        pointer_type: PointerType,
        state: &mut WidgetState,
        animator: &dyn Animator,
    ) -> Vec<Effect> {
        if state.disabled {
            return Vec::new();
        }
        self.gesture = Gesture::Pressed {
            pointer_type,
            at: animator.now(),
            drag_blocked: false,
        };
        if pointer_type.is_touch() && !state.active {
            state.active = true;
            return vec![Effect::Project];
        }
        Vec::new()
    }

    /// The press turned into a drag anchored at `origin`. Ignored while a
    /// transition is running; such a press can no longer become a tap.
    pub fn drag_start(&mut self, origin: Point, bounds: Rect, state: &mut WidgetState) -> Vec<Effect> {
        if state.disabled {
            return Vec::new();
        }
        let busy = self.is_busy();
        let Gesture::Pressed { drag_blocked, .. } = &mut self.gesture else {
            return Vec::new();
        };
        if busy {
            *drag_blocked = true;
            return Vec::new();
        }

        let from_on = state.checked;
        self.gesture = Gesture::Dragging {
            span: drag_span(bounds, origin.x, from_on),
            from_on,
        };
        state.active = true;
        tracing::debug!(from_on, "drag started");
        vec![Effect::Project]
    }

    /// Pointer moved `offset` pixels from the drag origin.
    pub fn drag_move(&mut self, offset: f32, state: &mut WidgetState) -> Vec<Effect> {
        if state.disabled {
            return Vec::new();
        }
        let Gesture::Dragging { span, from_on } = self.gesture else {
            return Vec::new();
        };
        state.set_completion(drag_completion(offset, span, from_on));
        tracing::trace!(offset, completion = state.completion, "drag");
        vec![Effect::Project]
    }

    /// Drag released: settle on the majority side.
    pub fn drag_end(&mut self, state: &mut WidgetState, animator: &mut dyn Animator) -> Vec<Effect> {
        if !matches!(self.gesture, Gesture::Dragging { .. }) {
            return Vec::new();
        }
        self.gesture = Gesture::None;
        let target = state.completion >= ON / 2.0;
        tracing::debug!(completion = state.completion, target, "drag released");
        self.start_transition(state.completion, target, Duration::ZERO, animator);
        self.pump(state, animator)
    }

    /// Pointer released. A quick release of an undragged press is a tap.
    pub fn release(
        &mut self,
        moved: Option<f32>,
        state: &mut WidgetState,
        animator: &mut dyn Animator,
    ) -> Vec<Effect> {
        let Gesture::Pressed {
            pointer_type,
            at,
            drag_blocked,
        } = self.gesture
        else {
            return Vec::new();
        };
        self.gesture = Gesture::None;
        if state.disabled {
            return Vec::new();
        }

        let mut effects = Vec::new();
        let barely_moved = moved.map_or(true, |m| m < self.timings.touch_slop);
        if pointer_type.is_touch() && barely_moved && state.active && !self.is_busy() {
            state.active = false;
            effects.push(Effect::Project);
        }

        let held = animator.now().saturating_sub(at);
        if !drag_blocked && held <= self.timings.tap_threshold {
            effects.extend(self.request_toggle(state, animator));
        }
        effects
    }

    /// The platform cancelled the gesture. A drag settles as if released.
    pub fn cancel_gesture(
        &mut self,
        state: &mut WidgetState,
        animator: &mut dyn Animator,
    ) -> Vec<Effect> {
        match self.gesture {
            Gesture::Dragging { .. } => self.drag_end(state, animator),
            Gesture::Pressed { .. } => {
                self.gesture = Gesture::None;
                if state.active && !self.is_busy() {
                    state.active = false;
                    vec![Effect::Project]
                } else {
                    Vec::new()
                }
            }
            Gesture::None => Vec::new(),
        }
    }

    /// Queue a toggle to the opposite pole of the settled value. It starts
    /// immediately when nothing is running.
    pub fn request_toggle(
        &mut self,
        state: &mut WidgetState,
        animator: &mut dyn Animator,
    ) -> Vec<Effect> {
        if state.disabled {
            return Vec::new();
        }
        self.queue.push_back(PendingToggle::after(animator.in_flight()));

        let mut effects = Vec::new();
        if !state.active {
            state.active = true;
            effects.push(Effect::Project);
        }
        effects.extend(self.pump(state, animator));
        effects
    }

    /// Advance finished phases and start the next queued toggle when allowed.
    ///
    /// Stops right after a [`Effect::Settle`] so the owner can record the new
    /// settled value before the next toggle reads it; call again afterwards.
    pub fn pump(&mut self, state: &mut WidgetState, animator: &mut dyn Animator) -> Vec<Effect> {
        let mut effects = Vec::new();
        loop {
            match self.transition.finished() {
                Some(Finished::Tween(target)) => {
                    let done = animator.delayed_call(self.timings.settle_delay);
                    self.transition = Transition::Settling { done, target };
                    continue;
                }
                Some(Finished::Settle(target)) => {
                    self.transition = Transition::Idle;
                    state.completion = pole(target);
                    state.active = false;
                    effects.push(Effect::Settle(target));
                    return effects;
                }
                None => {}
            }

            if self.transition.is_idle() && !state.disabled && self.next_toggle_ready() {
                self.queue.pop_front();
                let target = !state.checked;
                state.active = true;
                tracing::debug!(target, queued = self.queue.len(), "toggle starting");
                self.start_transition(
                    state.completion,
                    target,
                    self.timings.toggle_delay(state.bounce),
                    animator,
                );
                effects.push(Effect::Project);
                continue;
            }
            return effects;
        }
    }

    /// Drop every queued toggle. A running transition still settles.
    pub fn drop_queued(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    /// Drop the gesture, the running transition and every queued toggle.
    pub fn kill(&mut self) {
        self.gesture = Gesture::None;
        self.transition = Transition::Idle;
        self.queue.clear();
    }

    fn next_toggle_ready(&mut self) -> bool {
        if matches!(self.gesture, Gesture::Dragging { .. }) {
            return false;
        }
        self.queue.front_mut().is_some_and(PendingToggle::is_ready)
    }

    fn start_transition(
        &mut self,
        from: f64,
        target: bool,
        delay: Duration,
        animator: &mut dyn Animator,
    ) {
        let tween = Tween::new(COMPLETE_PROPERTY, from, pole(target))
            .duration(self.timings.settle_duration)
            .delay(delay);
        let handle = animator.animate(tween);
        self.transition = Transition::Tweening {
            done: handle.completion,
            target,
        };
    }
}
