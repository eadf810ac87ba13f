//! Tweening of numeric properties.
//!
//! The [`Animator`] trait is the narrow "animate a numeric property from A to
//! B over a duration, after a delay" capability elements depend on.
//! [`Timeline`] is the frame-driven implementation: the host calls
//! [`Animator::advance`] once per frame and receives the sampled values.

use crate::completion::Completion;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};
use std::time::Duration;

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Ease out (slow end)
    #[default]
    EaseOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
        }
    }
}

// =============================================================================
// EasedValue
// =============================================================================

/// An easing-based animated value.
#[derive(Debug, Clone)]
pub struct EasedValue {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl EasedValue {
    /// Create new eased animation.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing: Easing::default(),
        }
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get current value. The final value is exact.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_complete() {
            return self.to;
        }
        let eased = self.easing.apply(self.progress());
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Update animation.
    pub fn update(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

// =============================================================================
// Tween description
// =============================================================================

/// A request to animate one numeric property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    /// Name of the animated property (e.g. `--complete`)
    pub property: String,
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Duration once started
    pub duration: Duration,
    /// Leading delay before the value starts moving
    pub delay: Duration,
    /// Easing function
    pub easing: Easing,
}

impl Tween {
    /// Tween `property` from `from` to `to` with no duration and no delay.
    #[must_use]
    pub fn new(property: impl Into<String>, from: f64, to: f64) -> Self {
        Self {
            property: property.into(),
            from,
            to,
            duration: Duration::ZERO,
            delay: Duration::ZERO,
            easing: Easing::default(),
        }
    }

    /// Set the duration.
    #[must_use]
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the leading delay.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing.
    #[must_use]
    pub const fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay plus duration.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.delay + self.duration
    }
}

new_key_type! {
    /// Handle to a running tween or timer.
    pub struct TweenId;
}

/// Handle returned when a tween starts.
#[derive(Debug, Clone)]
pub struct TweenHandle {
    /// Identifier of the running tween
    pub id: TweenId,
    /// Resolves when the tween finishes or is killed
    pub completion: Completion,
}

/// A sampled property value produced by [`Animator::advance`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Tween that produced the value
    pub tween: TweenId,
    /// Animated property
    pub property: String,
    /// Current value
    pub value: f64,
    /// Whether this is the tween's final value
    pub finished: bool,
}

/// The tweening capability.
pub trait Animator {
    /// Animator clock: total time advanced so far.
    fn now(&self) -> Duration;

    /// Start a tween. Its values are reported by subsequent `advance` calls.
    fn animate(&mut self, tween: Tween) -> TweenHandle;

    /// Start a timer that resolves after `delay`.
    fn delayed_call(&mut self, delay: Duration) -> Completion;

    /// Advance the clock, returning every value sampled during the step.
    fn advance(&mut self, dt: Duration) -> Vec<Sample>;

    /// Completion handles of every tween and timer still running.
    fn in_flight(&self) -> Vec<Completion>;

    /// Stop everything. Killed completions resolve so waiters never hang.
    fn kill_all(&mut self);

    /// Whether anything is still running.
    fn is_idle(&self) -> bool {
        self.in_flight().is_empty()
    }
}

// =============================================================================
// Timeline
// =============================================================================

#[derive(Debug)]
enum Entry {
    Tween {
        property: String,
        delay_left: Duration,
        run_left: Duration,
        value: EasedValue,
        completion: Completion,
    },
    Timer {
        left: Duration,
        completion: Completion,
    },
}

impl Entry {
    fn completion(&self) -> &Completion {
        match self {
            Self::Tween { completion, .. } | Self::Timer { completion, .. } => completion,
        }
    }
}

/// Frame-driven animator.
#[derive(Debug, Default)]
pub struct Timeline {
    now: Duration,
    entries: SlotMap<TweenId, Entry>,
}

impl Timeline {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of running tweens and timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Animator for Timeline {
    fn now(&self) -> Duration {
        self.now
    }

    fn animate(&mut self, tween: Tween) -> TweenHandle {
        let completion = Completion::new();
        let value = EasedValue::new(tween.from, tween.to, tween.duration.as_secs_f64())
            .with_easing(tween.easing);
        let id = self.entries.insert(Entry::Tween {
            property: tween.property,
            delay_left: tween.delay,
            run_left: tween.duration,
            value,
            completion: completion.clone(),
        });
        tracing::trace!(?id, from = tween.from, to = tween.to, "tween started");
        TweenHandle { id, completion }
    }

    fn delayed_call(&mut self, delay: Duration) -> Completion {
        let completion = Completion::new();
        self.entries.insert(Entry::Timer {
            left: delay,
            completion: completion.clone(),
        });
        completion
    }

    fn advance(&mut self, dt: Duration) -> Vec<Sample> {
        self.now += dt;
        let mut samples = Vec::new();
        let mut finished = Vec::new();

        for (id, entry) in &mut self.entries {
            match entry {
                Entry::Tween {
                    property,
                    delay_left,
                    run_left,
                    value,
                    ..
                } => {
                    let step = if *delay_left > dt {
                        *delay_left -= dt;
                        continue;
                    } else {
                        let rest = dt - *delay_left;
                        *delay_left = Duration::ZERO;
                        rest
                    };
                    // Run time is tracked exactly; the eased value snaps to its end.
                    *run_left = run_left.saturating_sub(step);
                    let done = run_left.is_zero();
                    if done {
                        value.elapsed = value.duration;
                    } else {
                        value.update(step.as_secs_f64());
                    }
                    samples.push(Sample {
                        tween: id,
                        property: property.clone(),
                        value: value.value(),
                        finished: done,
                    });
                    if done {
                        finished.push(id);
                    }
                }
                Entry::Timer { left, .. } => {
                    if *left > dt {
                        *left -= dt;
                    } else {
                        finished.push(id);
                    }
                }
            }
        }

        for id in finished {
            if let Some(entry) = self.entries.remove(id) {
                entry.completion().resolve();
            }
        }
        samples
    }

    fn in_flight(&self) -> Vec<Completion> {
        self.entries
            .values()
            .map(|entry| entry.completion().clone())
            .collect()
    }

    fn kill_all(&mut self) {
        for (_, entry) in self.entries.drain() {
            entry.completion().resolve();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut] {
            assert!((easing.apply(0.0)).abs() < 1e-9, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-9, "{easing:?}");
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn test_eased_value_final_is_exact() {
        let mut v = EasedValue::new(37.5, 100.0, 0.15);
        v.update(0.2);
        assert!(v.is_complete());
        assert_eq!(v.value(), 100.0);
    }

    #[test]
    fn test_eased_value_zero_duration() {
        let v = EasedValue::new(0.0, 100.0, 0.0);
        assert!(v.is_complete());
        assert_eq!(v.progress(), 1.0);
        assert_eq!(v.value(), 100.0);
    }

    #[test]
    fn test_tween_builder() {
        let t = Tween::new("--complete", 0.0, 100.0)
            .duration(ms(150))
            .delay(ms(200))
            .easing(Easing::Linear);
        assert_eq!(t.total(), ms(350));
        assert_eq!(t.easing, Easing::Linear);
    }

    #[test]
    fn test_timeline_samples_until_finished() {
        let mut timeline = Timeline::new();
        let handle = timeline.animate(
            Tween::new("--complete", 0.0, 100.0)
                .duration(ms(100))
                .easing(Easing::Linear),
        );

        let samples = timeline.advance(ms(50));
        assert_eq!(samples.len(), 1);
        assert!((samples[0].value - 50.0).abs() < 1e-6);
        assert!(!samples[0].finished);
        assert!(!handle.completion.is_done());

        let samples = timeline.advance(ms(50));
        assert_eq!(samples[0].value, 100.0);
        assert!(samples[0].finished);
        assert!(handle.completion.is_done());
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_timeline_delay_holds_samples() {
        let mut timeline = Timeline::new();
        timeline.animate(
            Tween::new("--complete", 0.0, 100.0)
                .duration(ms(100))
                .delay(ms(200))
                .easing(Easing::Linear),
        );

        assert!(timeline.advance(ms(150)).is_empty());
        let samples = timeline.advance(ms(100));
        assert_eq!(samples.len(), 1);
        assert!((samples[0].value - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_timeline_timer() {
        let mut timeline = Timeline::new();
        let done = timeline.delayed_call(ms(50));
        assert!(timeline.advance(ms(20)).is_empty());
        assert!(!done.is_done());
        timeline.advance(ms(30));
        assert!(done.is_done());
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_timeline_in_flight_and_kill() {
        let mut timeline = Timeline::new();
        let a = timeline.animate(Tween::new("--complete", 0.0, 1.0).duration(ms(10)));
        let b = timeline.delayed_call(ms(10));
        assert_eq!(timeline.in_flight().len(), 2);
        assert_eq!(timeline.len(), 2);

        timeline.kill_all();
        assert!(a.completion.is_done());
        assert!(b.is_done());
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_timeline_clock_accumulates() {
        let mut timeline = Timeline::new();
        timeline.advance(ms(16));
        timeline.advance(ms(16));
        assert_eq!(timeline.now(), ms(32));
    }

    proptest! {
        #[test]
        fn prop_eased_value_stays_between_endpoints(from in 0.0f64..100.0, to in 0.0f64..100.0, t in 0.0f64..1.0) {
            let mut v = EasedValue::new(from, to, 1.0);
            v.update(t);
            let lo = from.min(to) - 1e-9;
            let hi = from.max(to) + 1e-9;
            prop_assert!(v.value() >= lo && v.value() <= hi);
        }

        #[test]
        fn prop_timeline_always_finishes(duration_ms in 0u64..500, delay_ms in 0u64..500) {
            let mut timeline = Timeline::new();
            let handle = timeline.animate(
                Tween::new("--complete", 0.0, 100.0)
                    .duration(ms(duration_ms))
                    .delay(ms(delay_ms)),
            );
            for _ in 0..70 {
                timeline.advance(ms(16));
            }
            prop_assert!(handle.completion.is_done());
        }
    }
}
