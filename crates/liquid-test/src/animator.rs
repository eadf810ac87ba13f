//! Animator that finishes everything on the next frame.

use liquid_core::{Animator, Completion, Sample, Tween, TweenHandle, TweenId};
use slotmap::SlotMap;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Shared log of every tween started on an [`InstantAnimator`].
#[derive(Debug, Clone, Default)]
pub struct TweenLog {
    tweens: Rc<RefCell<Vec<Tween>>>,
}

impl TweenLog {
    /// Started tweens, oldest first.
    #[must_use]
    pub fn tweens(&self) -> Vec<Tween> {
        self.tweens.borrow().clone()
    }

    /// Number of started tweens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.borrow().len()
    }

    /// Whether no tween was started.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.borrow().is_empty()
    }
}

#[derive(Debug)]
enum Running {
    Tween {
        property: String,
        to: f64,
        completion: Completion,
    },
    Timer {
        completion: Completion,
    },
}

/// Deterministic animator: each `advance` jumps every running tween to its
/// end value and fires every timer, regardless of `dt`.
#[derive(Debug, Default)]
pub struct InstantAnimator {
    now: Duration,
    running: SlotMap<TweenId, Running>,
    log: TweenLog,
}

impl InstantAnimator {
    /// Create an idle animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the tween log.
    #[must_use]
    pub fn log(&self) -> TweenLog {
        self.log.clone()
    }
}

impl Animator for InstantAnimator {
    fn now(&self) -> Duration {
        self.now
    }

    fn animate(&mut self, tween: Tween) -> TweenHandle {
        let completion = Completion::new();
        self.log.tweens.borrow_mut().push(tween.clone());
        let id = self.running.insert(Running::Tween {
            property: tween.property,
            to: tween.to,
            completion: completion.clone(),
        });
        TweenHandle { id, completion }
    }

    fn delayed_call(&mut self, _delay: Duration) -> Completion {
        let completion = Completion::new();
        self.running.insert(Running::Timer {
            completion: completion.clone(),
        });
        completion
    }

    fn advance(&mut self, dt: Duration) -> Vec<Sample> {
        self.now += dt;
        let mut samples = Vec::new();
        for (id, running) in self.running.drain() {
            match running {
                Running::Tween {
                    property,
                    to,
                    completion,
                } => {
                    samples.push(Sample {
                        tween: id,
                        property,
                        value: to,
                        finished: true,
                    });
                    completion.resolve();
                }
                Running::Timer { completion } => completion.resolve(),
            }
        }
        samples
    }

    fn in_flight(&self) -> Vec<Completion> {
        self.running
            .values()
            .map(|running| match running {
                Running::Tween { completion, .. } | Running::Timer { completion } => {
                    completion.clone()
                }
            })
            .collect()
    }

    fn kill_all(&mut self) {
        for (_, running) in self.running.drain() {
            match running {
                Running::Tween { completion, .. } | Running::Timer { completion } => {
                    completion.resolve();
                }
            }
        }
    }
}
