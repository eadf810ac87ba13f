//! Drag tracker that records what it was told and what it produced.

use liquid_core::{DragConfig, DragSignal, DragTracker, Event, PointerDragTracker, Rect};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct DragRecord {
    handle: Option<Rect>,
    kills: usize,
    signals: Vec<DragSignal>,
}

/// Shared view of a [`RecordingDrag`]'s history.
#[derive(Debug, Clone, Default)]
pub struct DragLog {
    record: Rc<RefCell<DragRecord>>,
}

impl DragLog {
    /// Last handle area set.
    #[must_use]
    pub fn handle(&self) -> Option<Rect> {
        self.record.borrow().handle
    }

    /// Number of `kill` calls.
    #[must_use]
    pub fn kills(&self) -> usize {
        self.record.borrow().kills
    }

    /// Every signal produced, oldest first.
    #[must_use]
    pub fn signals(&self) -> Vec<DragSignal> {
        self.record.borrow().signals.clone()
    }
}

/// Pointer drag tracker wrapped with a [`DragLog`].
#[derive(Debug, Default)]
pub struct RecordingDrag {
    tracker: PointerDragTracker,
    log: DragLog,
}

impl RecordingDrag {
    /// Record a default pointer tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer tracker with custom config.
    #[must_use]
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            tracker: PointerDragTracker::with_config(config),
            log: DragLog::default(),
        }
    }

    /// Handle to the history.
    #[must_use]
    pub fn log(&self) -> DragLog {
        self.log.clone()
    }
}

impl DragTracker for RecordingDrag {
    fn set_handle(&mut self, handle: Rect) {
        self.log.record.borrow_mut().handle = Some(handle);
        self.tracker.set_handle(handle);
    }

    fn process(&mut self, event: &Event) -> Vec<DragSignal> {
        let signals = self.tracker.process(event);
        self.log
            .record
            .borrow_mut()
            .signals
            .extend(signals.iter().copied());
        signals
    }

    fn is_tracking(&self) -> bool {
        self.tracker.is_tracking()
    }

    fn kill(&mut self) {
        self.log.record.borrow_mut().kills += 1;
        self.tracker.kill();
    }
}
