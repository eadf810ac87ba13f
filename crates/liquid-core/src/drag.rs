//! Pointer drag tracking.
//!
//! A [`DragTracker`] turns raw pointer events on a handle into a stream of
//! [`DragSignal`]s: a press, an optional drag (start, continuous horizontal
//! offsets, end) and a release. [`PointerDragTracker`] is the default
//! implementation; it unifies mouse, touch and pen input and applies a
//! movement threshold before a press becomes a drag.

use crate::event::{Event, MouseButton, PointerId, PointerType};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Configuration for drag recognition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Minimum distance (in pixels) before a press becomes a drag.
    pub threshold: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self { threshold: 3.0 }
    }
}

/// High-level signal produced by a drag tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragSignal {
    /// Pointer pressed on the handle.
    Press {
        /// Pointer type
        pointer_type: PointerType,
        /// Press position
        position: Point,
    },
    /// Movement exceeded the threshold; the drag is anchored at `origin`.
    DragStart {
        /// Press position the drag offsets are measured from
        origin: Point,
    },
    /// Horizontal offset from the drag origin.
    Drag {
        /// `current.x - origin.x`
        offset: f32,
    },
    /// Drag finished (pointer released after dragging).
    DragEnd,
    /// Pointer released.
    Release {
        /// Absolute horizontal travel between press and release, `None` if
        /// the pointer never moved.
        moved: Option<f32>,
    },
    /// Tracking was cancelled by the platform.
    Cancel,
}

/// The drag tracking capability.
pub trait DragTracker {
    /// Set the handle area presses must land in.
    fn set_handle(&mut self, handle: Rect);

    /// Feed a pointer event, returning the signals it produced.
    fn process(&mut self, event: &Event) -> Vec<DragSignal>;

    /// Whether a press is currently being tracked.
    fn is_tracking(&self) -> bool;

    /// Drop any tracked press without emitting signals.
    fn kill(&mut self);
}

/// Information about the tracked pointer.
#[derive(Debug, Clone)]
struct Tracked {
    id: PointerId,
    start_position: Point,
    last_position: Option<Point>,
    dragging: bool,
}

/// Default pointer drag tracker.
#[derive(Debug, Default)]
pub struct PointerDragTracker {
    config: DragConfig,
    handle: Rect,
    tracked: Option<Tracked>,
}

impl PointerDragTracker {
    /// Create a tracker with default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DragConfig::default())
    }

    /// Create a tracker with custom config.
    #[must_use]
    pub fn with_config(config: DragConfig) -> Self {
        Self {
            config,
            handle: Rect::default(),
            tracked: None,
        }
    }

    /// Get the drag configuration.
    #[must_use]
    pub const fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Whether the tracked press has turned into a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracked.as_ref().is_some_and(|t| t.dragging)
    }

    fn on_down(
        &mut self,
        id: PointerId,
        pointer_type: PointerType,
        position: Point,
        is_primary: bool,
        button: Option<MouseButton>,
    ) -> Vec<DragSignal> {
        if self.tracked.is_some() || !is_primary {
            return Vec::new();
        }
        if pointer_type == PointerType::Mouse && button != Some(MouseButton::Left) {
            return Vec::new();
        }
        if !self.handle.contains_point(&position) {
            return Vec::new();
        }

        self.tracked = Some(Tracked {
            id,
            start_position: position,
            last_position: None,
            dragging: false,
        });
        vec![DragSignal::Press {
            pointer_type,
            position,
        }]
    }

    fn on_move(&mut self, id: PointerId, position: Point) -> Vec<DragSignal> {
        let threshold = self.config.threshold;
        let Some(tracked) = self.tracked.as_mut().filter(|t| t.id == id) else {
            return Vec::new();
        };
        tracked.last_position = Some(position);

        let mut signals = Vec::new();
        if !tracked.dragging {
            if tracked.start_position.distance(&position) <= threshold {
                return signals;
            }
            tracked.dragging = true;
            signals.push(DragSignal::DragStart {
                origin: tracked.start_position,
            });
        }
        signals.push(DragSignal::Drag {
            offset: position.x - tracked.start_position.x,
        });
        signals
    }

    fn take_tracked(&mut self, id: PointerId) -> Option<Tracked> {
        if self.tracked.as_ref().is_some_and(|t| t.id == id) {
            self.tracked.take()
        } else {
            None
        }
    }

    fn on_up(&mut self, id: PointerId, position: Point) -> Vec<DragSignal> {
        let Some(tracked) = self.take_tracked(id) else {
            return Vec::new();
        };

        let moved = tracked
            .last_position
            .map(|_| (position.x - tracked.start_position.x).abs());
        let mut signals = Vec::with_capacity(2);
        if tracked.dragging {
            signals.push(DragSignal::DragEnd);
        }
        signals.push(DragSignal::Release { moved });
        signals
    }
}

impl DragTracker for PointerDragTracker {
    fn set_handle(&mut self, handle: Rect) {
        self.handle = handle;
    }

    fn process(&mut self, event: &Event) -> Vec<DragSignal> {
        match event {
            Event::PointerDown {
                pointer_id,
                pointer_type,
                position,
                is_primary,
                button,
            } => self.on_down(*pointer_id, *pointer_type, *position, *is_primary, *button),
            Event::PointerMove {
                pointer_id,
                position,
                ..
            } => self.on_move(*pointer_id, *position),
            Event::PointerUp {
                pointer_id,
                position,
                ..
            } => self.on_up(*pointer_id, *position),
            Event::PointerCancel { pointer_id } => {
                if self.take_tracked(*pointer_id).is_some() {
                    vec![DragSignal::Cancel]
                } else {
                    Vec::new()
                }
            }
            Event::KeyDown { .. } | Event::KeyUp { .. } => Vec::new(),
        }
    }

    fn is_tracking(&self) -> bool {
        self.tracked.is_some()
    }

    fn kill(&mut self) {
        self.tracked = None;
    }
}
