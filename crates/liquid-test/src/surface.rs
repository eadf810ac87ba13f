//! Render surface that records every projected value.

use liquid_core::Color;
use liquid_toggle::{Dimensions, GooFilter, RenderSurface};
use std::cell::RefCell;
use std::rc::Rc;

/// One call made on a [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCall {
    /// `set_filter`
    Filter(GooFilter),
    /// `set_completion`
    Completion(f64),
    /// `set_track_color`
    TrackColor(Color),
    /// `set_active`
    Active(bool),
    /// `set_pressed`
    Pressed(bool),
    /// `set_bounce`
    Bounce(bool),
    /// `set_dimensions`
    Dimensions(Dimensions),
}

/// Surface recording its call history. Clones share the history.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Rc<RefCell<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Forget the history.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Every completion value pushed, oldest first.
    #[must_use]
    pub fn completions(&self) -> Vec<f64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Completion(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Last completion pushed.
    #[must_use]
    pub fn completion(&self) -> Option<f64> {
        self.last(|call| match call {
            SurfaceCall::Completion(value) => Some(*value),
            _ => None,
        })
    }

    /// Last filter pushed.
    #[must_use]
    pub fn filter(&self) -> Option<GooFilter> {
        self.last(|call| match call {
            SurfaceCall::Filter(filter) => Some(*filter),
            _ => None,
        })
    }

    /// Last dimensions pushed.
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.last(|call| match call {
            SurfaceCall::Dimensions(dims) => Some(*dims),
            _ => None,
        })
    }

    /// Last active marker pushed.
    #[must_use]
    pub fn active(&self) -> Option<bool> {
        self.last(|call| match call {
            SurfaceCall::Active(active) => Some(*active),
            _ => None,
        })
    }

    /// Last pressed marker pushed.
    #[must_use]
    pub fn pressed(&self) -> Option<bool> {
        self.last(|call| match call {
            SurfaceCall::Pressed(pressed) => Some(*pressed),
            _ => None,
        })
    }

    /// Last bounce marker pushed.
    #[must_use]
    pub fn bounce(&self) -> Option<bool> {
        self.last(|call| match call {
            SurfaceCall::Bounce(bounce) => Some(*bounce),
            _ => None,
        })
    }

    fn last<T>(&self, pick: impl Fn(&SurfaceCall) -> Option<T>) -> Option<T> {
        self.calls.borrow().iter().rev().find_map(pick)
    }

    fn push(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl RenderSurface for RecordingSurface {
    fn set_filter(&mut self, filter: GooFilter) {
        self.push(SurfaceCall::Filter(filter));
    }

    fn set_completion(&mut self, completion: f64) {
        self.push(SurfaceCall::Completion(completion));
    }

    fn set_track_color(&mut self, color: Color) {
        self.push(SurfaceCall::TrackColor(color));
    }

    fn set_active(&mut self, active: bool) {
        self.push(SurfaceCall::Active(active));
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.push(SurfaceCall::Pressed(pressed));
    }

    fn set_bounce(&mut self, bounce: bool) {
        self.push(SurfaceCall::Bounce(bounce));
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.push(SurfaceCall::Dimensions(dimensions));
    }
}
