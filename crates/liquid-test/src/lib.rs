//! Deterministic test harness for liquid UI elements.
//!
//! Provides recording and instant implementations of the element
//! capabilities, plus a [`Harness`] that drives a toggle through input and
//! time:
//! - [`RecordingSurface`]: records every projected value
//! - [`InstantAnimator`]: finishes every tween and timer on the next frame
//! - [`RecordingDrag`]: a pointer drag tracker that keeps its history
//! - [`ChangeLog`]: collects change notifications

mod animator;
mod drag;
mod harness;
mod surface;

pub use animator::{InstantAnimator, TweenLog};
pub use drag::{DragLog, RecordingDrag};
pub use harness::{ChangeLog, Harness, FRAME};
pub use surface::{RecordingSurface, SurfaceCall};
