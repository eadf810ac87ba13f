//! Core types and traits for liquid UI elements.
//!
//! This crate provides the host-facing plumbing the elements are built on:
//! - Geometric primitives: [`Point`], [`Rect`]
//! - Color representation: [`Color`] with HSL construction
//! - Input events: [`Event`], [`EventOutcome`]
//! - Tweening: the [`Animator`] capability and the frame-driven [`Timeline`]
//! - Drag recognition: the [`DragTracker`] capability and [`PointerDragTracker`]
//! - Completion signals: [`Completion`], a future that resolves when a tween ends
//! - Elements: the [`Element`] trait, [`Attributes`] and the [`ElementRegistry`]

mod attributes;
mod color;
mod completion;
mod element;
mod event;
mod geometry;
mod listeners;

pub mod animation;
pub mod drag;

pub use animation::{Animator, EasedValue, Easing, Sample, Timeline, Tween, TweenHandle, TweenId};
pub use attributes::Attributes;
pub use color::Color;
pub use completion::Completion;
pub use drag::{DragConfig, DragSignal, DragTracker, PointerDragTracker};
pub use element::{Element, ElementFactory, ElementRegistry, RegistryError};
pub use event::{Event, EventOutcome, Key, MouseButton, PointerId, PointerType};
pub use geometry::{Point, Rect};
pub use listeners::{Callback, Emitter, ListenerId, ListenerKind, ListenerSet};
