//! Input events delivered to elements.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
///
/// Pointer events unify mouse, touch and pen input; the pointer type travels
/// with every event so elements can treat touch-capable pointers specially.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer down
    PointerDown {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
        /// Is primary pointer
        is_primary: bool,
        /// Button (for mouse pointers)
        button: Option<MouseButton>,
    },
    /// Pointer moved
    PointerMove {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
    },
    /// Pointer up
    PointerUp {
        /// Pointer ID
        pointer_id: PointerId,
        /// Pointer type
        pointer_type: PointerType,
        /// Position
        position: Point,
    },
    /// Pointer cancelled (e.g., palm rejection, capture lost)
    PointerCancel {
        /// Pointer ID
        pointer_id: PointerId,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Key released
    KeyUp {
        /// Key released
        key: Key,
    },
}

impl Event {
    /// Primary mouse press at a position.
    #[must_use]
    pub const fn mouse_down(position: Point) -> Self {
        Self::PointerDown {
            pointer_id: PointerId(1),
            pointer_type: PointerType::Mouse,
            position,
            is_primary: true,
            button: Some(MouseButton::Left),
        }
    }

    /// Primary mouse move to a position.
    #[must_use]
    pub const fn mouse_move(position: Point) -> Self {
        Self::PointerMove {
            pointer_id: PointerId(1),
            pointer_type: PointerType::Mouse,
            position,
        }
    }

    /// Primary mouse release at a position.
    #[must_use]
    pub const fn mouse_up(position: Point) -> Self {
        Self::PointerUp {
            pointer_id: PointerId(1),
            pointer_type: PointerType::Mouse,
            position,
        }
    }

    /// Primary touch start at a position.
    #[must_use]
    pub const fn touch_down(position: Point) -> Self {
        Self::PointerDown {
            pointer_id: PointerId(2),
            pointer_type: PointerType::Touch,
            position,
            is_primary: true,
            button: None,
        }
    }

    /// Primary touch move to a position.
    #[must_use]
    pub const fn touch_move(position: Point) -> Self {
        Self::PointerMove {
            pointer_id: PointerId(2),
            pointer_type: PointerType::Touch,
            position,
        }
    }

    /// Primary touch end at a position.
    #[must_use]
    pub const fn touch_up(position: Point) -> Self {
        Self::PointerUp {
            pointer_id: PointerId(2),
            pointer_type: PointerType::Touch,
            position,
        }
    }

    /// Whether this is a pointer event.
    #[must_use]
    pub const fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::PointerMove { .. }
                | Self::PointerUp { .. }
                | Self::PointerCancel { .. }
        )
    }
}

/// Pointer identifier for pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct PointerId(pub u32);

/// Type of pointer device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PointerType {
    /// Mouse pointer
    #[default]
    Mouse,
    /// Touch pointer
    Touch,
    /// Pen/stylus pointer
    Pen,
}

impl PointerType {
    /// Whether the pointer comes from a touch-capable device.
    #[must_use]
    pub const fn is_touch(self) -> bool {
        matches!(self, Self::Touch)
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
}

/// Keyboard key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter/Return key
    Enter,
    /// Space key
    Space,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Any other key, by its character
    Char(char),
}

/// What an element did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventOutcome {
    /// The element acted on the event.
    pub handled: bool,
    /// The host must suppress the event's default action (e.g. scrolling).
    pub default_prevented: bool,
}

impl EventOutcome {
    /// Event was not used.
    pub const IGNORED: Self = Self {
        handled: false,
        default_prevented: false,
    };

    /// Event was used.
    pub const HANDLED: Self = Self {
        handled: true,
        default_prevented: false,
    };

    /// Mark the default action as prevented.
    #[must_use]
    pub const fn prevent_default(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}
