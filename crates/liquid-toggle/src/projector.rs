//! Visual state projection.
//!
//! [`project`] pushes the widget state into a [`RenderSurface`]: goo filter
//! parameters, the continuous completion value, the track colour and the
//! discrete active/pressed/bounce markers. Size-dependent dimensions are
//! pushed separately by [`project_size`] since they only change with the
//! `size` attribute. Both are idempotent.

use crate::size::{Dimensions, SizeProfile};
use crate::state::WidgetState;
use liquid_core::Color;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Name of the animated completion property.
pub const COMPLETE_PROPERTY: &str = "--complete";

/// Indicator scale while active.
pub const EXPANDED_SCALE: f32 = 1.65;

/// Gaussian blur + alpha sharpening filter that produces the liquid look.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GooFilter {
    /// Gaussian standard deviation
    pub std_deviation: f32,
    /// Alpha multiplier of the colour matrix
    pub alpha: f32,
}

impl GooFilter {
    /// Filter for a size profile in the given interaction mode.
    #[must_use]
    pub const fn for_profile(profile: &SizeProfile, active: bool) -> Self {
        Self {
            std_deviation: profile.deviation_for(active),
            alpha: profile.alpha,
        }
    }

    /// The 4×5 colour matrix: identity on RGB, alpha sharpened to
    /// `alpha × a − 10`.
    #[must_use]
    pub const fn matrix(&self) -> [[f32; 5]; 4] {
        [
            [1.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, self.alpha, -10.0],
        ]
    }

    /// The matrix in SVG `values` notation, one row per line.
    #[must_use]
    pub fn matrix_values(&self) -> String {
        self.matrix()
            .iter()
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Indicator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndicatorLayout {
    /// At rest
    #[default]
    Compact,
    /// While interacting
    Expanded,
}

impl IndicatorLayout {
    /// Layout for the given interaction mode.
    #[must_use]
    pub const fn for_active(active: bool) -> Self {
        if active {
            Self::Expanded
        } else {
            Self::Compact
        }
    }

    /// Indicator scale factor.
    #[must_use]
    pub const fn scale(self) -> f32 {
        match self {
            Self::Compact => 1.0,
            Self::Expanded => EXPANDED_SCALE,
        }
    }
}

/// Liquid colour for a completion value: a green that saturates and darkens
/// as the toggle turns on.
#[must_use]
pub fn track_color(completion: f64) -> Color {
    let c = completion.clamp(0.0, 100.0) as f32 / 100.0;
    let saturation = c.mul_add(92.0, 8.0);
    let lightness = c.mul_add(-38.0, 81.0);
    Color::from_hsl(144.0, saturation / 100.0, lightness / 100.0)
}

/// Everything [`project`] pushes, computed from one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Continuous completion
    pub completion: f64,
    /// Active marker
    pub active: bool,
    /// Accessibility pressed marker (the settled value)
    pub pressed: bool,
    /// Bounce marker
    pub bounce: bool,
    /// Filter parameters
    pub filter: GooFilter,
    /// Indicator shape
    pub indicator: IndicatorLayout,
    /// Liquid colour
    pub track_color: Color,
}

impl Projection {
    /// Compute the projection of a state with an explicit size profile.
    #[must_use]
    pub fn new(state: &WidgetState, profile: &SizeProfile) -> Self {
        Self {
            completion: state.completion,
            active: state.active,
            pressed: state.checked,
            bounce: state.bounce,
            filter: GooFilter::for_profile(profile, state.active),
            indicator: IndicatorLayout::for_active(state.active),
            track_color: track_color(state.completion),
        }
    }

    /// Compute the projection of a state with its own size profile.
    #[must_use]
    pub fn of(state: &WidgetState) -> Self {
        Self::new(state, state.profile())
    }
}

/// Rendering layer consuming projected values.
pub trait RenderSurface {
    /// Goo filter parameters.
    fn set_filter(&mut self, filter: GooFilter);

    /// Continuous completion in `[0, 100]`.
    fn set_completion(&mut self, completion: f64);

    /// Liquid colour.
    fn set_track_color(&mut self, color: Color);

    /// Active marker: expanded indicator and outline suppression.
    fn set_active(&mut self, active: bool);

    /// Pressed marker for accessibility.
    fn set_pressed(&mut self, pressed: bool);

    /// Bounce marker: transitions are instant when false.
    fn set_bounce(&mut self, bounce: bool);

    /// Size-dependent dimensions.
    fn set_dimensions(&mut self, dimensions: Dimensions);
}

/// Push the state to the surface.
pub fn project(state: &WidgetState, profile: &SizeProfile, surface: &mut dyn RenderSurface) {
    let projection = Projection::new(state, profile);
    tracing::trace!(
        completion = projection.completion,
        active = projection.active,
        pressed = projection.pressed,
        "project"
    );
    surface.set_filter(projection.filter);
    surface.set_completion(projection.completion);
    surface.set_track_color(projection.track_color);
    surface.set_active(projection.active);
    surface.set_pressed(projection.pressed);
    surface.set_bounce(projection.bounce);
}

/// Push the size-dependent dimensions to the surface.
pub fn project_size(profile: &SizeProfile, surface: &mut dyn RenderSurface) {
    surface.set_dimensions(profile.dimensions());
}

/// Default surface: a shared map of style properties and state markers, the
/// way a styled host element exposes them.
///
/// Clones share the same map, so a host can keep one handle while the toggle
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct StyleProperties {
    values: Rc<RefCell<BTreeMap<String, String>>>,
}

impl StyleProperties {
    /// Create an empty property map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one property.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.values.borrow().get(name).cloned()
    }

    /// Copy of every property.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.borrow().clone()
    }

    fn set(&self, name: &str, value: String) {
        self.values.borrow_mut().insert(name.to_owned(), value);
    }
}

impl RenderSurface for StyleProperties {
    fn set_filter(&mut self, filter: GooFilter) {
        self.set("stdDeviation", filter.std_deviation.to_string());
        self.set("values", filter.matrix_values());
    }

    fn set_completion(&mut self, completion: f64) {
        self.set(COMPLETE_PROPERTY, completion.to_string());
    }

    fn set_track_color(&mut self, color: Color) {
        self.set("--checked", color.to_hex());
    }

    fn set_active(&mut self, active: bool) {
        self.set("data-active", active.to_string());
    }

    fn set_pressed(&mut self, pressed: bool) {
        self.set("aria-pressed", pressed.to_string());
    }

    fn set_bounce(&mut self, bounce: bool) {
        self.set("data-bounce", bounce.to_string());
    }

    fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.set("--width", dimensions.width.to_string());
        self.set("--height", dimensions.height.to_string());
        self.set("--border", format!("{}px", dimensions.border));
        self.set("--blur-size", format!("{}px", dimensions.blur_size));
    }
}
