//! Liquid toggle switch element.
//!
//! A binary toggle whose indicator morphs like a liquid. The crate is split
//! along the element's responsibilities:
//! - [`size`]: the size profile table
//! - [`projector`]: pushing state into a [`RenderSurface`]
//! - [`interaction`]: the input state machine unifying taps, drags and keys
//! - attribute sync and attach/detach, as methods of [`LiquidToggle`]
//!
//! The element is registered explicitly:
//!
//! ```
//! use liquid_core::{Element, ElementRegistry};
//!
//! let mut registry = ElementRegistry::new();
//! liquid_toggle::register(&mut registry).expect("first registration");
//! let toggle = registry.create("liquid-toggle").expect("defined");
//! assert_eq!(toggle.tag_name(), "liquid-toggle");
//! ```

mod config;
mod lifecycle;
mod state;
mod sync;
mod toggle;

pub mod interaction;
pub mod projector;
pub mod size;

pub use config::{ObservedAttribute, Timings, ToggleConfig};
pub use interaction::{Effect, InputUnifier, InteractionState};
pub use projector::{
    project, project_size, GooFilter, IndicatorLayout, Projection, RenderSurface, StyleProperties,
    COMPLETE_PROPERTY,
};
pub use size::{Deviation, Dimensions, ParseSizeError, SizeName, SizeProfile};
pub use state::WidgetState;
pub use toggle::{ChangeEvent, LiquidToggle};

pub use liquid_core::{Element, ElementRegistry, RegistryError};

/// Define `liquid-toggle` on a registry.
pub fn register(registry: &mut ElementRegistry) -> Result<(), RegistryError> {
    registry.define(LiquidToggle::TAG, || Box::new(LiquidToggle::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_defines_tag() {
        let mut registry = ElementRegistry::new();
        register(&mut registry).expect("register");
        assert!(registry.is_defined(LiquidToggle::TAG));

        let element = registry.create(LiquidToggle::TAG).expect("create");
        assert!(element.as_any().downcast_ref::<LiquidToggle>().is_some());
    }

    #[test]
    fn test_register_twice_fails() {
        let mut registry = ElementRegistry::new();
        register(&mut registry).expect("register");
        assert_eq!(
            register(&mut registry),
            Err(RegistryError::AlreadyDefined("liquid-toggle".to_owned()))
        );
    }

    #[test]
    fn test_created_elements_are_independent() {
        let mut registry = ElementRegistry::new();
        register(&mut registry).expect("register");
        let mut a = registry.create(LiquidToggle::TAG).expect("create");
        let b = registry.create(LiquidToggle::TAG).expect("create");
        a.connected_callback();
        assert!(a.is_connected());
        assert!(!b.is_connected());
    }
}
