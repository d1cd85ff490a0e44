//! Ambient particle-field background animation.
//!
//! Renders a few hundred to a couple thousand drifting particles on an HTML
//! canvas with:
//! - Gradient-noise ambient drift and sinusoidal flow generators
//! - Optional flocking-style neighbor forces tuned against clumping
//! - A decorative wave displacement layered over the physics motion
//! - Click-reactive ripple or burst-spawn effects
//! - Light/dark palette switching that tracks the host theme
//!
//! # Example
//!
//! ```ignore
//! use drift_field::{ParticleFieldCanvas, FieldSettings};
//! use leptos::prelude::*;
//!
//! let dark = RwSignal::new(true);
//! let mut settings = FieldSettings::for_viewport(1280.0);
//! settings.pointer = FieldSettings::ripple();
//!
//! view! { <ParticleFieldCanvas dark=dark settings=Some(settings) fullscreen=true /> }
//! ```

mod component;
pub mod field;
mod noise;
mod prng;
mod registry;
mod render;
pub mod settings;
pub mod theme;

pub use component::{ParticleFieldCanvas, active_fields};
pub use field::ParticleField;
pub use settings::{FieldSettings, MotionStyle, PointerEffect};
