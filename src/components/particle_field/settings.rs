//! Tuning constants and variant selection for the particle field.
//!
//! Everything that differs between the field's design variants lives here:
//! particle counts, force weights, the wave generator list, and which pointer
//! effect (ripple kick vs. burst spawning) a click triggers. Settings can be
//! embedded in the host page as JSON and deserialized at mount time; absent
//! fields fall back to the defaults below.

use serde::Deserialize;
use std::f64::consts::PI;

/// How the rendered position relates to the physics position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub enum MotionStyle {
	/// Physics integrates a home position; the rendered position adds a
	/// noise-driven wave displacement on top. Default, matches the layered
	/// "squiggly wave" look.
	#[default]
	WaveDecoupled,
	/// Rendered position is the physics position.
	Direct,
}

/// What a pointer click does to the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub enum PointerEffect {
	/// Clicks are ignored.
	#[default]
	None,
	/// Outward velocity kick for particles near the click point.
	Ripple {
		/// Effect radius in pixels.
		radius: f64,
		/// Velocity increment at distance zero; falls off linearly to the
		/// radius edge.
		strength: f64,
	},
	/// A burst of fresh particles at the click point, oldest evicted past
	/// the hard cap.
	Spawn {
		/// Particles per burst.
		count: usize,
		/// Upper bound of the random launch speed, px/tick.
		speed: f64,
	},
}

/// One sinusoidal flow generator.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WaveGen {
	/// Acceleration contribution at the crest.
	pub amplitude: f64,
	/// Spatial frequency, radians per pixel.
	pub frequency: f64,
	/// Temporal frequency, radians per time-unit.
	pub speed: f64,
	/// Phase offset, radians.
	pub phase: f64,
}

/// Neighbor-interaction force weights.
///
/// Separation and dispersion deliberately dominate cohesion and alignment;
/// the imbalance keeps the field evenly spread instead of clumping into
/// visible blobs. Preserve the relative magnitudes when tuning.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct FluidForces {
	/// Neighborhood radius for cohesion/alignment, pixels.
	pub cohesion_radius: f64,
	/// Pull toward the local neighbor centroid.
	pub cohesion: f64,
	/// Pull toward the local average velocity.
	pub alignment: f64,
	/// Push apart below twice the placement distance.
	pub separation: f64,
	/// Long-range spreading push, active below 50 px.
	pub dispersion: f64,
}

impl Default for FluidForces {
	fn default() -> Self {
		Self {
			cohesion_radius: 40.0,
			cohesion: 0.005,
			alignment: 0.01,
			separation: 0.15,
			dispersion: 0.02,
		}
	}
}

/// Complete configuration for one [`ParticleField`](super::field::ParticleField).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
	/// Particles created at init and on every resize.
	pub dot_count: usize,
	/// Hard cap enforced by burst spawning (oldest evicted past it).
	pub max_dots: usize,
	/// Minimum initial spacing between particles, pixels.
	pub min_distance: f64,
	/// Speed clamp, px/tick.
	pub max_speed: f64,
	/// Smallest particle radius. Set equal to `max_radius` for the
	/// uniform-size variant.
	pub min_radius: f64,
	/// Largest particle radius.
	pub max_radius: f64,
	/// Scale applied to accumulated acceleration before integration.
	pub acceleration: f64,
	/// Per-tick velocity multiplier, below 1.
	pub damping: f64,
	/// Neighbor forces, or `None` for the ambient-only variant.
	pub fluid: Option<FluidForces>,
	/// Sinusoidal flow generators, summed per axis.
	pub waves: Vec<WaveGen>,
	/// Spatial scale of the ambient drift noise.
	pub noise_scale: f64,
	/// Per-tick advance of the noise sampling offset.
	pub noise_drift: f64,
	/// Acceleration contribution of one noise sample.
	pub noise_strength: f64,
	/// Peak wave displacement in pixels (wave-decoupled motion).
	pub wave_amplitude: f64,
	/// Wavelength of the diagonal base wave, pixels.
	pub wave_wavelength: f64,
	/// Temporal speed of the diagonal base wave.
	pub wave_speed: f64,
	/// Overall multiplier on the wave displacement.
	pub wave_influence: f64,
	/// Off-screen margin before toroidal wrap, pixels.
	pub wrap_margin: f64,
	/// Rendered-position mode.
	pub motion: MotionStyle,
	/// Click behavior.
	pub pointer: PointerEffect,
}

impl Default for FieldSettings {
	fn default() -> Self {
		Self {
			dot_count: 1500,
			max_dots: 2000,
			min_distance: 4.0,
			max_speed: 0.2,
			min_radius: 0.8,
			max_radius: 2.5,
			acceleration: 0.2,
			damping: 0.99,
			fluid: Some(FluidForces::default()),
			waves: vec![
				WaveGen {
					amplitude: 0.12,
					frequency: 0.001,
					speed: 0.08,
					phase: 0.0,
				},
				WaveGen {
					amplitude: 0.08,
					frequency: 0.002,
					speed: 0.12,
					phase: PI / 3.0,
				},
				WaveGen {
					amplitude: 0.06,
					frequency: 0.0008,
					speed: 0.06,
					phase: PI / 2.0,
				},
				WaveGen {
					amplitude: 0.1,
					frequency: 0.003,
					speed: 0.1,
					phase: PI / 4.0,
				},
			],
			noise_scale: 0.006,
			noise_drift: 0.003,
			noise_strength: 0.2,
			wave_amplitude: 35.0,
			wave_wavelength: 300.0,
			wave_speed: 0.25,
			wave_influence: 1.2,
			wrap_margin: 10.0,
			motion: MotionStyle::default(),
			pointer: PointerEffect::default(),
		}
	}
}

/// Viewport width at or below which the reduced particle counts apply.
pub const NARROW_VIEWPORT: f64 = 768.0;

impl FieldSettings {
	/// Defaults adjusted to the viewport: narrow (mobile-class) viewports get
	/// a third of the particles to stay within frame budget.
	pub fn for_viewport(width: f64) -> Self {
		let mut settings = Self::default();
		if width <= NARROW_VIEWPORT {
			settings.dot_count = 500;
			settings.max_dots = 600;
		}
		settings
	}

	/// Default ripple click effect, for hosts that opt in.
	pub fn ripple() -> PointerEffect {
		PointerEffect::Ripple {
			radius: 150.0,
			strength: 2.0,
		}
	}

	/// Default burst click effect, for hosts that opt in.
	pub fn spawn() -> PointerEffect {
		PointerEffect::Spawn {
			count: 24,
			speed: 2.0,
		}
	}
}
