//! Particle simulation core.
//!
//! Owns the particle set and advances it one fixed step per animation frame:
//! neighbor forces, ambient gradient-noise drift, sinusoidal flow generators,
//! velocity integration with damping and a speed clamp, then toroidal wrap.
//! In wave-decoupled mode physics integrates a *home* position and the
//! rendered position is recomputed each tick as home plus a layered noise
//! displacement, so the decorative wave never feeds back into the forces.
//!
//! The core is pure: no browser bindings, no wall-clock time. The simulation
//! clock advances by a nominal step per tick, so physics speed follows frame
//! count rather than elapsed time.

use std::f64::consts::TAU;

use super::noise::Noise2;
use super::prng::Xorshift64;
use super::settings::{FieldSettings, FluidForces, MotionStyle};

/// Nominal simulation-clock advance per tick.
const TIME_STEP: f64 = 0.016;

/// Radius of the long-range dispersion push, pixels.
const DISPERSION_RADIUS: f64 = 50.0;

/// Placement attempts before accepting a spot closer than `min_distance`
/// to an existing particle.
const PLACEMENT_RETRIES: u32 = 20;

/// One simulated point.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Physics-integrated position; the toroidal wrap applies here.
	pub home_x: f64,
	pub home_y: f64,
	/// Rendered position: home plus wave displacement, or home itself in
	/// direct mode.
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Zeroed at the start of each tick, accumulated from forces.
	pub ax: f64,
	pub ay: f64,
	/// Render radius, fixed at creation.
	pub radius: f64,
	/// Per-particle alpha multiplier, fixed at creation.
	pub opacity: f64,
	/// Index into the four-entry palette.
	pub color_index: usize,
	/// Per-particle animation offset.
	pub phase: f64,
}

/// A bounded set of particles animating on a 2D surface.
pub struct ParticleField {
	particles: Vec<Particle>,
	settings: FieldSettings,
	width: f64,
	height: f64,
	time: f64,
	noise_offset: f64,
	noise: Noise2,
	rng: Xorshift64,
	dark: bool,
}

impl ParticleField {
	/// Creates a field bound to a `width` x `height` surface and seeds the
	/// initial particle set. A zero-area surface yields an empty set and the
	/// field degrades to a no-op.
	pub fn new(settings: FieldSettings, width: f64, height: f64, seed: u64) -> Self {
		let mut rng = Xorshift64::new(seed);
		let noise = Noise2::new(&mut rng);
		let mut field = Self {
			particles: Vec::new(),
			settings,
			width,
			height,
			time: 0.0,
			noise_offset: 0.0,
			noise,
			rng,
			dark: true,
		};
		field.seed_particles();
		field
	}

	/// Current particle set, render order oldest first.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Bound surface dimensions.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Current theme flag; render-time only.
	pub fn is_dark(&self) -> bool {
		self.dark
	}

	/// Switches the render palette. No effect on physics.
	pub fn set_dark(&mut self, dark: bool) {
		self.dark = dark;
	}

	/// Updates the surface dimensions and regenerates the whole particle set
	/// at the new bounds. Fresh random layout each call.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.seed_particles();
	}

	fn seed_particles(&mut self) {
		self.particles.clear();
		if self.width <= 0.0 || self.height <= 0.0 {
			return;
		}
		for _ in 0..self.settings.dot_count {
			let (mut x, mut y) = (0.0, 0.0);
			for _ in 0..PLACEMENT_RETRIES {
				x = self.rng.range(0.0, self.width);
				y = self.rng.range(0.0, self.height);
				if !self.too_close(x, y) {
					break;
				}
			}
			let particle = self.make_particle(x, y);
			self.particles.push(particle);
		}
	}

	fn too_close(&self, x: f64, y: f64) -> bool {
		self.particles.iter().any(|p| {
			let (dx, dy) = (x - p.home_x, y - p.home_y);
			(dx * dx + dy * dy).sqrt() < self.settings.min_distance
		})
	}

	fn make_particle(&mut self, x: f64, y: f64) -> Particle {
		let s = &self.settings;
		Particle {
			home_x: x,
			home_y: y,
			x,
			y,
			vx: self.rng.range(-0.2, 0.2),
			vy: self.rng.range(-0.2, 0.2),
			ax: 0.0,
			ay: 0.0,
			radius: if s.max_radius > s.min_radius {
				self.rng.range(s.min_radius, s.max_radius)
			} else {
				s.min_radius
			},
			opacity: self.rng.range(0.3, 0.8),
			color_index: self.rng.index(4),
			phase: self.rng.range(0.0, TAU),
		}
	}

	/// Kicks every particle within `radius` of `(x, y)` directly away from
	/// it. The kick falls off linearly from `strength` at the center to zero
	/// at the edge; a particle exactly at the center has no defined outward
	/// direction and is skipped.
	pub fn apply_impulse(&mut self, x: f64, y: f64, radius: f64, strength: f64) {
		for p in &mut self.particles {
			let (dx, dy) = (p.home_x - x, p.home_y - y);
			let dist = (dx * dx + dy * dy).sqrt();
			if dist > 0.0 && dist < radius {
				let kick = (radius - dist) / radius * strength;
				p.vx += dx / dist * kick;
				p.vy += dy / dist * kick;
			}
		}
	}

	/// Appends `count` particles at `(x, y)` with random outward velocity in
	/// `[0.5, speed + 0.5)`, then evicts the oldest particles until the set
	/// is back under the `max_dots` cap.
	pub fn spawn_burst(&mut self, x: f64, y: f64, count: usize, speed: f64) {
		for _ in 0..count {
			let angle = self.rng.range(0.0, TAU);
			let launch = 0.5 + self.rng.next_f64() * speed;
			let mut p = self.make_particle(x, y);
			p.vx = angle.cos() * launch;
			p.vy = angle.sin() * launch;
			self.particles.push(p);
		}
		if self.particles.len() > self.settings.max_dots {
			let excess = self.particles.len() - self.settings.max_dots;
			self.particles.drain(0..excess);
		}
	}

	/// Advances the simulation by one frame step.
	pub fn tick(&mut self) {
		self.time += TIME_STEP;
		self.noise_offset += self.settings.noise_drift;

		for p in &mut self.particles {
			p.ax = 0.0;
			p.ay = 0.0;
		}
		if let Some(fluid) = self.settings.fluid {
			self.fluid_pass(&fluid);
		}

		let s = &self.settings;
		let noise = &self.noise;
		let (time, offset) = (self.time, self.noise_offset);
		let (width, height) = (self.width, self.height);

		for p in &mut self.particles {
			// Ambient drift, sampled at the rendered position.
			let nx = noise.sample(p.x * s.noise_scale + offset, p.y * s.noise_scale)
				* s.noise_strength;
			let ny = noise.sample(p.x * s.noise_scale, p.y * s.noise_scale + offset)
				* s.noise_strength;

			let (mut wx, mut wy) = (0.0, 0.0);
			for w in &s.waves {
				wx += (time * w.speed + p.x * w.frequency + w.phase).sin() * w.amplitude;
				wy += (time * w.speed + p.y * w.frequency + w.phase).cos() * w.amplitude;
			}

			p.ax += nx + wx;
			p.ay += ny + wy;

			p.vx += p.ax * s.acceleration;
			p.vy += p.ay * s.acceleration;
			p.vx *= s.damping;
			p.vy *= s.damping;

			let speed = (p.vx * p.vx + p.vy * p.vy).sqrt();
			if speed > s.max_speed {
				p.vx = p.vx / speed * s.max_speed;
				p.vy = p.vy / speed * s.max_speed;
			}

			p.home_x += p.vx;
			p.home_y += p.vy;

			match s.motion {
				MotionStyle::WaveDecoupled => {
					let (dx, dy) = wave_offset(s, noise, time, p.home_x, p.home_y);
					p.x = p.home_x + dx;
					p.y = p.home_y + dy;
				}
				MotionStyle::Direct => {
					p.x = p.home_x;
					p.y = p.home_y;
				}
			}

			wrap(p, width, height, s.wrap_margin);
		}
	}

	/// Neighbor-interaction pass: cohesion, alignment, separation, and
	/// dispersion, accumulated into per-particle acceleration. O(N^2), fine
	/// at the particle counts the field runs with.
	fn fluid_pass(&mut self, fluid: &FluidForces) {
		let min_distance = self.settings.min_distance;
		for i in 0..self.particles.len() {
			let (hx, hy) = (self.particles[i].home_x, self.particles[i].home_y);
			let (mut coh_x, mut coh_y) = (0.0, 0.0);
			let (mut sep_x, mut sep_y) = (0.0, 0.0);
			let (mut align_x, mut align_y) = (0.0, 0.0);
			let (mut disp_x, mut disp_y) = (0.0, 0.0);
			let mut neighbors = 0usize;

			for j in 0..self.particles.len() {
				if j == i {
					continue;
				}
				let other = &self.particles[j];
				let (dx, dy) = (hx - other.home_x, hy - other.home_y);
				let dist = (dx * dx + dy * dy).sqrt();
				// Coincident pairs have no direction; skip them everywhere.
				if dist <= 0.0 {
					continue;
				}

				if dist < fluid.cohesion_radius {
					neighbors += 1;
					coh_x += other.home_x;
					coh_y += other.home_y;
					align_x += other.vx;
					align_y += other.vy;

					if dist < min_distance * 2.0 {
						let force = (min_distance * 2.0 - dist) / dist;
						sep_x += dx * force;
						sep_y += dy * force;
					}
				}

				if dist < DISPERSION_RADIUS {
					let force = (DISPERSION_RADIUS - dist) / DISPERSION_RADIUS;
					disp_x += dx * force;
					disp_y += dy * force;
				}
			}

			let p = &mut self.particles[i];
			if neighbors > 0 {
				let n = neighbors as f64;
				p.ax += (coh_x / n - hx) * fluid.cohesion;
				p.ay += (coh_y / n - hy) * fluid.cohesion;
				p.ax += align_x / n * fluid.alignment;
				p.ay += align_y / n * fluid.alignment;
			}
			p.ax += sep_x * fluid.separation + disp_x * fluid.dispersion;
			p.ay += sep_y * fluid.separation + disp_y * fluid.dispersion;
		}
	}
}

/// Toroidal wrap of the physics position, with a margin so particles slide
/// fully off-screen before reappearing on the far side.
fn wrap(p: &mut Particle, width: f64, height: f64, margin: f64) {
	if p.home_x < -margin {
		p.home_x = width + margin;
	} else if p.home_x > width + margin {
		p.home_x = -margin;
	}
	if p.home_y < -margin {
		p.home_y = height + margin;
	} else if p.home_y > height + margin {
		p.home_y = -margin;
	}
}

/// Wave displacement of the rendered position: a diagonal sinusoid blended
/// with three noise octaves at descending weight, plus a slow positional
/// octave. Evaluated at the home position so the displacement never feeds
/// back into the physics.
fn wave_offset(
	s: &FieldSettings,
	noise: &Noise2,
	time: f64,
	hx: f64,
	hy: f64,
) -> (f64, f64) {
	let diagonal = (hx + hy) / s.wave_wavelength;
	let base = (TAU * (diagonal - time * s.wave_speed)).sin();

	let primary_x = noise.sample(hx * 0.01 + time * 0.15, hy * 0.01) * 0.8;
	let primary_y = noise.sample(hx * 0.01, hy * 0.01 + time * 0.2) * 0.8;
	let secondary_x = noise.sample(hx * 0.02 + time * 0.08, hy * 0.02) * 0.5;
	let secondary_y = noise.sample(hx * 0.02, hy * 0.02 + time * 0.12) * 0.5;
	let tertiary_x = noise.sample(hx * 0.03 + time * 0.05, hy * 0.03) * 0.3;
	let tertiary_y = noise.sample(hx * 0.03, hy * 0.03 + time * 0.08) * 0.3;

	let wave_x = base * 0.5 + primary_x * 0.3 + secondary_x * 0.15 + tertiary_x * 0.05;
	let wave_y = base * 0.4 + primary_y * 0.35 + secondary_y * 0.2 + tertiary_y * 0.05;

	let influence_x = s.wave_amplitude * wave_x * s.wave_influence;
	let influence_y = s.wave_amplitude * wave_y * s.wave_influence;

	let position_x = noise.sample(hx * 0.005 + time * 0.1, hy * 0.005) * 0.4;
	let position_y = noise.sample(hx * 0.005, hy * 0.005 + time * 0.15) * 0.4;

	(
		influence_x + position_x * s.wave_amplitude * 0.3,
		influence_y + position_y * s.wave_amplitude * 0.3,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settings(dot_count: usize) -> FieldSettings {
		FieldSettings {
			dot_count,
			..FieldSettings::default()
		}
	}

	fn speed(p: &Particle) -> f64 {
		(p.vx * p.vx + p.vy * p.vy).sqrt()
	}

	#[test]
	fn init_creates_exact_count_within_bounds() {
		let field = ParticleField::new(settings(100), 800.0, 600.0, 1);
		assert_eq!(field.particles().len(), 100);
		for p in field.particles() {
			assert!((0.0..800.0).contains(&p.home_x));
			assert!((0.0..600.0).contains(&p.home_y));
		}
	}

	#[test]
	fn zero_area_surface_degrades_to_empty_field() {
		let mut field = ParticleField::new(settings(100), 0.0, 0.0, 1);
		assert!(field.particles().is_empty());
		field.tick();
		assert!(field.particles().is_empty());
	}

	#[test]
	fn sparse_placement_respects_min_distance() {
		let field = ParticleField::new(settings(10), 800.0, 600.0, 3);
		let ps = field.particles();
		for i in 0..ps.len() {
			for j in (i + 1)..ps.len() {
				let (dx, dy) = (ps[i].home_x - ps[j].home_x, ps[i].home_y - ps[j].home_y);
				let dist = (dx * dx + dy * dy).sqrt();
				assert!(
					dist >= field.settings.min_distance,
					"particles {i} and {j} too close: {dist}"
				);
			}
		}
	}

	#[test]
	fn resize_regenerates_full_set_at_new_bounds() {
		let mut field = ParticleField::new(settings(50), 800.0, 600.0, 1);
		field.resize(400.0, 300.0);
		assert_eq!(field.particles().len(), 50);
		for p in field.particles() {
			assert!((0.0..400.0).contains(&p.home_x));
			assert!((0.0..300.0).contains(&p.home_y));
		}
	}

	#[test]
	fn velocity_clamped_every_tick() {
		let mut field = ParticleField::new(settings(100), 800.0, 600.0, 2);
		// Blow a big impulse through the middle, then tick: the clamp must
		// bring every particle back under max_speed.
		field.apply_impulse(400.0, 300.0, 1000.0, 50.0);
		field.tick();
		for p in field.particles() {
			assert!(speed(p) <= field.settings.max_speed + 1e-9);
		}
	}

	#[test]
	fn wrap_sends_particles_to_the_opposite_edge() {
		let (w, h, m) = (800.0, 600.0, 10.0);
		let mut field = ParticleField::new(settings(4), w, h, 1);
		field.particles[0].home_x = -m - 1.0;
		field.particles[1].home_x = w + m + 1.0;
		field.particles[2].home_y = -m - 1.0;
		field.particles[3].home_y = h + m + 1.0;
		for p in &mut field.particles {
			wrap(p, w, h, m);
		}
		assert_eq!(field.particles[0].home_x, w + m);
		assert_eq!(field.particles[1].home_x, -m);
		assert_eq!(field.particles[2].home_y, h + m);
		assert_eq!(field.particles[3].home_y, -m);
	}

	#[test]
	fn impulse_kick_decreases_with_distance() {
		let mut field = ParticleField::new(settings(0), 800.0, 600.0, 1);
		for d in [10.0, 40.0, 80.0, 120.0, 149.0] {
			let mut p = field.make_particle(400.0 + d, 300.0);
			p.vx = 0.0;
			p.vy = 0.0;
			field.particles.push(p);
		}
		field.apply_impulse(400.0, 300.0, 150.0, 2.0);
		let kicks: Vec<f64> = field.particles().iter().map(speed).collect();
		for pair in kicks.windows(2) {
			assert!(
				pair[0] >= pair[1],
				"closer particle kicked softer: {:?}",
				kicks
			);
		}
	}

	#[test]
	fn impulse_skips_particle_at_the_origin_and_outside_radius() {
		let mut field = ParticleField::new(settings(0), 800.0, 600.0, 1);
		for (x, y) in [(400.0, 300.0), (700.0, 300.0)] {
			let mut p = field.make_particle(x, y);
			p.vx = 0.0;
			p.vy = 0.0;
			field.particles.push(p);
		}
		field.apply_impulse(400.0, 300.0, 150.0, 2.0);
		assert_eq!(speed(&field.particles()[0]), 0.0, "origin particle moved");
		assert_eq!(speed(&field.particles()[1]), 0.0, "far particle moved");
	}

	#[test]
	fn near_particle_gains_more_speed_than_far_particle() {
		let mut field = ParticleField::new(settings(0), 800.0, 600.0, 1);
		for (x, y) in [(450.0, 300.0), (300.0, 300.0)] {
			let mut p = field.make_particle(x, y);
			p.vx = 0.0;
			p.vy = 0.0;
			field.particles.push(p);
		}
		field.apply_impulse(400.0, 300.0, 150.0, 2.0);
		let near = speed(&field.particles()[0]);
		let far = speed(&field.particles()[1]);
		assert!(near > far, "near {near} should exceed far {far}");
		assert!(near > 0.0 && far > 0.0);
	}

	#[test]
	fn burst_evicts_oldest_down_to_cap() {
		let mut field = ParticleField::new(
			FieldSettings {
				dot_count: 5,
				max_dots: 8,
				..FieldSettings::default()
			},
			800.0,
			600.0,
			1,
		);
		// 5 + 5 = 10, two over the cap: the two oldest go.
		let survivor = (field.particles()[2].home_x, field.particles()[2].home_y);
		field.spawn_burst(100.0, 100.0, 5, 2.0);
		assert_eq!(field.particles().len(), 8);
		let first = &field.particles()[0];
		assert_eq!((first.home_x, first.home_y), survivor);
		// The spawned five sit at the end, at the burst point.
		for p in &field.particles()[3..] {
			assert_eq!((p.home_x, p.home_y), (100.0, 100.0));
		}
	}

	#[test]
	fn burst_launch_speed_is_within_range() {
		let mut field = ParticleField::new(settings(0), 800.0, 600.0, 7);
		field.spawn_burst(400.0, 300.0, 50, 2.0);
		for p in field.particles() {
			let s = speed(p);
			assert!((0.5..2.5).contains(&s), "launch speed out of range: {s}");
		}
	}

	#[test]
	fn sixty_ambient_ticks_hold_bounds_and_speed_clamp() {
		let mut field = ParticleField::new(settings(100), 800.0, 600.0, 5);
		for _ in 0..60 {
			field.tick();
		}
		let margin = field.settings.wrap_margin;
		for p in field.particles() {
			assert!(speed(p) <= field.settings.max_speed + 1e-9);
			assert!((-margin..=800.0 + margin).contains(&p.home_x));
			assert!((-margin..=600.0 + margin).contains(&p.home_y));
		}
	}

	#[test]
	fn direct_motion_renders_at_the_home_position() {
		let mut field = ParticleField::new(
			FieldSettings {
				dot_count: 20,
				motion: MotionStyle::Direct,
				..FieldSettings::default()
			},
			800.0,
			600.0,
			4,
		);
		field.tick();
		for p in field.particles() {
			assert_eq!(p.x, p.home_x);
			assert_eq!(p.y, p.home_y);
		}
	}

	#[test]
	fn wave_decoupled_motion_offsets_the_rendered_position() {
		let mut field = ParticleField::new(settings(20), 800.0, 600.0, 4);
		field.tick();
		let displaced = field
			.particles()
			.iter()
			.any(|p| p.x != p.home_x || p.y != p.home_y);
		assert!(displaced, "wave displacement never applied");
	}

	#[test]
	fn theme_flag_does_not_touch_physics() {
		let mut a = ParticleField::new(settings(50), 800.0, 600.0, 9);
		let mut b = ParticleField::new(settings(50), 800.0, 600.0, 9);
		b.set_dark(false);
		a.tick();
		b.tick();
		for (pa, pb) in a.particles().iter().zip(b.particles()) {
			assert_eq!(pa.x, pb.x);
			assert_eq!(pa.y, pb.y);
		}
	}
}
