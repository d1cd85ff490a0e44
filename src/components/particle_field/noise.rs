//! 2D gradient noise for smooth ambient particle drift.
//!
//! Classic permutation-table Perlin noise: continuous, roughly zero-mean,
//! smooth under the quintic fade curve. The table is filled from the field's
//! PRNG at construction, so the flow pattern differs between page loads but
//! is fully deterministic for a given seed.

use super::prng::Xorshift64;

/// Gradient noise sampler over a 256-entry permutation table.
#[derive(Clone, Debug)]
pub struct Noise2 {
	perm: [u8; 512],
}

impl Noise2 {
	/// Builds a sampler with a table drawn from `rng`.
	pub fn new(rng: &mut Xorshift64) -> Self {
		let mut perm = [0u8; 512];
		for i in 0..256 {
			perm[i] = rng.index(256) as u8;
		}
		for i in 0..256 {
			perm[256 + i] = perm[i];
		}
		Self { perm }
	}

	/// Samples the noise field at `(x, y)`.
	pub fn sample(&self, x: f64, y: f64) -> f64 {
		let xi = (x.floor() as i64 & 255) as usize;
		let yi = (y.floor() as i64 & 255) as usize;
		let xf = x - x.floor();
		let yf = y - y.floor();

		let u = fade(xf);
		let v = fade(yf);

		let a = self.perm[xi] as usize + yi;
		let aa = self.perm[a & 511] as usize;
		let ab = self.perm[(a + 1) & 511] as usize;
		let b = self.perm[xi + 1] as usize + yi;
		let ba = self.perm[b & 511] as usize;
		let bb = self.perm[(b + 1) & 511] as usize;

		lerp(
			v,
			lerp(u, grad(self.perm[aa], xf, yf), grad(self.perm[ba], xf - 1.0, yf)),
			lerp(
				u,
				grad(self.perm[ab], xf, yf - 1.0),
				grad(self.perm[bb], xf - 1.0, yf - 1.0),
			),
		)
	}
}

/// Quintic ease curve, zero first and second derivative at 0 and 1.
fn fade(t: f64) -> f64 {
	t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
	a + t * (b - a)
}

/// Hashed gradient dotted with the offset vector.
fn grad(hash: u8, x: f64, y: f64) -> f64 {
	let h = hash & 15;
	let gx = 1 + (h & 7);
	let gy = if gx & 1 == 1 { gx as i32 } else { -(gx as i32) };
	(gx as f64 * x + gy as f64 * y) * 0.5
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sampler(seed: u64) -> Noise2 {
		Noise2::new(&mut Xorshift64::new(seed))
	}

	#[test]
	fn deterministic_for_a_fixed_table() {
		let a = sampler(11);
		let b = sampler(11);
		for i in 0..200 {
			let (x, y) = (i as f64 * 0.37, i as f64 * 0.73);
			assert_eq!(a.sample(x, y), b.sample(x, y));
		}
	}

	#[test]
	fn bounded_output() {
		let n = sampler(3);
		for i in 0..50 {
			for j in 0..50 {
				let v = n.sample(i as f64 * 0.13, j as f64 * 0.29);
				assert!(v.is_finite());
				assert!(v.abs() <= 8.0, "sample out of bound: {v}");
			}
		}
	}

	#[test]
	fn continuous_under_small_steps() {
		let n = sampler(5);
		let eps = 1e-4;
		for i in 0..100 {
			let (x, y) = (i as f64 * 0.21 + 0.4, i as f64 * 0.17 + 0.6);
			let dv = (n.sample(x + eps, y) - n.sample(x, y)).abs();
			assert!(dv < 0.05, "discontinuity at ({x}, {y}): {dv}");
		}
	}

	#[test]
	fn varies_across_the_field() {
		let n = sampler(9);
		let first = n.sample(0.5, 0.5);
		let mut saw_different = false;
		for i in 1..100 {
			if (n.sample(i as f64 * 0.41, i as f64 * 0.59) - first).abs() > 1e-6 {
				saw_different = true;
				break;
			}
		}
		assert!(saw_different, "noise field is constant");
	}
}
