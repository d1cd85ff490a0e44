//! Small deterministic PRNG for particle placement and styling.
//!
//! Xorshift64 keeps the simulation core free of browser bindings: the
//! component seeds it from `Math.random()` once per field, while tests seed
//! it with a fixed value for reproducible runs.

/// Xorshift64 generator. Same seed, same sequence.
#[derive(Clone, Debug)]
pub struct Xorshift64 {
	state: u64,
}

impl Xorshift64 {
	/// Creates a generator from `seed`. A zero seed is remapped to a fixed
	/// non-zero constant to avoid the xorshift all-zeros fixed point.
	pub fn new(seed: u64) -> Self {
		Self {
			state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
		}
	}

	/// Advances the state and returns the next 64-bit value.
	pub fn next_u64(&mut self) -> u64 {
		self.state ^= self.state << 13;
		self.state ^= self.state >> 7;
		self.state ^= self.state << 17;
		self.state
	}

	/// Uniform f64 in `[0, 1)` from the top 53 bits.
	pub fn next_f64(&mut self) -> f64 {
		(self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
	}

	/// Uniform f64 in `[min, max)`.
	pub fn range(&mut self, min: f64, max: f64) -> f64 {
		min + self.next_f64() * (max - min)
	}

	/// Uniform usize in `[0, max)`.
	pub fn index(&mut self, max: usize) -> usize {
		(self.next_u64() % max as u64) as usize
	}
}
