//! Colors and palettes for the particle field.
//!
//! Two fixed four-entry palettes, one per theme. Theme choice only affects
//! rendering; the simulation never reads it.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Shift every channel by `delta`, saturating at the channel bounds.
	/// Used for the lightened core and darkened rim of the particle gradient.
	pub fn shift(self, delta: i16) -> Self {
		let apply = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
		Self {
			r: apply(self.r),
			g: apply(self.g),
			b: apply(self.b),
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// A four-entry particle palette; `color_index` selects an entry.
#[derive(Clone, Copy, Debug)]
pub struct FieldPalette {
	pub colors: [Color; 4],
}

impl FieldPalette {
	/// Soft blues for light page backgrounds.
	pub fn light() -> Self {
		Self {
			colors: [
				Color::rgba(100, 150, 255, 0.6),
				Color::rgba(150, 200, 255, 0.5),
				Color::rgba(200, 220, 255, 0.4),
				Color::rgba(120, 180, 240, 0.7),
			],
		}
	}

	/// Brighter blues for dark page backgrounds.
	pub fn dark() -> Self {
		Self {
			colors: [
				Color::rgba(80, 120, 255, 0.8),
				Color::rgba(120, 160, 255, 0.7),
				Color::rgba(160, 200, 255, 0.6),
				Color::rgba(100, 140, 255, 0.9),
			],
		}
	}

	/// Palette for the given theme flag.
	pub fn for_theme(dark: bool) -> Self {
		if dark { Self::dark() } else { Self::light() }
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shift_saturates_at_channel_bounds() {
		let c = Color::rgba(240, 10, 128, 1.0);
		let up = c.shift(30);
		assert_eq!((up.r, up.g, up.b), (255, 40, 158));
		let down = c.shift(-15);
		assert_eq!((down.r, down.g, down.b), (225, 0, 113));
	}

	#[test]
	fn palette_index_wraps() {
		let p = FieldPalette::dark();
		assert_eq!(p.get(0), p.get(4));
		assert_eq!(p.get(3), p.get(7));
	}

	#[test]
	fn css_output_includes_alpha() {
		let c = Color::rgba(10, 20, 30, 0.5);
		assert_eq!(c.to_css(), "rgba(10, 20, 30, 0.5)");
	}
}
