//! Canvas rendering for the particle field.
//!
//! Each frame clears the whole surface (no motion trails) and draws every
//! particle as a radial-gradient disc: lightened core, base color mid-stop,
//! transparent darkened rim at 1.5x the particle radius.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::field::ParticleField;
use super::theme::FieldPalette;

/// Renders the field's current state to the canvas.
pub fn render(field: &ParticleField, ctx: &CanvasRenderingContext2d) {
	let (width, height) = field.size();
	ctx.clear_rect(0.0, 0.0, width, height);

	let palette = FieldPalette::for_theme(field.is_dark());

	for p in field.particles() {
		let color = palette.get(p.color_index);
		let alpha = color.a * p.opacity;

		let Ok(gradient) =
			ctx.create_radial_gradient(p.x, p.y, 0.0, p.x, p.y, p.radius * 1.5)
		else {
			continue;
		};
		let _ = gradient.add_color_stop(0.0, &color.shift(30).with_alpha(alpha).to_css());
		let _ = gradient.add_color_stop(0.6, &color.with_alpha(alpha * 0.7).to_css());
		let _ = gradient.add_color_stop(1.0, &color.shift(-15).with_alpha(0.0).to_css());

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, p.radius, 0.0, PI * 2.0);
		ctx.fill();
	}
}
