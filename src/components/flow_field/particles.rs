//! Spring-anchored particles and their grid layout.

use super::theme::Color;

/// A single particle, identified by its grid cell.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub row: usize,
	pub col: usize,
	/// Anchor the return force pulls toward. Fixed after layout.
	pub home_x: f64,
	pub home_y: f64,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	/// Degrees in `[0, 360)`.
	pub rotation: f64,
	/// Color used for the current frame only.
	pub color: Color,
}

/// Lays out `grid_size × grid_size` particles evenly over a `width × height` area.
///
/// Row-major. Every particle starts at rest on its home position. A zero grid
/// size or a non-positive dimension yields an empty field.
pub fn layout(grid_size: usize, base_radius: f64, width: f64, height: f64, color: Color) -> Vec<Particle> {
	if grid_size == 0 || width <= 0.0 || height <= 0.0 {
		return Vec::new();
	}

	let spacing_x = width / (grid_size + 1) as f64;
	let spacing_y = height / (grid_size + 1) as f64;
	let mut particles = Vec::with_capacity(grid_size * grid_size);

	for row in 0..grid_size {
		for col in 0..grid_size {
			let (x, y) = ((col + 1) as f64 * spacing_x, (row + 1) as f64 * spacing_y);
			particles.push(Particle {
				row,
				col,
				home_x: x,
				home_y: y,
				x,
				y,
				vx: 0.0,
				vy: 0.0,
				radius: base_radius,
				rotation: 0.0,
				color,
			});
		}
	}

	particles
}
