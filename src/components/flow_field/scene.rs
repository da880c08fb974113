//! Drawable projection of the particle field.
//!
//! A [`Scene`] is an ordered display list shared by the canvas renderer and
//! the SVG exporter, so the screen and exported files always agree.

use super::particles::Particle;
use super::theme::{Color, Theme};
use super::types::{Settings, ShapeType};

/// A single drawing primitive. Coordinates are field-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
	/// Full-bounds fill.
	Background { fill: Color },
	/// Faint marker at a particle's home position.
	BasePoint {
		x: f64,
		y: f64,
		radius: f64,
		fill: Color,
		opacity: f64,
	},
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		fill: Color,
		/// Degrees about the shape centre, when rotation is animated.
		rotation: Option<f64>,
	},
	/// Axis-aligned square of side `2 * half` centred on `(x, y)` before rotation.
	Square {
		x: f64,
		y: f64,
		half: f64,
		fill: Color,
		rotation: Option<f64>,
	},
}

/// Ordered shapes plus the viewport they were laid out for.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub width: f64,
	pub height: f64,
	pub shapes: Vec<Shape>,
}

impl Scene {
	/// Builds background, optional base points, then one shape per particle.
	pub fn build(
		particles: &[Particle],
		settings: &Settings,
		theme: &Theme,
		background: Color,
		width: f64,
		height: f64,
	) -> Self {
		let base_points = if settings.show_base_points {
			particles.len()
		} else {
			0
		};
		let mut shapes = Vec::with_capacity(1 + base_points + particles.len());

		shapes.push(Shape::Background { fill: background });

		if settings.show_base_points {
			let radius = (settings.base_radius / 3.0).max(1.0);
			let fill = if settings.enable_dynamic_colors {
				theme.base_point_dynamic
			} else {
				theme.base_point
			};
			shapes.extend(particles.iter().map(|p| Shape::BasePoint {
				x: p.home_x,
				y: p.home_y,
				radius,
				fill,
				opacity: theme.base_point_opacity,
			}));
		}

		shapes.extend(particles.iter().map(|p| {
			let rotation = settings.animate_rotation.then_some(p.rotation);
			match settings.shape_type {
				ShapeType::Circle => Shape::Circle {
					x: p.x,
					y: p.y,
					radius: p.radius,
					fill: p.color,
					rotation,
				},
				ShapeType::Square => Shape::Square {
					x: p.x,
					y: p.y,
					half: p.radius,
					fill: p.color,
					rotation,
				},
			}
		}));

		Self {
			width,
			height,
			shapes,
		}
	}

	/// Whether there is anything worth drawing or exporting.
	pub fn is_drawable(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}
}
