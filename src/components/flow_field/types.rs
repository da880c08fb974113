//! Settings supplied to the flow field by the controls panel.

use std::ops::RangeInclusive;

use serde::Deserialize;

use super::theme::Color;

/// Whether the pointer pulls particles in or pushes them away.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InteractionMode {
	#[default]
	Attract,
	Repulse,
}

/// Shape drawn for each particle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShapeType {
	#[default]
	Circle,
	Square,
}

/// Complete set of tunable parameters.
///
/// The value is always replaced as a whole; the simulation reads one
/// consistent copy per tick.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
	/// Particles per row and per column.
	#[serde(alias = "numCirclesPerRow")]
	pub grid_size: usize,
	pub interaction_mode: InteractionMode,
	pub interaction_strength: f64,
	/// Pointer influence radius in pixels.
	pub mouse_effect_radius: f64,
	/// Spring constant pulling particles home.
	pub return_force: f64,
	/// Per-tick velocity decay factor.
	pub damping: f64,
	#[serde(alias = "circleBaseRadius")]
	pub base_radius: f64,
	pub shape_type: ShapeType,
	#[serde(alias = "animateShapeRotation")]
	pub animate_rotation: bool,
	pub show_base_points: bool,
	#[serde(alias = "enableGlowEffect")]
	pub enable_glow: bool,
	pub glow_color: Color,
	pub enable_dynamic_colors: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			grid_size: 30,
			interaction_mode: InteractionMode::Attract,
			interaction_strength: 0.25,
			mouse_effect_radius: 200.0,
			return_force: 0.02,
			damping: 0.92,
			base_radius: 3.5,
			shape_type: ShapeType::Circle,
			animate_rotation: false,
			show_base_points: true,
			enable_glow: false,
			glow_color: Color::rgb(255, 255, 0),
			enable_dynamic_colors: false,
		}
	}
}

/// Bounds and granularity of a numeric control.
#[derive(Clone, Debug)]
pub struct SliderRange {
	pub range: RangeInclusive<f64>,
	pub step: f64,
}

impl SliderRange {
	const fn new(min: f64, max: f64, step: f64) -> Self {
		Self {
			range: min..=max,
			step,
		}
	}

	/// Number of decimals needed to display values on this slider's step.
	pub fn precision(&self) -> usize {
		let step = format!("{}", self.step);
		step.split_once('.').map_or(0, |(_, frac)| frac.len())
	}
}

impl Settings {
	pub const GRID_SIZE: SliderRange = SliderRange::new(5.0, 50.0, 1.0);
	pub const INTERACTION_STRENGTH: SliderRange = SliderRange::new(0.0, 0.5, 0.01);
	pub const MOUSE_EFFECT_RADIUS: SliderRange = SliderRange::new(50.0, 500.0, 10.0);
	pub const RETURN_FORCE: SliderRange = SliderRange::new(0.005, 0.2, 0.005);
	pub const DAMPING: SliderRange = SliderRange::new(0.8, 0.99, 0.01);
	pub const BASE_RADIUS: SliderRange = SliderRange::new(1.0, 10.0, 0.5);

	/// Total number of particles this configuration lays out.
	pub fn particle_count(&self) -> usize {
		self.grid_size.saturating_mul(self.grid_size)
	}

	/// Forces externally supplied values into the domain the physics step assumes.
	///
	/// A zero grid size is kept: it lays out an empty field. Larger grids are
	/// capped at the slider maximum.
	pub fn sanitized(self) -> Self {
		let positive = |v: f64, fallback: f64| {
			if v.is_finite() && v > 0.0 { v } else { fallback }
		};
		let non_negative = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
		let defaults = Self::default();

		Self {
			grid_size: self.grid_size.min(*Self::GRID_SIZE.range.end() as usize),
			interaction_strength: non_negative(self.interaction_strength),
			mouse_effect_radius: positive(self.mouse_effect_radius, defaults.mouse_effect_radius),
			return_force: non_negative(self.return_force),
			damping: if self.damping.is_finite() {
				self.damping.clamp(0.01, 0.99)
			} else {
				defaults.damping
			},
			base_radius: positive(self.base_radius, defaults.base_radius),
			..self
		}
	}
}
