//! Per-view simulation state advanced once per animation frame.
//!
//! Owns the particle field, the viewport size, the last pointer position and
//! the color phase. The field is rebuilt from scratch whenever the grid size,
//! base radius or viewport size changes; every other settings change takes
//! effect on the next tick without touching particle state.

use log::debug;

use super::ambient::ColorPhase;
use super::particles::{Particle, layout};
use super::physics::{self, StepInput};
use super::scene::Scene;
use super::theme::{Color, Theme};
use super::types::Settings;

/// The inputs a layout depends on. A change in any of them forces a rebuild.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LayoutKey {
	grid_size: usize,
	base_radius: f64,
	width: f64,
	height: f64,
}

/// Simulation context for one mounted canvas.
pub struct FlowFieldState {
	particles: Vec<Particle>,
	width: f64,
	height: f64,
	/// Field-local pointer position, `None` when no pointer is active.
	pointer: Option<(f64, f64)>,
	theme: Theme,
	colors: ColorPhase,
	background: Color,
	layout_key: Option<LayoutKey>,
}

impl FlowFieldState {
	pub fn new(width: f64, height: f64, theme: Theme) -> Self {
		Self {
			particles: Vec::new(),
			width,
			height,
			pointer: None,
			background: theme.background,
			theme,
			colors: ColorPhase::default(),
			layout_key: None,
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	pub fn background(&self) -> Color {
		self.background
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn pointer(&self) -> Option<(f64, f64)> {
		self.pointer
	}

	/// Sets or clears the field-local pointer position.
	pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
		self.pointer = pointer;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Whether the viewport has a drawable area.
	pub fn is_sized(&self) -> bool {
		self.width > 0.0 && self.height > 0.0
	}

	/// Rebuilds the field if any layout input changed since the last build.
	pub fn sync_layout(&mut self, settings: &Settings) {
		let key = LayoutKey {
			grid_size: settings.grid_size,
			base_radius: settings.base_radius,
			width: self.width,
			height: self.height,
		};
		if self.layout_key == Some(key) {
			return;
		}

		self.particles = layout(
			key.grid_size,
			key.base_radius,
			key.width,
			key.height,
			self.theme.particle,
		);
		self.layout_key = Some(key);
		debug!(
			"flow-field: laid out {} particles over {}x{}",
			self.particles.len(),
			key.width,
			key.height
		);
	}

	/// Runs one tick: ambient color update followed by a physics step.
	///
	/// Returns `false` without doing anything while the field is empty or
	/// the viewport has no area.
	pub fn tick(&mut self, settings: &Settings) -> bool {
		self.sync_layout(settings);
		if self.particles.is_empty() || !self.is_sized() {
			return false;
		}

		let ambient = self.colors.advance(&self.theme, settings.enable_dynamic_colors);
		self.background = ambient.background;
		self.particles = physics::step(
			&self.particles,
			&StepInput {
				settings,
				pointer: self.pointer,
				base_color: ambient.particle,
				width: self.width,
				height: self.height,
			},
		);
		true
	}

	/// Ticks, then returns the scene to draw.
	///
	/// An empty field still yields a background-only scene so stale particles
	/// get cleared; `None` only while the viewport has no area.
	pub fn frame(&mut self, settings: &Settings) -> Option<Scene> {
		self.tick(settings);
		self.is_sized().then(|| self.scene(settings))
	}

	/// Projects the current field into a drawable scene.
	pub fn scene(&self, settings: &Settings) -> Scene {
		Scene::build(
			&self.particles,
			settings,
			&self.theme,
			self.background,
			self.width,
			self.height,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::super::scene::Shape;
	use super::*;

	fn state(width: f64, height: f64) -> FlowFieldState {
		FlowFieldState::new(width, height, Theme::default())
	}

	#[test]
	fn first_tick_lays_out_and_steps() {
		let mut s = state(900.0, 600.0);
		assert!(s.particles().is_empty());
		assert!(s.tick(&Settings::default()));
		assert_eq!(s.particles().len(), 900);
	}

	#[test]
	fn unsized_viewport_suspends_stepping() {
		let mut s = state(0.0, 600.0);
		assert!(!s.tick(&Settings::default()));
		assert!(s.particles().is_empty());
	}

	#[test]
	fn zero_grid_never_steps() {
		let mut s = state(900.0, 600.0);
		let settings = Settings {
			grid_size: 0,
			..Settings::default()
		};
		assert!(!s.tick(&settings));
	}

	#[test]
	fn relayout_only_on_layout_inputs() {
		let mut settings = Settings::default();
		let mut s = state(900.0, 600.0);
		s.set_pointer(Some((100.0, 100.0)));
		for _ in 0..10 {
			s.tick(&settings);
		}
		let moved = s.particles().iter().any(|p| p.vx != 0.0 || p.vy != 0.0);
		assert!(moved);

		settings.interaction_strength = 0.4;
		s.sync_layout(&settings);
		assert!(s.particles().iter().any(|p| p.vx != 0.0 || p.vy != 0.0));

		settings.grid_size = 10;
		s.sync_layout(&settings);
		assert_eq!(s.particles().len(), 100);
		assert!(s.particles().iter().all(|p| p.vx == 0.0 && p.vy == 0.0));
		assert!(s.particles().iter().all(|p| p.x == p.home_x && p.y == p.home_y));

		settings.base_radius = 5.0;
		s.tick(&settings);
		s.sync_layout(&settings);
		let before = s.particles().to_vec();
		s.resize(450.0, 300.0);
		s.sync_layout(&settings);
		assert_ne!(before[0].home_x, s.particles()[0].home_x);
	}

	#[test]
	fn emptied_field_still_draws_background() {
		let mut s = state(900.0, 600.0);
		let mut settings = Settings::default();
		let scene = s.frame(&settings).unwrap();
		assert_eq!(scene.shapes.len(), 1 + 900 + 900);

		settings.grid_size = 0;
		let scene = s.frame(&settings).unwrap();
		assert!(s.particles().is_empty());
		assert_eq!(
			scene.shapes,
			vec![Shape::Background {
				fill: Theme::default().background
			}]
		);
	}

	#[test]
	fn unsized_viewport_has_no_frame() {
		let mut s = state(900.0, 600.0);
		s.resize(900.0, 0.0);
		assert!(s.frame(&Settings::default()).is_none());
		assert_eq!((s.width(), s.height()), (900.0, 0.0));
	}

	#[test]
	fn pointer_is_set_and_cleared() {
		let mut s = state(100.0, 100.0);
		assert_eq!(s.pointer(), None);
		s.set_pointer(Some((10.0, 20.0)));
		assert_eq!(s.pointer(), Some((10.0, 20.0)));
		s.set_pointer(None);
		assert_eq!(s.pointer(), None);
	}

	#[test]
	fn background_follows_dynamic_colors() {
		let mut s = state(300.0, 200.0);
		let mut settings = Settings::default();
		s.tick(&settings);
		assert_eq!(s.background(), Theme::default().background);

		settings.enable_dynamic_colors = true;
		s.tick(&settings);
		assert_ne!(s.background(), Theme::default().background);
	}

	#[test]
	fn pointer_leaving_stops_glow() {
		let mut s = state(300.0, 300.0);
		let settings = Settings {
			grid_size: 1,
			enable_glow: true,
			..Settings::default()
		};
		s.set_pointer(Some((150.0, 150.0)));
		s.tick(&settings);
		assert_ne!(s.particles()[0].color, Theme::default().particle);

		s.set_pointer(None);
		s.tick(&settings);
		assert_eq!(s.particles()[0].color, Theme::default().particle);
	}
}
