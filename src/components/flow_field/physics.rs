//! One discrete physics step over the whole particle field.
//!
//! Each particle is advanced independently, in this order: pointer force,
//! glow color, return spring, damping, integration, boundary reflection,
//! rotation.

use super::ambient::glow_blend;
use super::particles::Particle;
use super::theme::Color;
use super::types::{InteractionMode, Settings};

/// Pointer force magnitude multiplier.
const POINTER_FORCE_SCALE: f64 = 5.0;
/// Below this distance the pointer direction is undefined and no force applies.
const MIN_POINTER_DISTANCE: f64 = 0.01;
/// Velocity factor applied on the axis that hit a wall.
const WALL_RESTITUTION: f64 = -0.3;
/// Degrees per tick while rotation is animated.
const ROTATION_SPEED: f64 = 1.0;

/// Everything a step reads besides the particles themselves.
#[derive(Clone, Copy, Debug)]
pub struct StepInput<'a> {
	pub settings: &'a Settings,
	/// Field-local pointer position, if a pointer is active.
	pub pointer: Option<(f64, f64)>,
	/// Ambient particle color for this tick.
	pub base_color: Color,
	pub width: f64,
	pub height: f64,
}

/// Produces the next field from the previous one.
pub fn step(particles: &[Particle], input: &StepInput) -> Vec<Particle> {
	particles.iter().map(|p| step_particle(p, input)).collect()
}

fn step_particle(p: &Particle, input: &StepInput) -> Particle {
	let settings = input.settings;
	let radius = settings.base_radius;
	let (mut x, mut y, mut vx, mut vy) = (p.x, p.y, p.vx, p.vy);
	let mut color = input.base_color;

	if let Some((px, py)) = input.pointer {
		let (dx, dy) = (px - x, py - y);
		let distance = (dx * dx + dy * dy).sqrt();
		let reach = settings.mouse_effect_radius;

		if distance < reach && distance > MIN_POINTER_DISTANCE && settings.interaction_strength > 0.0 {
			let mut magnitude =
				(1.0 - distance / reach) * settings.interaction_strength * POINTER_FORCE_SCALE;
			if settings.interaction_mode == InteractionMode::Repulse {
				magnitude = -magnitude;
			}
			vx += dx / distance * magnitude;
			vy += dy / distance * magnitude;
		}

		if settings.enable_glow {
			color = glow_blend(input.base_color, settings.glow_color, distance, reach);
		}
	}

	vx += (p.home_x - x) * settings.return_force;
	vy += (p.home_y - y) * settings.return_force;

	vx *= settings.damping;
	vy *= settings.damping;

	x += vx;
	y += vy;

	if input.width > 0.0 && input.height > 0.0 {
		(x, vx) = reflect(x, vx, radius, input.width);
		(y, vy) = reflect(y, vy, radius, input.height);
	}

	let rotation = if settings.animate_rotation {
		(p.rotation + ROTATION_SPEED) % 360.0
	} else {
		p.rotation
	};

	Particle {
		x,
		y,
		vx,
		vy,
		radius,
		rotation,
		color,
		..p.clone()
	}
}

/// Clamps one axis into `[radius, extent - radius]`, bouncing the velocity off
/// whichever wall was crossed.
fn reflect(mut pos: f64, mut vel: f64, radius: f64, extent: f64) -> (f64, f64) {
	if pos - radius < 0.0 {
		pos = radius;
		vel *= WALL_RESTITUTION;
	}
	if pos + radius > extent {
		pos = extent - radius;
		vel *= WALL_RESTITUTION;
	}
	(pos, vel)
}

#[cfg(test)]
mod tests {
	use super::super::particles::layout;
	use super::*;

	const NEUTRAL: Color = Color::rgb(229, 231, 235);

	fn assert_close(a: f64, b: f64, tol: f64) {
		assert!((a - b).abs() <= tol, "expected {a} to be within {tol} of {b}");
	}

	fn single(x: f64, y: f64) -> Particle {
		Particle {
			row: 0,
			col: 0,
			home_x: x,
			home_y: y,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 3.5,
			rotation: 0.0,
			color: NEUTRAL,
		}
	}

	fn input<'a>(settings: &'a Settings, pointer: Option<(f64, f64)>) -> StepInput<'a> {
		StepInput {
			settings,
			pointer,
			base_color: NEUTRAL,
			width: 900.0,
			height: 600.0,
		}
	}

	fn frictionless() -> Settings {
		Settings {
			return_force: 0.0,
			damping: 1.0,
			..Settings::default()
		}
	}

	#[test]
	fn pointer_on_top_of_particle_applies_no_force() {
		let settings = frictionless();
		let next = step(&[single(300.0, 300.0)], &input(&settings, Some((300.0, 300.0))));
		assert_eq!((next[0].vx, next[0].vy), (0.0, 0.0));
	}

	#[test]
	fn attract_pulls_toward_pointer() {
		let settings = frictionless();
		let next = step(&[single(300.0, 300.0)], &input(&settings, Some((310.0, 300.0))));
		let expected = (1.0 - 10.0 / 200.0) * 0.25 * 5.0;
		assert_close(next[0].vx, expected, 1e-12);
		assert_close(next[0].vy, 0.0, 1e-12);
		assert_close(next[0].x, 300.0 + expected, 1e-12);
	}

	#[test]
	fn near_zero_distance_force_approaches_full_strength() {
		let settings = frictionless();
		let next = step(&[single(300.0, 300.0)], &input(&settings, Some((300.0, 300.02))));
		assert_close(next[0].vy, 1.25, 1e-3);
	}

	#[test]
	fn repulse_pushes_away() {
		let settings = Settings {
			interaction_mode: InteractionMode::Repulse,
			..frictionless()
		};
		let next = step(&[single(300.0, 300.0)], &input(&settings, Some((300.0, 250.0))));
		assert!(next[0].vy > 0.0);
		assert_close(next[0].vx, 0.0, 1e-12);
	}

	#[test]
	fn pointer_outside_radius_or_zero_strength_is_ignored() {
		let settings = frictionless();
		let far = step(&[single(300.0, 300.0)], &input(&settings, Some((600.0, 300.0))));
		assert_eq!(far[0].vx, 0.0);

		let weak = Settings {
			interaction_strength: 0.0,
			..frictionless()
		};
		let none = step(&[single(300.0, 300.0)], &input(&weak, Some((310.0, 300.0))));
		assert_eq!(none[0].vx, 0.0);
	}

	#[test]
	fn glow_uses_non_strict_distance_test() {
		let settings = Settings {
			enable_glow: true,
			..frictionless()
		};
		let on_top = step(&[single(300.0, 300.0)], &input(&settings, Some((300.0, 300.0))));
		assert_eq!(on_top[0].color, Color::rgb(255, 255, 0));
		assert_eq!((on_top[0].vx, on_top[0].vy), (0.0, 0.0));

		let half = step(&[single(300.0, 300.0)], &input(&settings, Some((400.0, 300.0))));
		assert_eq!((half[0].color.r, half[0].color.g), (242, 243));

		let outside = step(&[single(300.0, 300.0)], &input(&settings, Some((550.0, 300.0))));
		assert_eq!(outside[0].color, NEUTRAL);
	}

	#[test]
	fn glow_disabled_keeps_ambient_color() {
		let settings = frictionless();
		let next = step(&[single(300.0, 300.0)], &input(&settings, Some((300.0, 300.0))));
		assert_eq!(next[0].color, NEUTRAL);
	}

	#[test]
	fn return_force_then_damping() {
		let settings = Settings {
			return_force: 0.1,
			damping: 0.5,
			..Settings::default()
		};
		let mut p = single(300.0, 300.0);
		p.x = 320.0;
		let next = step(&[p], &input(&settings, None));
		assert_close(next[0].vx, -1.0, 1e-12);
		assert_close(next[0].x, 319.0, 1e-12);
	}

	#[test]
	fn left_wall_bounce() {
		let settings = frictionless();
		let mut p = single(100.0, 300.0);
		p.x = 2.0;
		p.vx = -1.0;
		let next = step(&[p], &input(&settings, None));
		assert_eq!(next[0].x, 3.5);
		assert_close(next[0].vx, 0.3, 1e-12);
	}

	#[test]
	fn far_wall_bounce() {
		let settings = frictionless();
		let mut p = single(500.0, 300.0);
		p.y = 598.0;
		p.vy = 4.0;
		let next = step(&[p], &input(&settings, None));
		assert_eq!(next[0].y, 596.5);
		assert_close(next[0].vy, -1.2, 1e-12);
	}

	#[test]
	fn unsized_field_skips_boundaries() {
		let settings = frictionless();
		let mut p = single(100.0, 300.0);
		p.x = 2.0;
		p.vx = -5.0;
		let no_bounds = StepInput {
			width: 0.0,
			..input(&settings, None)
		};
		let next = step(&[p], &no_bounds);
		assert_eq!(next[0].x, -3.0);
		assert_eq!(next[0].vx, -5.0);
	}

	#[test]
	fn positions_stay_in_bounds_under_pointer_pressure() {
		let settings = Settings {
			interaction_strength: 0.5,
			mouse_effect_radius: 500.0,
			return_force: 0.005,
			damping: 0.99,
			..Settings::default()
		};
		let mut field = layout(20, settings.base_radius, 900.0, 600.0, NEUTRAL);
		for tick in 0..300 {
			let pointer = Some(((tick * 7 % 900) as f64, (tick * 3 % 600) as f64));
			field = step(&field, &input(&settings, pointer));
			for p in &field {
				assert_eq!(p.radius, settings.base_radius);
				assert!(p.x >= p.radius && p.x <= 900.0 - p.radius);
				assert!(p.y >= p.radius && p.y <= 600.0 - p.radius);
			}
		}
	}

	#[test]
	fn radius_tracks_settings_every_step() {
		let settings = Settings {
			base_radius: 6.0,
			..Settings::default()
		};
		let field = layout(4, 3.5, 200.0, 200.0, NEUTRAL);
		for p in step(&field, &input(&settings, None)) {
			assert_eq!(p.radius, 6.0);
		}
	}

	#[test]
	fn damping_alone_decays_speed() {
		let settings = Settings {
			return_force: 0.0,
			interaction_strength: 0.0,
			damping: 0.9,
			..Settings::default()
		};
		let mut p = single(450.0, 300.0);
		p.vx = 2.0;
		p.vy = -1.5;
		let mut field = vec![p];
		let mut last = f64::hypot(2.0, -1.5);
		for _ in 0..50 {
			field = step(&field, &input(&settings, None));
			let speed = field[0].vx.hypot(field[0].vy);
			assert!(speed < last);
			last = speed;
		}
		assert!(last < 0.02);
	}

	#[test]
	fn rotation_advances_only_when_animated() {
		let still = Settings::default();
		let mut p = single(300.0, 300.0);
		p.rotation = 359.5;
		assert_eq!(step(&[p.clone()], &input(&still, None))[0].rotation, 359.5);

		let spinning = Settings {
			animate_rotation: true,
			..Settings::default()
		};
		assert_close(step(&[p], &input(&spinning, None))[0].rotation, 0.5, 1e-12);
	}

	#[test]
	fn identity_and_home_survive_the_step() {
		let field = layout(5, 3.5, 300.0, 300.0, NEUTRAL);
		let settings = Settings::default();
		let next = step(&field, &input(&settings, Some((150.0, 150.0))));
		for (before, after) in field.iter().zip(&next) {
			assert_eq!((before.row, before.col), (after.row, after.col));
			assert_eq!((before.home_x, before.home_y), (after.home_x, after.home_y));
		}
	}
}
