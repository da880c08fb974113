//! Ambient colors: the slowly cycling background/particle hue and the
//! pointer glow blend.

use super::theme::{Color, Theme};

/// Background and base particle color for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ambient {
	pub background: Color,
	pub particle: Color,
}

/// Time accumulator driving the dynamic color cycle.
///
/// Only advances while dynamic colors are enabled, so toggling them off and
/// on resumes the cycle where it stopped.
#[derive(Clone, Debug, Default)]
pub struct ColorPhase {
	phase: f64,
}

impl ColorPhase {
	pub fn phase(&self) -> f64 {
		self.phase
	}

	/// Advances the phase (when `dynamic`) and returns this tick's ambient colors.
	pub fn advance(&mut self, theme: &Theme, dynamic: bool) -> Ambient {
		if !dynamic {
			return Ambient {
				background: theme.background,
				particle: theme.particle,
			};
		}

		self.phase += theme.phase_step;
		let hue = hue_at(self.phase);
		Ambient {
			background: Color::from_hsl(
				hue,
				theme.background_tone.saturation,
				theme.background_tone.lightness,
			),
			particle: Color::from_hsl(
				hue,
				theme.particle_tone.saturation,
				theme.particle_tone.lightness,
			),
		}
	}
}

/// Maps a phase through a sine wave onto a whole-degree hue in `[0, 360)`.
fn hue_at(phase: f64) -> f64 {
	let wave = (phase.sin() + 1.0) / 2.0;
	(wave * 360.0).floor() % 360.0
}

/// Blends `base` toward `glow` by pointer proximity.
///
/// Full glow at distance 0, none at or beyond `radius`.
pub fn glow_blend(base: Color, glow: Color, distance: f64, radius: f64) -> Color {
	if distance < radius {
		base.lerp(glow, 1.0 - distance / radius)
	} else {
		base
	}
}
