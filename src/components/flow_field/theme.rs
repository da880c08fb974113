//! Colors and the fixed palette of the flow field.
//!
//! All channel arithmetic rounds to the nearest integer and clamps to
//! `[0, 255]`, so converting through hex strings is lossless.

use serde::{Deserialize, Deserializer, de};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

fn channel(v: f64) -> u8 {
	v.round().clamp(0.0, 255.0) as u8
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parses `#RRGGBB` (the leading `#` is optional, hex digits are case-insensitive).
	pub fn from_hex(hex: &str) -> Option<Self> {
		let digits = hex.strip_prefix('#').unwrap_or(hex);
		if digits.len() != 6 || !digits.is_ascii() {
			return None;
		}
		let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
		let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
		let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
		Some(Self::rgb(r, g, b))
	}

	/// Converts HSL (hue in degrees, saturation and lightness in percent) to RGB.
	pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
		let (s, l) = (s / 100.0, l / 100.0);
		let a = s * l.min(1.0 - l);
		let f = |n: f64| {
			let k = (n + h / 30.0).rem_euclid(12.0);
			l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
		};
		Self::rgb(channel(255.0 * f(0.0)), channel(255.0 * f(8.0)), channel(255.0 * f(4.0)))
	}

	/// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
	pub fn lerp(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let mix = |a: u8, b: u8| channel(a as f64 + (b as f64 - a as f64) * t);
		Self {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: self.a + (other.a - self.a) * t,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

impl<'de> Deserialize<'de> for Color {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let hex = String::deserialize(deserializer)?;
		Color::from_hex(&hex)
			.ok_or_else(|| de::Error::custom(format!("invalid hex color `{hex}`")))
	}
}

/// HSL saturation/lightness pair used by the dynamic color cycle.
#[derive(Clone, Copy, Debug)]
pub struct Tone {
	pub saturation: f64,
	pub lightness: f64,
}

/// Fixed palette and color-cycle tuning.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Background when dynamic colors are off (neutral-800).
	pub background: Color,
	/// Particle color when dynamic colors are off (neutral-200).
	pub particle: Color,
	pub background_tone: Tone,
	pub particle_tone: Tone,
	/// Phase increment per tick while dynamic colors are on.
	pub phase_step: f64,
	pub base_point: Color,
	pub base_point_dynamic: Color,
	pub base_point_opacity: f64,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(38, 38, 38),
			particle: Color::rgb(229, 231, 235),
			background_tone: Tone {
				saturation: 70.0,
				lightness: 15.0,
			},
			particle_tone: Tone {
				saturation: 85.0,
				lightness: 65.0,
			},
			phase_step: 0.002,
			base_point: Color::rgba(229, 231, 235, 0.3),
			base_point_dynamic: Color::rgba(255, 255, 255, 0.2),
			base_point_opacity: 0.4,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_with_and_without_hash() {
		assert_eq!(Color::from_hex("#E5E7EB"), Some(Color::rgb(229, 231, 235)));
		assert_eq!(Color::from_hex("ffff00"), Some(Color::rgb(255, 255, 0)));
		assert_eq!(Color::from_hex("#fff"), None);
		assert_eq!(Color::from_hex("#gg0000"), None);
	}

	#[test]
	fn hsl_primaries() {
		assert_eq!(Color::from_hsl(0.0, 100.0, 50.0), Color::rgb(255, 0, 0));
		assert_eq!(Color::from_hsl(120.0, 100.0, 50.0), Color::rgb(0, 255, 0));
		assert_eq!(Color::from_hsl(240.0, 100.0, 50.0), Color::rgb(0, 0, 255));
		assert_eq!(Color::from_hsl(0.0, 0.0, 100.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::from_hsl(200.0, 50.0, 0.0), Color::rgb(0, 0, 0));
	}

	#[test]
	fn hex_round_trip_across_hue_wheel() {
		for hue in (0..360).step_by(7) {
			for (s, l) in [(70.0, 15.0), (85.0, 65.0), (40.0, 50.0)] {
				let rgb = Color::from_hsl(hue as f64, s, l);
				let back = Color::from_hex(&rgb.to_css_rgb()).unwrap();
				assert!((rgb.r as i16 - back.r as i16).abs() <= 1);
				assert!((rgb.g as i16 - back.g as i16).abs() <= 1);
				assert!((rgb.b as i16 - back.b as i16).abs() <= 1);
			}
		}
	}

	#[test]
	fn lerp_rounds_channels() {
		let mid = Color::rgb(229, 231, 235).lerp(Color::rgb(255, 255, 0), 0.5);
		assert_eq!((mid.r, mid.g), (242, 243));
		assert!((mid.b as i16 - 117).abs() <= 1);
		assert_eq!(Color::rgb(0, 0, 0).lerp(Color::rgb(255, 255, 255), 2.0), Color::rgb(255, 255, 255));
	}

	#[test]
	fn css_formatting() {
		assert_eq!(Color::rgb(38, 38, 38).to_css(), "#262626");
		assert_eq!(Color::rgba(255, 255, 255, 0.2).to_css(), "rgba(255, 255, 255, 0.2)");
	}

	#[test]
	fn deserializes_from_hex_string() {
		let c: Color = serde_json::from_str("\"#FFFF00\"").unwrap();
		assert_eq!(c, Color::rgb(255, 255, 0));
		assert!(serde_json::from_str::<Color>("\"yellow\"").is_err());
	}
}
